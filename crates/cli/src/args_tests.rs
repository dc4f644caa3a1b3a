use super::*;

fn parse(extra: &[&str]) -> Args {
    let mut argv = vec!["synapse-spark"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn test_defaults() {
    let args = parse(&[]);

    assert_eq!(args.workspace_name, "<your-workspace-name>");
    assert_eq!(args.operation, "");
    assert_eq!(args.sparkjobdef, "");
    assert!(!args.run_sync);
    assert_eq!(args.wait_policy().unwrap(), WaitPolicy::default());
}

#[test]
fn test_full_invocation() {
    let args = parse(&[
        "--workspace_name",
        "abc",
        "--operation",
        "execute_spark_job",
        "--sparkjobdef",
        "nightly-etl",
        "--run_sync",
        "true",
    ]);

    assert_eq!(args.endpoint().unwrap().as_str(), "https://abc.dev.azuresynapse.net");

    let request = args.operation_request().unwrap();
    assert_eq!(request.operation, Operation::ExecuteSparkJob);
    assert_eq!(request.job_definition, "nightly-etl");
    assert!(request.run_sync);
}

#[test]
fn test_run_sync_accepts_boolish_values() {
    assert!(parse(&["--run_sync", "yes"]).run_sync);
    assert!(parse(&["--run_sync", "1"]).run_sync);
    assert!(!parse(&["--run_sync", "false"]).run_sync);
    assert!(!parse(&["--run_sync", "0"]).run_sync);
}

#[test]
fn test_unknown_operation_is_kept_verbatim() {
    let request = parse(&["--operation", "list_pools"]).operation_request().unwrap();
    assert_eq!(
        request.operation,
        Operation::Unsupported("list_pools".to_string())
    );
}

#[test]
fn test_zero_poll_interval_is_rejected() {
    assert!(parse(&["--poll_interval", "0"]).wait_policy().is_err());

    let sync_execute = parse(&[
        "--operation",
        "execute_spark_job",
        "--run_sync",
        "true",
        "--poll_interval",
        "0",
    ]);
    assert!(sync_execute.operation_request().is_err());
}

#[test]
fn test_unused_wait_flags_are_not_validated() {
    let unknown = parse(&["--operation", "list_pools", "--poll_interval", "0"]);
    assert!(unknown.operation_request().is_ok());

    let fire_and_forget = parse(&[
        "--operation",
        "execute_spark_job",
        "--poll_interval",
        "0",
    ]);
    let request = fire_and_forget.operation_request().unwrap();
    assert!(!request.run_sync);
    assert_eq!(request.wait_policy, WaitPolicy::default());
}

#[test]
fn test_empty_workspace_is_rejected() {
    assert!(parse(&["--workspace_name", ""]).endpoint().is_err());
}
