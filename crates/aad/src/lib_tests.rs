use spark_jobs::{ClientId, TenantId, SYNAPSE_RESOURCE};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use super::*;

fn provider() -> ClientCredentialsTokenProvider {
    let credentials = Credentials::new(
        TenantId::new("contoso-tenant").unwrap(),
        ClientId::new("app-1").unwrap(),
        "hunter2",
    );
    // Loopback servers must not be routed through a system proxy.
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ClientCredentialsTokenProvider::new(http, credentials)
}

/// Reads one HTTP/1.1 request (head plus `content-length` body) as text.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    let head_end = loop {
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            return String::from_utf8_lossy(&raw).to_string();
        }
        raw.extend_from_slice(&buf[..n]);
    };

    let head = String::from_utf8_lossy(&raw[..head_end]).to_ascii_lowercase();
    let body_len = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while raw.len() < head_end + body_len {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);
    }
    String::from_utf8_lossy(&raw).to_string()
}

/// Answers one connection per `(status line, body)` pair, in order, and
/// returns the raw requests it received.
async fn serve(
    responses: Vec<(&'static str, &'static str)>,
) -> (String, tokio::task::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status_line, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
        requests
    });

    (base, handle)
}

const TOKEN_BODY: &str = r#"{"token_type": "Bearer", "expires_on": "1700003600", "access_token": "eyJ0eXAi"}"#;

#[test]
fn test_default_authority() {
    let p = provider();
    assert_eq!(p.authority(), "https://login.windows.net/contoso-tenant");
    assert_eq!(
        p.token_url(),
        "https://login.windows.net/contoso-tenant/oauth2/token"
    );
}

#[test]
fn test_authority_host_override() {
    let p = provider().with_authority_host("http://127.0.0.1:9000/");
    assert_eq!(p.token_url(), "http://127.0.0.1:9000/contoso-tenant/oauth2/token");
}

#[test]
fn test_parse_v1_success_with_string_numbers() {
    let body = r#"{
        "token_type": "Bearer",
        "expires_in": "3599",
        "expires_on": "1700003600",
        "resource": "https://dev.azuresynapse.net/",
        "access_token": "eyJ0eXAi"
    }"#;

    let token = parse_token_response(true, body).unwrap();

    assert_eq!(token.secret(), "eyJ0eXAi");
    assert_eq!(
        token.expires_on(),
        Timestamp::from_unix_seconds(1_700_003_600)
    );
}

#[test]
fn test_parse_numeric_expiry() {
    let token =
        parse_token_response(true, r#"{"access_token": "abc", "expires_on": 1700003600}"#).unwrap();
    assert!(token.expires_on().is_some());
}

#[test]
fn test_rejection_surfaces_description() {
    let body = r#"{
        "error": "invalid_client",
        "error_description": "AADSTS7000215: Invalid client secret provided."
    }"#;

    let err = parse_token_response(false, body).unwrap_err();

    match err {
        SparkJobError::Authentication { message } => {
            assert!(message.starts_with("invalid_client: AADSTS7000215"));
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
}

#[test]
fn test_missing_access_token_is_rejected() {
    let err = parse_token_response(true, r#"{"token_type": "Bearer"}"#).unwrap_err();
    assert!(matches!(err, SparkJobError::Authentication { .. }));
}

#[test]
fn test_non_json_body_is_rejected() {
    let err = parse_token_response(false, "<html>Bad Gateway</html>").unwrap_err();
    assert!(err.to_string().contains("Bad Gateway"));
}

#[tokio::test]
async fn test_acquire_token_posts_client_credentials_form() {
    let (base, server) = serve(vec![("200 OK", TOKEN_BODY)]).await;
    let p = provider().with_authority_host(base);

    let token = p.acquire_token(SYNAPSE_RESOURCE).await.unwrap();
    let request = server.await.unwrap().remove(0);

    assert_eq!(token.bearer_header(), "Bearer eyJ0eXAi");
    assert!(request.starts_with("POST /contoso-tenant/oauth2/token HTTP/1.1"));
    assert!(request
        .to_ascii_lowercase()
        .contains("content-type: application/x-www-form-urlencoded"));
    assert!(request.ends_with(
        "grant_type=client_credentials&client_id=app-1&client_secret=hunter2\
         &resource=https%3A%2F%2Fdev.azuresynapse.net%2F"
    ));
}

#[tokio::test]
async fn test_each_call_is_a_fresh_exchange() {
    let (base, server) = serve(vec![("200 OK", TOKEN_BODY), ("200 OK", TOKEN_BODY)]).await;
    let p = provider().with_authority_host(base);

    p.acquire_token(SYNAPSE_RESOURCE).await.unwrap();
    p.acquire_token(SYNAPSE_RESOURCE).await.unwrap();
    let requests = server.await.unwrap();

    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_rejected_exchange_over_the_wire() {
    let (base, server) = serve(vec![(
        "401 Unauthorized",
        r#"{"error": "invalid_client", "error_description": "AADSTS7000215: Invalid client secret provided."}"#,
    )])
    .await;
    let p = provider().with_authority_host(base);

    let err = p.acquire_token(SYNAPSE_RESOURCE).await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, SparkJobError::Authentication { .. }));
    assert!(err.to_string().contains("AADSTS7000215"));
}

#[tokio::test]
async fn test_unreachable_authority_is_authentication_error() {
    // Bind then drop to get a port nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = provider()
        .with_authority_host(base)
        .acquire_token(SYNAPSE_RESOURCE)
        .await
        .unwrap_err();

    assert!(matches!(err, SparkJobError::Authentication { .. }));
}
