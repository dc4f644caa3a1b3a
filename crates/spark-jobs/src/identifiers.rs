//! Newtype domain identifiers.
//!
//! Every Synapse concept that has an identity is represented as a distinct
//! newtype wrapping a primitive. This prevents accidentally interchanging, for
//! example, a [`SparkPoolName`] with a [`LivyJobId`] even though both are
//! strings on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single CLI invocation.
///
/// Generated fresh for every run and attached to the root span so all token
/// exchanges, submissions and polls from one invocation can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed (Azure / Synapse names)
// ---------------------------------------------------------------------------

string_id! {
    /// Name of a Synapse workspace (the `abc` in `https://abc.dev.azuresynapse.net`).
    WorkspaceName
}

string_id! {
    /// Name of a Spark job definition published in the workspace.
    SparkJobDefinitionName
}

string_id! {
    /// Name of the Spark pool a job runs on, as reported by the execute call.
    SparkPoolName
}

string_id! {
    /// Identifier of a Livy batch job / session.
    ///
    /// Synapse reports it as an integer; it is kept as text because it is only
    /// ever echoed back into URLs and log lines.
    LivyJobId
}

string_id! {
    /// Azure AD tenant (directory) identifier.
    TenantId
}

string_id! {
    /// Application (client) identifier of the service principal.
    ClientId
}
