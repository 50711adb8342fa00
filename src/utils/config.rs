//! Configuration and constants for stack reporting.

use std::time::Duration;

/// Default timeout for graph database requests
pub const DEFAULT_SINK_TIMEOUT: Duration = Duration::from_secs(30);

/// Default Neo4j HTTP endpoint
pub const DEFAULT_NEO4J_URI: &str = "http://localhost:7474";

/// Default Neo4j database name
pub const DEFAULT_DATABASE: &str = "neo4j";

/// Current output document schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Label given to every function node in the graph
pub const FUNCTION_LABEL: &str = "Function";

/// Relationship type for a direct call from caller to callee
pub const CALLS_RELATIONSHIP: &str = "CALLS";

// Package paths under these hosts carry repository identity in their
// first three segments (host/org/name)
pub const REPOSITORY_HOST_PREFIXES: &[&str] = &["github.com/", "bitbucket.org/"];

/// Connection settings for the Neo4j HTTP sink
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    /// Base HTTP(S) URI of the server, e.g. `http://localhost:7474`
    pub uri: String,

    pub username: Option<String>,
    pub password: Option<String>,

    /// Target database name
    pub database: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_NEO4J_URI.to_string(),
            username: None,
            password: None,
            database: DEFAULT_DATABASE.to_string(),
            timeout: DEFAULT_SINK_TIMEOUT,
        }
    }
}

impl Neo4jConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
