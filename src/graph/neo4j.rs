//! Neo4j sink over the HTTP transactional Cypher endpoint.
//!
//! Each chain is posted to `{uri}/db/{database}/tx/commit`, which opens a
//! transaction, runs every statement in order and commits. Any statement
//! error rolls the whole transaction back and is reported in `errors`.

use super::{GraphOp, GraphSink};
use crate::utils::config::{Neo4jConfig, CALLS_RELATIONSHIP, FUNCTION_LABEL};
use crate::utils::error::SinkError;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Request body for the commit endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CommitRequest {
    pub statements: Vec<Statement>,
}

/// A parameterized Cypher statement
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub statement: String,
    pub parameters: serde_json::Value,
}

/// Response body from the commit endpoint
#[derive(Debug, Deserialize)]
pub struct CommitResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<Neo4jError>,
}

/// Error object reported by the server
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jError {
    pub code: String,
    pub message: String,
}

/// Graph sink writing to a Neo4j server
pub struct Neo4jSink {
    client: Client,
    config: Neo4jConfig,
    commit_url: String,
}

impl Neo4jSink {
    /// Create a new sink
    ///
    /// No connection is made until the first chain is written.
    pub fn new(config: Neo4jConfig) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SinkError::RequestFailed)?;

        let commit_url = commit_url(&config.uri, &config.database);
        debug!("Neo4j commit endpoint: {}", commit_url);

        Ok(Self {
            client,
            config,
            commit_url,
        })
    }

    pub fn commit_url(&self) -> &str {
        &self.commit_url
    }
}

impl GraphSink for Neo4jSink {
    fn write_chain(&self, ops: &[GraphOp]) -> Result<(), SinkError> {
        let request = build_commit_request(ops);
        debug!("Posting {} statements to Neo4j", request.statements.len());

        let mut builder = self.client.post(&self.commit_url).json(&request);
        if let Some(username) = &self.config.username {
            builder = builder.basic_auth(username, self.config.password.as_deref());
        }

        let response = builder.send().map_err(SinkError::RequestFailed)?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(SinkError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        let body: CommitResponse = response.json().map_err(SinkError::RequestFailed)?;
        check_commit_response(body)?;

        info!("Committed {} graph operations to Neo4j", ops.len());
        Ok(())
    }

    // The commit endpoint keeps no server-side session; the pool goes with the sink
    fn close(&self) {
        debug!("Closing Neo4j sink for {}", self.config.uri);
    }
}

/// Build the transactional commit URL for a database
///
/// **Private** - internal helper for Neo4jSink::new
fn commit_url(uri: &str, database: &str) -> String {
    format!("{}/db/{}/tx/commit", uri.trim_end_matches('/'), database)
}

/// Translate graph operations into Cypher statements, preserving order
///
/// **Public** - exposed for inspection and testing
pub fn build_commit_request(ops: &[GraphOp]) -> CommitRequest {
    let statements = ops
        .iter()
        .map(|op| match op {
            GraphOp::UpsertNode(node) => Statement {
                statement: format!(
                    "MERGE (f:{FUNCTION_LABEL} {{name: $name, package: $package}}) SET f += $properties"
                ),
                parameters: serde_json::json!({
                    "name": node.key.name,
                    "package": node.key.package,
                    "properties": node.properties,
                }),
            },
            GraphOp::UpsertEdge(edge) => Statement {
                statement: format!(
                    "MATCH (caller:{FUNCTION_LABEL} {{name: $caller_name, package: $caller_package}}) \
                     MATCH (callee:{FUNCTION_LABEL} {{name: $callee_name, package: $callee_package}}) \
                     MERGE (caller)-[:{CALLS_RELATIONSHIP}]->(callee)"
                ),
                parameters: serde_json::json!({
                    "caller_name": edge.caller.name,
                    "caller_package": edge.caller.package,
                    "callee_name": edge.callee.name,
                    "callee_package": edge.callee.package,
                }),
            },
        })
        .collect();

    CommitRequest { statements }
}

/// Map server-side statement errors to a sink error
///
/// **Private** - the first error is reported; the transaction is already rolled back
fn check_commit_response(response: CommitResponse) -> Result<(), SinkError> {
    match response.errors.into_iter().next() {
        Some(error) => Err(SinkError::Rejected {
            code: error.code,
            message: error.message,
        }),
        None => {
            debug!("Commit returned {} result sets", response.results.len());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeUpsert, NodeKey, NodeUpsert};
    use std::collections::BTreeMap;

    fn key(name: &str) -> NodeKey {
        NodeKey {
            name: name.to_string(),
            package: "net/http".to_string(),
        }
    }

    #[test]
    fn test_commit_url() {
        assert_eq!(
            commit_url("http://localhost:7474/", "neo4j"),
            "http://localhost:7474/db/neo4j/tx/commit"
        );
        assert_eq!(
            commit_url("https://graph.internal", "calls"),
            "https://graph.internal/db/calls/tx/commit"
        );
    }

    #[test]
    fn test_build_commit_request_order_and_params() {
        let ops = vec![
            GraphOp::UpsertNode(NodeUpsert {
                key: key("Serve"),
                properties: BTreeMap::from([("receiver".to_string(), "Server".to_string())]),
            }),
            GraphOp::UpsertNode(NodeUpsert {
                key: key("serve"),
                properties: BTreeMap::new(),
            }),
            GraphOp::UpsertEdge(EdgeUpsert {
                caller: key("Serve"),
                callee: key("serve"),
            }),
        ];

        let request = build_commit_request(&ops);
        assert_eq!(request.statements.len(), 3);

        let first = &request.statements[0];
        assert!(first.statement.starts_with("MERGE (f:Function"));
        assert_eq!(first.parameters["name"], "Serve");
        assert_eq!(first.parameters["package"], "net/http");
        assert_eq!(first.parameters["properties"]["receiver"], "Server");

        let edge = &request.statements[2];
        assert!(edge.statement.contains("MERGE (caller)-[:CALLS]->(callee)"));
        assert_eq!(edge.parameters["caller_name"], "Serve");
        assert_eq!(edge.parameters["callee_name"], "serve");
    }

    #[test]
    fn test_check_commit_response_success() {
        let response: CommitResponse =
            serde_json::from_value(serde_json::json!({ "results": [{}, {}], "errors": [] })).unwrap();
        assert!(check_commit_response(response).is_ok());
    }

    #[test]
    fn test_check_commit_response_rejected() {
        let response: CommitResponse = serde_json::from_value(serde_json::json!({
            "results": [],
            "errors": [{
                "code": "Neo.ClientError.Schema.ConstraintValidationFailed",
                "message": "Node already exists"
            }]
        }))
        .unwrap();

        match check_commit_response(response) {
            Err(SinkError::Rejected { code, message }) => {
                assert_eq!(code, "Neo.ClientError.Schema.ConstraintValidationFailed");
                assert_eq!(message, "Node already exists");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_new_sink_builds_url() {
        let sink = Neo4jSink::new(Neo4jConfig::new("http://db:7474").with_database("graphs")).unwrap();
        assert_eq!(sink.commit_url(), "http://db:7474/db/graphs/tx/commit");
    }
}
