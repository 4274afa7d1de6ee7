use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

use crate::graph::NodeId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum BalanceError {
    #[error("Empty graph: {0}")]
    EmptyGraph(String),
    #[error("Malformed edge {from} -> {to}: sign {sign} is not +1 or -1")]
    MalformedEdge {
        from: NodeId,
        to: NodeId,
        sign: i64,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Edge list parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("File System error: {0}")]
    Io(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl From<io::Error> for BalanceError {
    fn from(x: io::Error) -> Self {
        BalanceError::Io(format!("IOError: {} ({x})", x.kind()))
    }
}

impl From<toml::de::Error> for BalanceError {
    fn from(src: toml::de::Error) -> BalanceError {
        BalanceError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for BalanceError {
    fn from(src: toml::ser::Error) -> BalanceError {
        BalanceError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for BalanceError {
    fn from(src: JsonError) -> BalanceError {
        BalanceError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}
