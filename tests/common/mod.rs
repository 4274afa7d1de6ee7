//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::PathBuf;
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Write `content` as an edge list file inside `temp_dir` and return its path.
#[allow(dead_code)]
pub fn write_edge_list(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// A small trust network in the SNAP layout: header comments, tab separated columns.
///
/// Nodes 0..=5, 10 edges, 7 positive and 3 negative.
#[allow(dead_code)]
pub const SMALL_NETWORK: &str = "# Directed graph (each unordered pair of nodes is saved once)
# Signed trust network used in integration tests
# FromNodeId\tToNodeId\tSign
0\t1\t1
1\t0\t1
1\t2\t1
2\t0\t-1
2\t3\t1
3\t4\t1
4\t3\t-1
4\t5\t1
5\t0\t1
0\t5\t-1
";
