//! Loader for whitespace-delimited signed edge lists.
//!
//! Each data line reads `<source> <target> <sign>`, as in the SNAP `soc-sign-epinions`
//! dataset. Blank lines and lines starting with `#` are skipped. The sign column is kept as the
//! raw integer; checking that it is ±1 is left to the analyses that depend on it.

use crate::{
    error::BalanceError,
    graph::{NodeId, SignedGraph},
};
use std::{fs::read_to_string, path::Path};

fn parse_field<T: std::str::FromStr>(
    field: &str,
    name: &str,
    line: usize,
) -> Result<T, BalanceError> {
    field.parse::<T>().map_err(|_| BalanceError::Parse {
        line,
        message: format!("{name} '{field}' is not an integer"),
    })
}

pub fn parse_edge_list(content: &str) -> Result<SignedGraph, BalanceError> {
    let mut graph = SignedGraph::new();
    let mut replaced = 0usize;

    for (idx, raw_line) in content.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let [source, target, sign] = fields.as_slice() else {
            return Err(BalanceError::Parse {
                line,
                message: format!("expected 3 fields, found {}", fields.len()),
            });
        };
        let source: NodeId = parse_field(source, "source", line)?;
        let target: NodeId = parse_field(target, "target", line)?;
        let sign: i64 = parse_field(sign, "sign", line)?;

        if graph.add_edge(source, target, sign).is_some() {
            replaced += 1;
        }
    }

    if replaced > 0 {
        tracing::debug!("{replaced} repeated edges replaced by their last occurrence");
    }
    tracing::info!(
        "Loaded signed graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

pub fn read_edge_list<P: AsRef<Path>>(path: P) -> Result<SignedGraph, BalanceError> {
    tracing::debug!("Reading {:?}", path.as_ref());
    let content = read_to_string(path)?;
    parse_edge_list(&content)
}
