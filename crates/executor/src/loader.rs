use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use super::error::Error;
use periodic_path_core::PeriodicGraph;

/// Whitespace-separated integer tokens with their position, for error reports.
struct Tokens<'a> {
    inner: std::iter::Enumerate<std::str::SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Tokens {
            inner: input.split_whitespace().enumerate(),
        }
    }

    /// Next token parsed as `T`, or `None` at end of input.
    fn next_opt<T: FromStr>(&mut self, what: &str) -> Result<Option<T>, Error> {
        match self.inner.next() {
            None => Ok(None),
            Some((token, raw)) => raw.parse().map(Some).map_err(|_| Error::MalformedGraph {
                token,
                message: format!("expected {}, found '{}'", what, raw),
            }),
        }
    }

    fn next_required<T: FromStr>(&mut self, what: &str, position: usize) -> Result<T, Error> {
        self.next_opt(what)?.ok_or_else(|| Error::MalformedGraph {
            token: position,
            message: format!("input ended while reading {}", what),
        })
    }
}

/// Parses a graph description:
///
/// ```text
/// num_vertices period
/// source target w_0 .. w_{period-1}
/// ...
/// ```
///
/// All values are whitespace-separated non-negative integers; line breaks
/// carry no meaning. Truncated records and non-integer tokens are errors, as
/// are edges the graph itself rejects.
pub fn parse_graph(input: &str) -> Result<PeriodicGraph, Error> {
    let mut tokens = Tokens::new(input);

    let num_vertices: usize = tokens.next_required("vertex count", 0)?;
    let period: usize = tokens.next_required("period", 1)?;
    let mut graph = PeriodicGraph::new(num_vertices, period)?;

    let mut record = 0usize;
    let mut position = 2usize;
    while let Some(source) = tokens.next_opt::<usize>("source vertex")? {
        let target: usize = tokens.next_required("target vertex", position + 1)?;

        let weights = (0..period)
            .map(|i| tokens.next_required::<u32>("edge weight", position + 2 + i))
            .collect::<Result<Vec<u32>, Error>>()?;

        graph.add_edge(source, target, weights).inspect_err(|e| {
            debug!(record, source, target, "edge record rejected: {}", e);
        })?;

        record += 1;
        position += 2 + period;
    }

    Ok(graph)
}

/// Reads and parses the graph description stored at `path`.
pub fn load_graph_file(path: &Path) -> Result<PeriodicGraph, Error> {
    let input = std::fs::read_to_string(path)?;
    let graph = parse_graph(&input)?;

    info!(
        path = %path.display(),
        vertices = graph.num_vertices(),
        period = graph.period(),
        edges = graph.num_edges(),
        "Graph loaded."
    );
    Ok(graph)
}
