//! Parses edge-list files into a [`Graph`] plus a node-name lookup table.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Error;
use crate::graph::{Graph, GraphBuilder, NodeId};

/// How node tokens in the edge-list file are resolved into dense ids.
#[derive(Debug, Clone)]
pub enum NodeNames {
    /// Tokens parse as `i64` and are mapped into dense ids in ascending
    /// numeric order. The original integers are kept for name resolution.
    Int(Vec<i64>),
    /// Tokens are arbitrary strings, interned in ascending lexicographic
    /// order.
    String(Vec<String>),
}

impl NodeNames {
    /// The number of distinct node names.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int(names) => names.len(),
            Self::String(names) => names.len(),
        }
    }

    /// Whether there are no node names at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the original token for a dense node id.
    ///
    /// # Panics
    /// Panics if `id` is out of range.
    #[must_use]
    pub fn resolve(&self, id: NodeId) -> String {
        match self {
            Self::Int(names) => names[id as usize].to_string(),
            Self::String(names) => names[id as usize].clone(),
        }
    }
}

/// The two tokens (and optional, discarded, weight token) parsed from one
/// edge-list line.
struct ParsedLine {
    source: String,
    target: String,
}

/// Splits a line on whitespace, tab, comma, or pipe, the way the original
/// tool normalizes delimiters to newlines before re-splitting.
fn parse_line(line: &str, line_number: usize) -> Result<ParsedLine, Error> {
    let mut fields = line.split(|c: char| c == ' ' || c == '\t' || c == ',' || c == '|');
    let source = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::BadlyFormattedLine {
            line_number,
            line: line.to_owned(),
        })?;
    let target = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::BadlyFormattedLine {
            line_number,
            line: line.to_owned(),
        })?;
    // a third token, if present, is a discarded weight
    Ok(ParsedLine {
        source: source.to_owned(),
        target: target.to_owned(),
    })
}

fn strip_cr(mut line: String) -> String {
    if line.ends_with('\r') {
        line.pop();
    }
    line
}

fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::ReadEdgeList {
        path: path.to_owned(),
        source,
    })?;
    Ok(contents.lines().map(|l| strip_cr(l.to_owned())).collect())
}

/// The result of loading an edge-list file: the graph itself plus the
/// table needed to resolve node ids back to their original tokens.
#[derive(Debug)]
pub struct LoadedGraph {
    /// The loaded graph.
    pub graph: Graph,
    /// The node id → original token lookup table.
    pub names: NodeNames,
}

/// Load a graph from an edge-list file.
///
/// Each line holds two endpoint tokens (an optional third weight token is
/// parsed but discarded) separated by whitespace, tabs, commas, or pipes.
/// When `string_ids` is `false` tokens must parse as `i64`; otherwise they
/// are interned as arbitrary strings. Duplicate edges collapse silently;
/// self-loops are rejected.
///
/// # Errors
/// - [`Error::ReadEdgeList`] if the file cannot be opened.
/// - [`Error::BadlyFormattedLine`] if a line has fewer than two tokens.
/// - [`Error::InvalidArgument`] if `string_ids` is `false` and a token is
///   not a valid `i64`.
/// - [`Error::SelfLoopRejected`] if an edge's two endpoints resolve to the
///   same node.
pub fn load_edge_list(path: &Path, string_ids: bool) -> Result<LoadedGraph, Error> {
    let lines = read_lines(path)?;

    let mut parsed = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        parsed.push((i + 1, parse_line(line, i + 1)?));
    }

    if string_ids {
        load_with_string_ids(&parsed)
    } else {
        load_with_int_ids(&parsed)
    }
}

fn load_with_int_ids(parsed: &[(usize, ParsedLine)]) -> Result<LoadedGraph, Error> {
    let parse_token = |tok: &str| -> Result<i64, Error> {
        tok.parse::<i64>()
            .map_err(|_| Error::InvalidArgument(format!("not a valid integer node id: {tok:?}")))
    };

    let mut distinct = BTreeSet::new();
    for (_, line) in parsed {
        distinct.insert(parse_token(&line.source)?);
        distinct.insert(parse_token(&line.target)?);
    }
    let ordered: Vec<i64> = distinct.into_iter().collect();

    let mut builder = GraphBuilder::new(ordered.len());
    for (line_number, line) in parsed {
        let source = parse_token(&line.source)?;
        let target = parse_token(&line.target)?;
        let u = ordered.binary_search(&source).unwrap() as NodeId;
        let v = ordered.binary_search(&target).unwrap() as NodeId;
        builder.add_edge(u, v, *line_number, &line.source)?;
    }

    Ok(LoadedGraph {
        graph: builder.build(),
        names: NodeNames::Int(ordered),
    })
}

fn load_with_string_ids(parsed: &[(usize, ParsedLine)]) -> Result<LoadedGraph, Error> {
    let mut distinct = BTreeSet::new();
    for (_, line) in parsed {
        distinct.insert(line.source.clone());
        distinct.insert(line.target.clone());
    }
    let ordered: Vec<String> = distinct.into_iter().collect();

    let mut builder = GraphBuilder::new(ordered.len());
    for (line_number, line) in parsed {
        let u = ordered.binary_search(&line.source).unwrap() as NodeId;
        let v = ordered.binary_search(&line.target).unwrap() as NodeId;
        builder.add_edge(u, v, *line_number, &line.source)?;
    }

    Ok(LoadedGraph {
        graph: builder.build(),
        names: NodeNames::String(ordered),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// A scratch edge-list file, deleted when dropped. Kept local to avoid
    /// pulling in a `tempfile` dependency for a handful of loader tests.
    struct TempPath {
        path: std::path::PathBuf,
    }

    impl TempPath {
        fn as_path(&self) -> &std::path::Path {
            &self.path
        }
    }

    impl Drop for TempPath {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn write_temp(contents: &str) -> TempPath {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!(
            "clique-percolation-test-{}-{n}.edges",
            std::process::id()
        ));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        TempPath { path }
    }

    #[test]
    fn loads_int_edge_list_with_dense_ids() {
        let tmp = write_temp("10 20\n20 30\n10 30\n");
        let loaded = load_edge_list(tmp.as_path(), false).unwrap();
        assert_eq!(loaded.graph.num_nodes(), 3);
        assert_eq!(loaded.graph.num_edges(), 3);
        match &loaded.names {
            NodeNames::Int(names) => assert_eq!(names, &[10, 20, 30]),
            NodeNames::String(_) => panic!("expected int ids"),
        }
    }

    #[test]
    fn loads_string_edge_list() {
        let tmp = write_temp("bob alice\nalice carol\n");
        let loaded = load_edge_list(tmp.as_path(), true).unwrap();
        assert_eq!(loaded.graph.num_nodes(), 3);
        match &loaded.names {
            NodeNames::String(names) => assert_eq!(names, &["alice", "bob", "carol"]),
            NodeNames::Int(_) => panic!("expected string ids"),
        }
    }

    #[test]
    fn third_token_weight_is_discarded() {
        let tmp = write_temp("1 2 0.5\n");
        let loaded = load_edge_list(tmp.as_path(), false).unwrap();
        assert_eq!(loaded.graph.num_edges(), 1);
    }

    #[test]
    fn comma_and_pipe_delimiters_are_accepted() {
        let tmp = write_temp("1,2\n2|3\n");
        let loaded = load_edge_list(tmp.as_path(), false).unwrap();
        assert_eq!(loaded.graph.num_edges(), 2);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let tmp = write_temp("1 2\n2 1\n");
        let loaded = load_edge_list(tmp.as_path(), false).unwrap();
        assert_eq!(loaded.graph.num_edges(), 1);
    }

    #[test]
    fn single_token_line_is_badly_formatted() {
        let tmp = write_temp("1\n");
        let err = load_edge_list(tmp.as_path(), false).unwrap_err();
        assert!(matches!(err, Error::BadlyFormattedLine { line_number: 1, .. }));
    }

    #[test]
    fn blank_line_is_badly_formatted_not_silently_skipped() {
        let tmp = write_temp("1 2\n\n2 3\n");
        let err = load_edge_list(tmp.as_path(), false).unwrap_err();
        assert!(matches!(err, Error::BadlyFormattedLine { line_number: 2, .. }));
    }

    #[test]
    fn non_numeric_token_is_invalid_without_string_ids() {
        let tmp = write_temp("alice bob\n");
        let err = load_edge_list(tmp.as_path(), false).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn self_loop_is_rejected() {
        let tmp = write_temp("1 1\n");
        let err = load_edge_list(tmp.as_path(), false).unwrap_err();
        assert!(matches!(err, Error::SelfLoopRejected { .. }));
    }

    #[test]
    fn missing_file_is_read_edge_list_error() {
        let err = load_edge_list(Path::new("/no/such/file.edges"), false).unwrap_err();
        assert!(matches!(err, Error::ReadEdgeList { .. }));
    }
}
