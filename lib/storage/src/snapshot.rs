// Text snapshot format for graphs
//
//   node (<id> {<payload>})
//   edge (<source>)-[<id> {<payload>}]->(<target>)
//
// Nodes are written before edges. On import every other line is ignored and
// records are inserted as they are read, so ids must come in order and edge
// endpoints must already exist.
use blockgraph_core::{Graph, GraphConfig, NodeId, Orientation};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

const NODE_PREFIX: &str = "node ";
const EDGE_PREFIX: &str = "edge ";

pub type Result<T> = std::result::Result<T, SnapshotError>;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Unable to open file {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid stream: {0}")]
    Stream(#[from] std::io::Error),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Invalid payload on line {line}: {reason}")]
    Payload { line: usize, reason: String },

    #[error(transparent)]
    Graph(#[from] blockgraph_core::Error),
}

impl SnapshotError {
    /// The graph error behind this failure, if the record itself was well formed
    pub fn graph_error(&self) -> Option<&blockgraph_core::Error> {
        match self {
            SnapshotError::Graph(e) => Some(e),
            _ => None,
        }
    }
}

/// One parsed snapshot line, payload text still unparsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record<'a> {
    Node {
        id: NodeId,
        payload: &'a str,
    },
    Edge {
        id: usize,
        source: NodeId,
        target: NodeId,
        payload: &'a str,
    },
}

fn parse_id(text: &str, line: usize) -> Result<usize> {
    text.parse().map_err(|_| SnapshotError::Parse {
        line,
        reason: format!("Failed while parsing a number from the input: {:?}", text),
    })
}

fn malformed(line: usize, kind: &str) -> SnapshotError {
    SnapshotError::Parse {
        line,
        reason: format!("malformed {} record", kind),
    }
}

/// Split `<id> {<payload>}` into its parts; the payload runs to the last brace
fn split_id_payload<'a>(text: &'a str, line: usize, kind: &str) -> Result<(usize, &'a str)> {
    let (id, rest) = text.split_once(" {").ok_or_else(|| malformed(line, kind))?;
    let payload = rest.strip_suffix('}').ok_or_else(|| malformed(line, kind))?;
    Ok((parse_id(id, line)?, payload))
}

/// Parse one line; `Ok(None)` for lines that are not node or edge records
pub fn parse_line(text: &str, line: usize) -> Result<Option<Record<'_>>> {
    let text = text.strip_suffix('\r').unwrap_or(text);

    if let Some(rest) = text.strip_prefix(NODE_PREFIX) {
        let inner = rest
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .ok_or_else(|| malformed(line, "node"))?;
        let (id, payload) = split_id_payload(inner, line, "node")?;
        return Ok(Some(Record::Node { id, payload }));
    }

    if let Some(rest) = text.strip_prefix(EDGE_PREFIX) {
        let rest = rest.strip_prefix('(').ok_or_else(|| malformed(line, "edge"))?;
        let (source, rest) = rest.split_once(")-[").ok_or_else(|| malformed(line, "edge"))?;
        let (middle, target) = rest.rsplit_once("]->(").ok_or_else(|| malformed(line, "edge"))?;
        let target = target.strip_suffix(')').ok_or_else(|| malformed(line, "edge"))?;
        let (id, payload) = split_id_payload(middle, line, "edge")?;
        return Ok(Some(Record::Edge {
            id,
            source: parse_id(source, line)?,
            target: parse_id(target, line)?,
            payload,
        }));
    }

    Ok(None)
}

fn parse_payload<T>(text: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    text.parse().map_err(|e: T::Err| SnapshotError::Payload {
        line,
        reason: e.to_string(),
    })
}

/// Write every node line, then every edge line
pub fn write_graph<N, E, W>(graph: &Graph<N, E>, writer: W) -> Result<()>
where
    N: Display,
    E: Display,
    W: Write,
{
    let mut writer = BufWriter::new(writer);
    for node in graph.nodes() {
        writeln!(writer, "{}", node)?;
    }
    for edge in graph.edges().store() {
        writeln!(writer, "{}", edge)?;
    }
    writer.flush()?;
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph snapshot written"
    );
    Ok(())
}

/// Insert every record of `reader` into `graph`, in order
///
/// Stops at the first failing record; records before it stay inserted.
pub fn read_graph<N, E, R>(graph: &mut Graph<N, E>, reader: R) -> Result<()>
where
    N: FromStr,
    N::Err: Display,
    E: FromStr,
    E::Err: Display,
    R: BufRead,
{
    let mut nodes = 0usize;
    let mut edges = 0usize;
    for (index, text) in reader.lines().enumerate() {
        let text = text?;
        let line = index + 1;
        match parse_line(&text, line)? {
            Some(Record::Node { id, payload }) => {
                let payload = parse_payload(payload, line)?;
                graph.nodes_mut().add(id, payload)?;
                nodes += 1;
            }
            Some(Record::Edge {
                id,
                source,
                target,
                payload,
            }) => {
                let payload = parse_payload(payload, line)?;
                graph.edges_mut().add(id, source, target, payload)?;
                edges += 1;
            }
            None => trace!(line, "skipping non-record line"),
        }
    }
    debug!(nodes, edges, "graph snapshot read");
    Ok(())
}

pub fn export_to_path<N, E, P>(graph: &Graph<N, E>, path: P) -> Result<()>
where
    N: Display,
    E: Display,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| SnapshotError::File {
        path: path.to_path_buf(),
        source,
    })?;
    write_graph(graph, file)?;
    debug!(path = %path.display(), "graph exported");
    Ok(())
}

pub fn import_from_path<N, E, P>(graph: &mut Graph<N, E>, path: P) -> Result<()>
where
    N: FromStr,
    N::Err: Display,
    E: FromStr,
    E::Err: Display,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SnapshotError::File {
        path: path.to_path_buf(),
        source,
    })?;
    read_graph(graph, BufReader::new(file))?;
    debug!(path = %path.display(), "graph imported");
    Ok(())
}

/// Build a new graph from a snapshot file
pub fn load_graph<N, E, P>(orientation: Orientation, config: GraphConfig, path: P) -> Result<Graph<N, E>>
where
    N: FromStr,
    N::Err: Display,
    E: FromStr,
    E::Err: Display,
    P: AsRef<Path>,
{
    let mut graph = Graph::with_config(orientation, config)?;
    import_from_path(&mut graph, path)?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockgraph_core::Error;

    #[test]
    fn test_parse_node_line() {
        assert_eq!(
            parse_line("node (3 {hello world})", 1).unwrap(),
            Some(Record::Node { id: 3, payload: "hello world" })
        );
        assert_eq!(
            parse_line("node (0 {})\r", 1).unwrap(),
            Some(Record::Node { id: 0, payload: "" })
        );
    }

    #[test]
    fn test_parse_edge_line() {
        assert_eq!(
            parse_line("edge (0)-[4 {x}]->(12)", 1).unwrap(),
            Some(Record::Edge { id: 4, source: 0, target: 12, payload: "x" })
        );
    }

    #[test]
    fn test_payload_may_contain_braces() {
        assert_eq!(
            parse_line(r#"node (1 {{"k": {"v": 1}}})"#, 1).unwrap(),
            Some(Record::Node { id: 1, payload: r#"{"k": {"v": 1}}"# })
        );
        assert_eq!(
            parse_line("edge (1)-[0 {a}]->(b}]->(2)", 1).unwrap(),
            Some(Record::Edge { id: 0, source: 1, target: 2, payload: "a}]->(b" })
        );
    }

    #[test]
    fn test_other_lines_are_ignored() {
        assert_eq!(parse_line("", 1).unwrap(), None);
        assert_eq!(parse_line("# comment", 1).unwrap(), None);
        assert_eq!(parse_line("nodes (1 {a})", 1).unwrap(), None);
        assert_eq!(parse_line("node", 1).unwrap(), None);
    }

    #[test]
    fn test_bad_numbers_and_shapes() {
        assert!(matches!(
            parse_line("node (x {a})", 7),
            Err(SnapshotError::Parse { line: 7, .. })
        ));
        assert!(matches!(parse_line("node (1 a)", 2), Err(SnapshotError::Parse { .. })));
        assert!(matches!(parse_line("edge (0)-[1 {a}]->2", 2), Err(SnapshotError::Parse { .. })));
        assert!(matches!(parse_line("edge (-1)-[1 {a}]->(2)", 2), Err(SnapshotError::Parse { .. })));
    }

    #[test]
    fn test_read_and_write() {
        let text = "node (0 {a})\nnode (1 {b})\nignored\nedge (0)-[0 {x}]->(1)\n";
        let mut graph: Graph<String, String> = Graph::directed();
        read_graph(&mut graph, text.as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert!(graph.edges().exists_between(0, 1).unwrap());

        let mut out = Vec::new();
        write_graph(&graph, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "node (0 {a})\nnode (1 {b})\nedge (0)-[0 {x}]->(1)\n"
        );
    }

    #[test]
    fn test_read_propagates_graph_errors() {
        let mut graph: Graph<String, String> = Graph::directed();
        let err = read_graph(&mut graph, "node (1 {a})\n".as_bytes()).unwrap_err();
        assert!(matches!(err.graph_error(), Some(Error::InvalidIdentifier(_))));

        let text = "node (0 {a})\nnode (1 {b})\nedge (0)-[0 {x}]->(1)\nedge (0)-[1 {y}]->(1)\n";
        let mut graph: Graph<String, String> = Graph::directed();
        let err = read_graph(&mut graph, text.as_bytes()).unwrap_err();
        assert!(matches!(err.graph_error(), Some(Error::ConflictingItem(_))));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_edge_before_its_nodes() {
        let text = "node (0 {a})\nedge (0)-[0 {x}]->(1)\nnode (1 {b})\n";
        let mut graph: Graph<String, String> = Graph::directed();
        let err = read_graph(&mut graph, text.as_bytes()).unwrap_err();
        assert!(matches!(err.graph_error(), Some(Error::NonexistentItem(_))));
    }

    #[test]
    fn test_payload_parse_failure() {
        let mut graph: Graph<u32, u32> = Graph::directed();
        let err = read_graph(&mut graph, "node (0 {1})\nnode (1 {two})\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SnapshotError::Payload { line: 2, .. }));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph: Graph<String, String> = Graph::directed();
        let err = import_from_path(&mut graph, dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, SnapshotError::File { .. }));
    }

    #[test]
    fn test_json_payload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.txt");

        let mut graph: Graph<serde_json::Value, serde_json::Value> = Graph::undirected();
        graph
            .nodes_mut()
            .push(serde_json::json!({"name": "a", "tags": ["x"]}))
            .unwrap();
        graph.nodes_mut().push(serde_json::json!({"name": "b"})).unwrap();
        graph.edges_mut().push(1, 0, serde_json::json!({"w": 2})).unwrap();
        export_to_path(&graph, &path).unwrap();

        let loaded: Graph<serde_json::Value, serde_json::Value> =
            load_graph(Orientation::Undirected, GraphConfig::default(), &path).unwrap();
        assert_eq!(loaded, graph);
        assert!(loaded.edges().exists_between(0, 1).unwrap());
    }
}
