pub mod snapshot;

pub use snapshot::{
    export_to_path, import_from_path, load_graph, parse_line, read_graph, write_graph, Record,
    SnapshotError,
};
