pub mod storage;
pub mod types;

pub use storage::{get_snapshot_path, load_snapshot, read_snapshot, save_snapshot, write_snapshot};
pub use types::{Snapshot, SNAPSHOT_VERSION};
