pub mod entry;
pub mod types;

pub use entry::{NormalizedEntry, RawEntry};
pub use types::{Medium, Unit};
