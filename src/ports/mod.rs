//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the record store and something
//! outside the process (wall-clock time, the filesystem, random identifiers).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;

pub use clock::Clock;
pub use filesystem::{DirEntry, EntryKind, FileLock, FileSystem};
pub use id_gen::IdGenerator;
