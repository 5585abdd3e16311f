//! Service context bundling all port trait objects.

use crate::adapters::live::{LiveClock, LiveFileSystem, LiveIdGenerator};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. The store and the
/// command handlers only ever touch the outside world through these.
pub struct ServiceContext {
    /// Clock for deriving record identifiers.
    pub clock: Box<dyn Clock>,
    /// Filesystem for collection directories and record files.
    pub fs: Box<dyn FileSystem>,
    /// ID generator for unique identifiers and temporary file names.
    pub id_gen: Box<dyn IdGenerator>,
}

impl ServiceContext {
    /// Creates a live context backed by the system clock, real disk, and
    /// random UUIDs.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            id_gen: Box::new(LiveIdGenerator),
        }
    }
}
