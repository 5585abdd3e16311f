//! In-memory port doubles for unit tests.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::context::ServiceContext;
use crate::ports::filesystem::{DirEntry, EntryKind, FileLock, FileSystem};
use crate::ports::{Clock, IdGenerator};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(String),
}

#[derive(Default)]
struct Shared {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
    unreadable: Mutex<HashSet<PathBuf>>,
    locks_taken: AtomicUsize,
}

/// In-memory filesystem with injectable failures.
///
/// Clones share state, so a test can keep a handle after boxing one into a
/// `ServiceContext`.
#[derive(Clone, Default)]
pub struct MemFileSystem {
    shared: Arc<Shared>,
    fail_writes: bool,
}

impl MemFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write and rename fails.
    pub fn failing_writes() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    pub fn mark_unreadable(&self, path: impl Into<PathBuf>) {
        self.shared.unreadable.lock().unwrap().insert(path.into());
    }

    pub fn put_file(&self, path: impl Into<PathBuf>, contents: &str) {
        self.shared.nodes.lock().unwrap().insert(path.into(), Node::File(contents.to_string()));
    }

    pub fn file(&self, path: &Path) -> Option<String> {
        match self.shared.nodes.lock().unwrap().get(path) {
            Some(Node::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        matches!(self.shared.nodes.lock().unwrap().get(path), Some(Node::Dir))
    }

    /// Names of all files directly under `dir`, sorted.
    pub fn file_names(&self, dir: &Path) -> Vec<String> {
        self.shared
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, n)| p.parent() == Some(dir) && matches!(n, Node::File(_)))
            .filter_map(|(p, _)| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect()
    }

    pub fn locks_taken(&self) -> usize {
        self.shared.locks_taken.load(Ordering::SeqCst)
    }

    fn check_parent(
        nodes: &BTreeMap<PathBuf, Node>,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Ok(()),
            Some(parent) if matches!(nodes.get(parent), Some(Node::Dir)) => Ok(()),
            _ => Err(format!("No such directory: {}", path.display()).into()),
        }
    }
}

impl FileSystem for MemFileSystem {
    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut nodes = self.shared.nodes.lock().unwrap();
        let mut ancestors: Vec<&Path> =
            path.ancestors().filter(|p| !p.as_os_str().is_empty()).collect();
        ancestors.reverse();
        for dir in ancestors {
            match nodes.get(dir) {
                Some(Node::File(_)) => {
                    return Err(format!("Not a directory: {}", dir.display()).into());
                }
                Some(Node::Dir) => {}
                None => {
                    nodes.insert(dir.to_path_buf(), Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        if self.shared.unreadable.lock().unwrap().contains(path) {
            return Err(format!("Permission denied: {}", path.display()).into());
        }
        self.file(path).ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.fail_writes {
            return Err("No space left on device".into());
        }
        let mut nodes = self.shared.nodes.lock().unwrap();
        Self::check_parent(&nodes, path)?;
        if matches!(nodes.get(path), Some(Node::Dir)) {
            return Err(format!("Is a directory: {}", path.display()).into());
        }
        nodes.insert(path.to_path_buf(), Node::File(contents.to_string()));
        Ok(())
    }

    fn write_synced(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.write(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.fail_writes {
            return Err("Read-only file system".into());
        }
        let mut nodes = self.shared.nodes.lock().unwrap();
        let node =
            nodes.remove(from).ok_or_else(|| format!("File not found: {}", from.display()))?;
        nodes.insert(to.to_path_buf(), node);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self.shared.nodes.lock().unwrap().remove(path) {
            Some(_) => Ok(()),
            None => Err(format!("File not found: {}", path.display()).into()),
        }
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<DirEntry>, Box<dyn std::error::Error + Send + Sync>> {
        let nodes = self.shared.nodes.lock().unwrap();
        if !matches!(nodes.get(path), Some(Node::Dir)) {
            return Err(format!("No such directory: {}", path.display()).into());
        }
        Ok(nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .filter_map(|(p, node)| {
                let name = p.file_name()?.to_str()?.to_string();
                let kind = match node {
                    Node::Dir => EntryKind::Directory,
                    Node::File(_) => EntryKind::File,
                };
                Some(DirEntry { name, kind })
            })
            .collect())
    }

    fn lock_exclusive(
        &self,
        _path: &Path,
    ) -> Result<FileLock, Box<dyn std::error::Error + Send + Sync>> {
        self.shared.locks_taken.fetch_add(1, Ordering::SeqCst);
        Ok(FileLock::noop())
    }
}

/// Clock frozen at a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Produces `id-0`, `id-1`, ...
#[derive(Default)]
pub struct SequenceIdGenerator {
    next: AtomicUsize,
}

impl IdGenerator for SequenceIdGenerator {
    fn generate_id(&self) -> String {
        format!("id-{}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// A context over the given filesystem with a clock fixed at `secs`.
pub fn context(fs: MemFileSystem, secs: i64) -> ServiceContext {
    ServiceContext {
        clock: Box::new(FixedClock::at(secs)),
        fs: Box::new(fs),
        id_gen: Box::new(SequenceIdGenerator::default()),
    }
}
