//! Deferred texture copies.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;

/// Copies one file, returning the number of bytes written.
pub type CopyFn = fn(&Path, &Path) -> io::Result<u64>;

/// Pending `(source, destination)` file copies collected while building
/// an export and executed once at the end.
#[derive(Clone)]
pub struct CopyBatch {
    pending: IndexSet<(PathBuf, PathBuf)>,
    copy: CopyFn,
}

impl Default for CopyBatch {
    fn default() -> Self {
        Self::with_copy_fn(|source, destination| std::fs::copy(source, destination))
    }
}

impl fmt::Debug for CopyBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyBatch")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl CopyBatch {
    /// Empty batch performing its copies with `copy` instead of
    /// [`std::fs::copy`].
    pub fn with_copy_fn(copy: CopyFn) -> Self {
        Self {
            pending: IndexSet::new(),
            copy,
        }
    }

    /// Replace the function performing the copies. Pending copies are kept.
    pub fn set_copy_fn(&mut self, copy: CopyFn) {
        self.copy = copy;
    }

    /// Queue a copy. Returns `false` if the same copy is already queued.
    pub fn push(&mut self, source: PathBuf, destination: PathBuf) -> bool {
        self.pending.insert((source, destination))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending copies in queue order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.pending
            .iter()
            .map(|(source, destination)| (source.as_path(), destination.as_path()))
    }

    /// Perform every pending copy, creating destination directories.
    ///
    /// Missing sources and failed copies are passed to `report` and
    /// skipped. Copies whose destination already is the source file are
    /// skipped silently. A permission error stops the batch and is
    /// returned with the batch left intact; otherwise the batch is drained
    /// and the number of copied files returned.
    pub fn copy_all(&mut self, mut report: impl FnMut(&str)) -> io::Result<usize> {
        let mut copied = 0;

        for (source, destination) in &self.pending {
            if !source.exists() {
                report(&format!("missing {}, not copying", source.display()));
                continue;
            }
            if is_same_file(source, destination) {
                continue;
            }

            if let Some(dir) = destination.parent() {
                if let Err(e) = std::fs::create_dir_all(dir) {
                    if e.kind() == io::ErrorKind::PermissionDenied {
                        return Err(e);
                    }
                    report(&format!("failed creating {}: {e}", dir.display()));
                    continue;
                }
            }

            match (self.copy)(source, destination) {
                Ok(_) => copied += 1,
                Err(e) if e.kind() == io::ErrorKind::PermissionDenied => return Err(e),
                Err(e) => report(&format!(
                    "failed copying {} -> {}: {e}",
                    source.display(),
                    destination.display()
                )),
            }
        }

        self.pending.clear();
        Ok(copied)
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl fmt::Display for CopyBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (source, destination)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", source.display(), destination.display())?;
        }
        Ok(())
    }
}
