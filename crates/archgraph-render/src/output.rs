//! Output directory acquisition and atomic artifact writes.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use archgraph_core::{Error, Result};

/// Extension of the DOT source kept next to an artifact on request.
pub const SOURCE_EXTENSION: &str = "gv";

/// An output directory that is known to exist.
///
/// Acquiring one is the only place a render creates directories; the call is
/// idempotent and succeeds silently when the directory is already there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Create `path` and any missing parents, then resolve it to an absolute path.
    ///
    /// Fails with `OutputPath` when `path` (or one of its parents) exists but
    /// is not a directory, or when the filesystem refuses to create it.
    pub fn acquire(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        if path.as_os_str().is_empty() {
            return Err(Error::output_path(shown, "output directory path is empty")
                .with_operation("output::acquire"));
        }

        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => {
                debug!(path = %shown, "output directory already exists");
            }
            Ok(_) => {
                return Err(Error::output_path(
                    shown.clone(),
                    format!("'{shown}' exists and is not a directory"),
                )
                .with_operation("output::acquire"));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(path).map_err(|err| {
                    Error::output_path(
                        shown.clone(),
                        format!("cannot create output directory '{shown}': {err}"),
                    )
                    .with_operation("output::acquire")
                    .set_source(err)
                })?;
                debug!(path = %shown, "output directory created");
            }
            Err(err) => {
                return Err(Error::output_path(
                    shown.clone(),
                    format!("cannot inspect output directory '{shown}': {err}"),
                )
                .with_operation("output::acquire")
                .set_source(err));
            }
        }

        let path = std::path::absolute(path).map_err(|err| {
            Error::output_path(shown.clone(), format!("cannot resolve '{shown}': {err}"))
                .with_operation("output::acquire")
                .set_source(err)
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<dir>/<base_name>.<format>`
    pub fn artifact_path(&self, base_name: &str, format: &str) -> PathBuf {
        self.path.join(format!("{base_name}.{format}"))
    }

    /// `<dir>/<base_name>.gv`
    pub fn source_path(&self, base_name: &str) -> PathBuf {
        self.path.join(format!("{base_name}.{SOURCE_EXTENSION}"))
    }

    /// Write `bytes` to `target` inside this directory without ever leaving a
    /// partial file at `target`.
    ///
    /// The bytes go to a hidden temporary file first, which is renamed over
    /// `target` once complete. An existing file at `target` is replaced. The
    /// temporary file is removed on every failure path.
    pub fn write_atomic(&self, target: &Path, bytes: &[u8]) -> Result<()> {
        let shown = target.display().to_string();
        let io_error = |err: io::Error| {
            Error::from(err)
                .with_context("path", shown.clone())
                .with_operation("output::write_atomic")
        };

        let mut staged = tempfile::Builder::new()
            .prefix(".archgraph-")
            .suffix(".tmp")
            .tempfile_in(&self.path)
            .map_err(io_error)?;
        staged.write_all(bytes).map_err(io_error)?;
        staged.as_file().sync_all().map_err(io_error)?;

        staged.persist(target).map_err(|err| io_error(err.error))?;
        debug!(path = %shown, bytes = bytes.len(), "artifact persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_core::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn test_acquire_creates_missing_parents() {
        let root = tempdir().unwrap();
        let nested = root.path().join("a").join("b").join("c");

        let dir = OutputDir::acquire(&nested).unwrap();
        assert!(nested.is_dir());
        assert!(dir.path().is_absolute());
        assert_eq!(dir.path(), nested.as_path());
    }

    #[test]
    fn test_acquire_is_idempotent() {
        let root = tempdir().unwrap();
        let first = OutputDir::acquire(root.path()).unwrap();
        let second = OutputDir::acquire(root.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_acquire_rejects_file() {
        let root = tempdir().unwrap();
        let file = root.path().join("taken");
        fs::write(&file, b"x").unwrap();

        let err = OutputDir::acquire(&file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputPath);
        assert!(err.context_value("path").is_some());

        // a file in the parent chain is rejected too
        let err = OutputDir::acquire(file.join("below")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputPath);
    }

    #[test]
    fn test_acquire_rejects_empty_path() {
        let err = OutputDir::acquire("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputPath);
    }

    #[test]
    fn test_artifact_and_source_paths() {
        let dir = OutputDir {
            path: PathBuf::from("/tmp/out"),
        };
        assert_eq!(
            dir.artifact_path("agent_flow", "svg"),
            PathBuf::from("/tmp/out/agent_flow.svg")
        );
        assert_eq!(
            dir.source_path("agent_flow"),
            PathBuf::from("/tmp/out/agent_flow.gv")
        );
    }

    #[test]
    fn test_write_atomic_replaces_and_leaves_no_temporaries() {
        let root = tempdir().unwrap();
        let dir = OutputDir::acquire(root.path()).unwrap();
        let target = dir.artifact_path("g", "svg");

        fs::write(&target, b"old").unwrap();
        dir.write_atomic(&target, b"new").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
