//! Dataset output directory and per-instance writes.
//!
//! A batch writes into a fresh directory. Refusing to reuse an existing one
//! keeps two runs from mixing instances under the same index.
//!
//! Each instance is a small set of files (basic problem, advanced problem,
//! and optionally a scene). They are staged as temporary files in the target
//! directory and only then moved into place, so a failed instance leaves no
//! partial files behind.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use craftgen_types::TaskVariant;
use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::OutputError;

/// One file of an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// File name relative to the output directory.
    pub name: String,
    /// Full file contents.
    pub contents: String,
}

impl OutputFile {
    /// Build an output file.
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// A freshly created dataset directory.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Directory a batch writes to: `<root>/<variant>/<n>X<n>`, or
    /// `<root>/<variant>/basic` for basic-only batches.
    pub fn path_for(
        root: &Path,
        variant: TaskVariant,
        map_size: u32,
        basic_only: bool,
    ) -> PathBuf {
        let leaf = if basic_only {
            String::from("basic")
        } else {
            format!("{map_size}X{map_size}")
        };
        root.join(variant.dir_name()).join(leaf)
    }

    /// Create the directory at `path`, including missing parents.
    ///
    /// The leaf itself must be created by this call; anything already at
    /// `path`, directory or not, is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::AlreadyExists`] if `path` exists and
    /// [`OutputError::Io`] if it cannot be created.
    pub fn create(path: &Path) -> Result<Self, OutputError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::create_dir(path).map_err(|source| match source.kind() {
            ErrorKind::AlreadyExists => OutputError::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => OutputError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all files of one instance.
    ///
    /// Either every file ends up in place or none does.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Io`] if staging fails and
    /// [`OutputError::Persist`] if a staged file cannot be moved into place
    /// (including when the target name is already taken).
    pub fn write_instance(&self, files: &[OutputFile]) -> Result<(), OutputError> {
        let mut staged = Vec::with_capacity(files.len());
        for file in files {
            staged.push((self.stage(file)?, self.path.join(&file.name)));
        }

        let mut persisted: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (temp, target) in staged {
            if let Err(err) = temp.persist_noclobber(&target) {
                self.discard(&persisted);
                return Err(OutputError::Persist {
                    path: target,
                    source: err.error,
                });
            }
            persisted.push(target);
        }
        Ok(())
    }

    /// Write `file` to a temporary file inside the output directory.
    fn stage(&self, file: &OutputFile) -> Result<NamedTempFile, OutputError> {
        let io_err = |source: std::io::Error| OutputError::Io {
            path: self.path.join(&file.name),
            source,
        };
        let mut temp = NamedTempFile::new_in(&self.path).map_err(io_err)?;
        temp.write_all(file.contents.as_bytes()).map_err(io_err)?;
        temp.flush().map_err(io_err)?;
        Ok(temp)
    }

    /// Remove files already moved into place for a failed instance.
    fn discard(&self, persisted: &[PathBuf]) {
        for path in persisted {
            if let Err(err) = std::fs::remove_file(path) {
                warn!(
                    dir = %self.path.display(),
                    path = %path.display(),
                    error = %err,
                    "failed to remove partial instance file"
                );
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn path_follows_variant_and_size() {
        let root = Path::new("dataset");
        assert_eq!(
            OutputDir::path_for(root, TaskVariant::WoodenSword, 30, false),
            PathBuf::from("dataset/wooden_sword/30X30")
        );
        assert_eq!(
            OutputDir::path_for(root, TaskVariant::PogoStick, 30, true),
            PathBuf::from("dataset/pogo_stick/basic")
        );
    }

    #[test]
    fn create_refuses_existing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("wooden_sword").join("6X6");
        OutputDir::create(&dir).unwrap();
        assert!(matches!(
            OutputDir::create(&dir),
            Err(OutputError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn create_refuses_existing_file() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("6X6");
        std::fs::write(&path, "not a directory").unwrap();
        assert!(matches!(
            OutputDir::create(&path),
            Err(OutputError::AlreadyExists { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not a directory");
    }

    #[test]
    fn create_builds_missing_parents() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("pogo_stick").join("basic");
        let out = OutputDir::create(&path).unwrap();
        assert!(out.path().is_dir());
    }

    #[test]
    fn write_instance_places_every_file() {
        let root = tempfile::tempdir().unwrap();
        let out = OutputDir::create(&root.path().join("out")).unwrap();
        out.write_instance(&[
            OutputFile::new("basic_map_instance_0.pddl", "basic"),
            OutputFile::new("advanced_map_instance_0.pddl", "advanced"),
        ])
        .unwrap();

        let read = |name: &str| std::fs::read_to_string(out.path().join(name)).unwrap();
        assert_eq!(read("basic_map_instance_0.pddl"), "basic");
        assert_eq!(read("advanced_map_instance_0.pddl"), "advanced");
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 2);
    }

    #[test]
    fn failed_instance_leaves_no_files() {
        let root = tempfile::tempdir().unwrap();
        let out = OutputDir::create(&root.path().join("out")).unwrap();
        std::fs::write(out.path().join("advanced_map_instance_0.pddl"), "old").unwrap();

        let result = out.write_instance(&[
            OutputFile::new("basic_map_instance_0.pddl", "basic"),
            OutputFile::new("advanced_map_instance_0.pddl", "advanced"),
        ]);

        assert!(matches!(result, Err(OutputError::Persist { .. })));
        assert!(!out.path().join("basic_map_instance_0.pddl").exists());
        assert_eq!(
            std::fs::read_to_string(out.path().join("advanced_map_instance_0.pddl")).unwrap(),
            "old"
        );
        // Staged temporaries are dropped with the error.
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 1);
    }
}
