//! Emitting fragments to disk.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::domain::errors::SplitError;
use crate::domain::model::{Fragment, PathPolicy, WriteOutcome};

/// Writes fragments beneath an output root, one file per fragment.
#[derive(Debug, Clone)]
pub struct FileWriter {
    root: PathBuf,
    policy: PathPolicy,
    dry_run: bool,
}

impl Default for FileWriter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileWriter {
    /// Create a writer resolving relative marker paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            policy: PathPolicy::default(),
            dry_run: false,
        }
    }

    pub fn with_policy(mut self, policy: PathPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// When enabled, targets are resolved and reported but nothing touches the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Map a marker path to its on-disk target according to the path policy.
    pub fn resolve(&self, marker_path: &str) -> Result<PathBuf, SplitError> {
        let relative = Path::new(marker_path);
        if escapes_root(relative) {
            match self.policy {
                PathPolicy::Reject => return Err(SplitError::UnsafePath(marker_path.to_owned())),
                PathPolicy::PassThrough => {
                    tracing::warn!(path = %marker_path, "marker path leaves the output root");
                }
            }
        }
        Ok(self.root.join(relative))
    }

    /// Write one fragment, creating missing parent directories and truncating any existing file.
    pub fn write(&self, fragment: &Fragment<'_>) -> WriteOutcome {
        let path = fragment.path.to_owned();
        let bytes = fragment.contents.len();

        let target = match self.resolve(fragment.path) {
            Ok(target) => target,
            Err(error) => return WriteOutcome::Failed { path, error },
        };

        if self.dry_run {
            tracing::debug!(file = %target.display(), bytes, "dry run, skipping write");
            return WriteOutcome::Planned { path, bytes };
        }

        match persist(&target, fragment.contents) {
            Ok(()) => {
                tracing::debug!(file = %target.display(), bytes, "fragment written");
                WriteOutcome::Written { path, bytes }
            }
            Err(error) => {
                tracing::warn!(file = %target.display(), error = %error, "fragment write failed");
                WriteOutcome::Failed { path, error }
            }
        }
    }
}

fn persist(target: &Path, contents: &str) -> Result<(), SplitError> {
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        fs::create_dir_all(parent).map_err(|source| SplitError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(target, contents).map_err(|source| SplitError::Write {
        path: target.to_path_buf(),
        source,
    })
}

fn escapes_root(path: &Path) -> bool {
    path.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment<'a>(path: &'a str, contents: &'a str) -> Fragment<'a> {
        Fragment { path, contents }
    }

    #[test]
    fn creates_missing_parent_directories() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let writer = FileWriter::new(temp.path());

        let outcome = writer.write(&fragment("nested/deeper/out.txt", "World"));

        assert!(matches!(outcome, WriteOutcome::Written { bytes: 5, .. }));
        assert_eq!(
            fs::read_to_string(temp.path().join("nested/deeper/out.txt"))?,
            "World"
        );
        Ok(())
    }

    #[test]
    fn truncates_existing_files() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        fs::write(temp.path().join("out.txt"), "a much longer previous body")?;

        FileWriter::new(temp.path()).write(&fragment("out.txt", "short"));

        assert_eq!(fs::read_to_string(temp.path().join("out.txt"))?, "short");
        Ok(())
    }

    #[test]
    fn reject_policy_refuses_escaping_paths() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path().join("root");
        let writer = FileWriter::new(&root).with_policy(PathPolicy::Reject);

        for path in ["../escape.txt", "/etc/fragsplit-test", "a/../../b.txt"] {
            let outcome = writer.write(&fragment(path, "nope"));
            assert!(
                matches!(&outcome, WriteOutcome::Failed { error: SplitError::UnsafePath(p), .. } if p == path),
                "{path} should be rejected, got {outcome:?}"
            );
        }
        assert!(!temp.path().join("escape.txt").exists());
        Ok(())
    }

    #[test]
    fn pass_through_policy_writes_escaping_paths() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path().join("root");
        fs::create_dir_all(&root)?;

        let outcome = FileWriter::new(&root).write(&fragment("../sibling.txt", "ok"));

        assert!(matches!(outcome, WriteOutcome::Written { .. }));
        assert_eq!(fs::read_to_string(temp.path().join("sibling.txt"))?, "ok");
        Ok(())
    }

    #[test]
    fn reports_directory_failures_with_the_path() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        fs::write(temp.path().join("blocker"), "file, not a directory")?;

        let outcome = FileWriter::new(temp.path()).write(&fragment("blocker/child.txt", "x"));

        match outcome {
            WriteOutcome::Failed {
                path,
                error: SplitError::CreateDir { path: dir, .. },
            } => {
                assert_eq!(path, "blocker/child.txt");
                assert_eq!(dir, temp.path().join("blocker"));
            }
            other => panic!("expected directory failure, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn dry_run_touches_nothing() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let writer = FileWriter::new(temp.path()).with_dry_run(true);

        let outcome = writer.write(&fragment("sub/planned.txt", "abc"));

        assert!(matches!(outcome, WriteOutcome::Planned { bytes: 3, .. }));
        assert!(!temp.path().join("sub").exists());
        Ok(())
    }
}
