/// Filesystem helpers shared by the directory handle.
pub mod fs {
    use std::fs::{self, OpenOptions};

    use anyhow::{Context, Result};
    use camino::Utf8Path;

    /// Ensure a directory exists, creating it recursively if needed.
    pub fn ensure_dir(path: &Utf8Path) -> Result<()> {
        if !path.is_dir() {
            fs::create_dir_all(path).with_context(|| format!("creating directory {}", path))?;
            tracing::debug!(%path, "created directory");
        }
        Ok(())
    }

    /// Ensure the parent chain of `path` exists.
    pub fn ensure_parent(path: &Utf8Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => ensure_dir(parent),
            _ => Ok(()),
        }
    }

    /// Create an empty file if `path` is absent. Existing content is left alone.
    pub fn touch(path: &Utf8Path) -> Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("creating {}", path))?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use camino::Utf8PathBuf;

        fn scratch() -> (tempfile::TempDir, Utf8PathBuf) {
            let tmp = tempfile::tempdir().unwrap();
            let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
            (tmp, root)
        }

        #[test]
        fn ensure_dir_creates_nested_and_is_idempotent() {
            let (_tmp, root) = scratch();
            let nested = root.join("a").join("b");
            ensure_dir(&nested).unwrap();
            ensure_dir(&nested).unwrap();
            assert!(nested.is_dir());
        }

        #[test]
        fn touch_keeps_existing_content() {
            let (_tmp, root) = scratch();
            let file = root.join("notes.txt");
            fs::write(&file, "keep me").unwrap();
            touch(&file).unwrap();
            assert_eq!(fs::read_to_string(&file).unwrap(), "keep me");
        }

        #[test]
        fn ensure_parent_of_bare_name_is_noop() {
            ensure_parent(Utf8Path::new("file.txt")).unwrap();
        }
    }
}
