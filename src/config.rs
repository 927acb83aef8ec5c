use std::fs;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::slug::SlugStyle;

pub const DEFAULT_ROOT_DIR: &str = "logs";

/// Everything that decides where a [`LogDir`](crate::LogDir) lands.
///
/// Can be built in code or loaded from a TOML file, e.g.
///
/// ```toml
/// root_dir = "runs"
/// uuid = true
///
/// [slug]
/// style = "full"
/// separator = "_"
/// max_length = 40
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogDirConfig {
    /// Parent of auto-named directories; created if missing.
    pub root_dir: Utf8PathBuf,
    /// Use this directory as-is instead of generating a name.
    pub custom_dir: Option<Utf8PathBuf>,
    pub slug: SlugStyle,
    /// Append a random UUID so two runs in the same second never share a directory.
    pub uuid: bool,
    /// Fixed creation time. `None` samples the local clock once at construction.
    #[serde(skip)]
    pub created_at: Option<NaiveDateTime>,
}

impl Default for LogDirConfig {
    fn default() -> Self {
        Self {
            root_dir: Utf8PathBuf::from(DEFAULT_ROOT_DIR),
            custom_dir: None,
            slug: SlugStyle::default(),
            uuid: false,
            created_at: None,
        }
    }
}

impl LogDirConfig {
    pub fn with_root(root_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_custom_dir(custom_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            custom_dir: Some(custom_dir.into()),
            ..Self::default()
        }
    }
}

/// Load a configuration file from disk and deserialize it.
pub fn load_from_path(path: &Utf8Path) -> Result<LogDirConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::SlugOptions;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg: LogDirConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.root_dir, DEFAULT_ROOT_DIR);
        assert_eq!(cfg.custom_dir, None);
        assert_eq!(cfg.slug, SlugStyle::Simple);
        assert!(!cfg.uuid);
    }

    #[test]
    fn load_full_slug_section() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("logdir.toml")).unwrap();
        fs::write(
            &path,
            r#"root_dir = "runs"
uuid = true

[slug]
style = "full"
separator = "_"
max_length = 40
"#,
        )
        .unwrap();

        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.root_dir, "runs");
        assert!(cfg.uuid);
        assert_eq!(
            cfg.slug,
            SlugStyle::Full(SlugOptions {
                separator: "_".into(),
                max_length: Some(40),
                ..Default::default()
            })
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_from_path(Utf8Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
