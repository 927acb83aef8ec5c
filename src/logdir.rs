use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use crate::config::LogDirConfig;
use crate::formats::DataFormat;
use crate::gitops;
use crate::util::fs::{ensure_dir, ensure_parent, touch};

const DIR_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
const README_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NO_REPO: &str = "(no repo found)";

/// What to create while resolving a path inside a [`LogDir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolve {
    /// Create the file or directory itself.
    pub touch: bool,
    /// Create the directories leading up to it. Turning this off also turns
    /// off `touch`.
    pub mkdirs: bool,
}

impl Default for Resolve {
    fn default() -> Self {
        Self {
            touch: true,
            mkdirs: true,
        }
    }
}

impl Resolve {
    /// Only compute the path.
    pub const NOTHING: Resolve = Resolve {
        touch: false,
        mkdirs: false,
    };
    /// Create parents but leave the target to the caller.
    pub const PARENTS: Resolve = Resolve {
        touch: false,
        mkdirs: true,
    };

    fn effective_touch(&self) -> bool {
        self.mkdirs && self.touch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    File,
    Dir,
}

#[derive(Debug, Clone)]
pub struct ReadmeOptions {
    pub date: bool,
    pub git_commit: bool,
    /// Directory checked for a `.git` when `git_commit` is set.
    pub git_path: Utf8PathBuf,
    /// Extra bullet lines, written in order after the date and commit.
    pub info: Vec<String>,
}

impl Default for ReadmeOptions {
    fn default() -> Self {
        Self {
            date: true,
            git_commit: true,
            git_path: Utf8PathBuf::from("."),
            info: Vec::new(),
        }
    }
}

/// A timestamped directory holding the artifacts of one run.
///
/// The directory is created when the handle is built and is left on disk when
/// the handle is dropped.
#[derive(Debug, Clone)]
pub struct LogDir {
    name: String,
    created_at: NaiveDateTime,
    path: Utf8PathBuf,
}

impl LogDir {
    /// Create `<root_dir>/<timestamp>_<slug>` with default settings.
    pub fn new(name: &str, root_dir: impl Into<Utf8PathBuf>) -> Result<Self> {
        Self::with_config(name, &LogDirConfig::with_root(root_dir))
    }

    /// Use `custom_dir` as the managed directory, creating it if needed.
    pub fn open(name: &str, custom_dir: impl Into<Utf8PathBuf>) -> Result<Self> {
        Self::with_config(name, &LogDirConfig::with_custom_dir(custom_dir))
    }

    pub fn with_config(name: &str, config: &LogDirConfig) -> Result<Self> {
        let created_at = config
            .created_at
            .unwrap_or_else(|| Local::now().naive_local());

        let path = match &config.custom_dir {
            Some(dir) => dir.clone(),
            None => config.root_dir.join(dir_name(name, created_at, config)),
        };
        ensure_dir(&path)?;
        tracing::info!(%path, "using log directory");

        Ok(Self {
            name: name.to_owned(),
            created_at,
            path,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time the handle was created. Always the same value for a given handle.
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Path of a file in the directory, creating it and its parents.
    pub fn file(&self, filename: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf> {
        self.file_with(filename, Resolve::default())
    }

    /// Path of a file in the directory. An existing file is never truncated.
    pub fn file_with(&self, filename: impl AsRef<Utf8Path>, opts: Resolve) -> Result<Utf8PathBuf> {
        self.resolve(filename.as_ref(), opts, Target::File)
    }

    /// Path of a subdirectory, creating it and its parents.
    pub fn dir(&self, dirname: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf> {
        self.dir_with(dirname, Resolve::default())
    }

    pub fn dir_with(&self, dirname: impl AsRef<Utf8Path>, opts: Resolve) -> Result<Utf8PathBuf> {
        self.resolve(dirname.as_ref(), opts, Target::Dir)
    }

    fn resolve(&self, relative: &Utf8Path, opts: Resolve, target: Target) -> Result<Utf8PathBuf> {
        let path = self.path.join(relative);
        if opts.mkdirs {
            ensure_parent(&path)?;
        }
        if opts.effective_touch() {
            match target {
                Target::File => touch(&path)?,
                Target::Dir => ensure_dir(&path)?,
            }
        }
        Ok(path)
    }

    /// Copy `src` (relative to the working directory, or absolute) to `dest`
    /// inside the directory, overwriting whatever is there.
    pub fn copy(&self, src: impl AsRef<Utf8Path>, dest: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf> {
        let src = src.as_ref();
        let dest = self.file_with(dest, Resolve::PARENTS)?;
        fs::copy(src, &dest).with_context(|| format!("copying {} to {}", src, dest))?;
        tracing::debug!(%src, %dest, "copied file");
        Ok(dest)
    }

    /// Serialize `data` to `filename`, picking the format from its extension.
    ///
    /// | extension        | format |
    /// |------------------|--------|
    /// | `json`           | JSON   |
    /// | `yml`, `yaml`    | YAML   |
    /// | `toml`           | TOML   |
    /// | `pkl`, `pickle`  | binary (`bincode`) |
    ///
    /// Any other extension fails with
    /// [`SaveError::UnsupportedFormat`](crate::SaveError::UnsupportedFormat)
    /// before anything is created on disk. A value that fails to encode leaves
    /// any existing file untouched.
    pub fn save_data<T>(&self, data: &T, filename: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf>
    where
        T: Serialize + ?Sized,
    {
        let filename = filename.as_ref();
        let format = DataFormat::from_path(filename)?;
        let bytes = format.encode(data)?;
        let path = self.file_with(filename, Resolve::PARENTS)?;

        fs::write(&path, bytes).with_context(|| format!("writing {}", path))?;
        tracing::debug!(%path, format = format.as_str(), "saved data");
        Ok(path)
    }

    /// Write `README.md` with the run name and a few bullet points.
    pub fn readme(&self, opts: &ReadmeOptions) -> Result<Utf8PathBuf> {
        let mut out = String::new();
        let _ = writeln!(out, "# {}", self.name);
        let _ = writeln!(out);
        if opts.date {
            let _ = writeln!(out, "- Date: {}", self.created_at.format(README_TIME_FORMAT));
        }
        if opts.git_commit {
            let commit = match gitops::head_commit(&opts.git_path) {
                Some(commit) => commit,
                None => {
                    tracing::warn!(git_path = %opts.git_path, "no git repository found");
                    NO_REPO.to_owned()
                }
            };
            let _ = writeln!(out, "- Git Commit: {}", commit);
        }
        for line in &opts.info {
            let _ = writeln!(out, "- {}", line);
        }

        let path = self.file("README.md")?;
        fs::write(&path, out).with_context(|| format!("writing {}", path))?;
        Ok(path)
    }
}

fn dir_name(name: &str, created_at: NaiveDateTime, config: &LogDirConfig) -> String {
    let mut dirname = format!(
        "{}_{}",
        created_at.format(DIR_TIME_FORMAT),
        config.slug.apply(name)
    );
    if config.uuid {
        let _ = write!(dirname, "_{}", Uuid::new_v4());
    }
    dirname
}
