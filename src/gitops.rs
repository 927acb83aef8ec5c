use std::process::Command;

use camino::Utf8Path;

/// Return the commit `HEAD` points at when `repo` is the root of a git
/// repository, `None` otherwise.
///
/// A directory counts as a repository when it contains `.git` and
/// `git rev-parse HEAD` succeeds against that `.git`; parent repositories are
/// never consulted. A `git` binary that cannot be started also yields `None`.
pub fn head_commit(repo: &Utf8Path) -> Option<String> {
    head_commit_with("git", repo)
}

fn head_commit_with(program: &str, repo: &Utf8Path) -> Option<String> {
    let git_dir = repo.join(".git");
    if !git_dir.exists() {
        return None;
    }

    let output = match Command::new(program)
        .arg("--git-dir")
        .arg(git_dir.as_str())
        .args(["rev-parse", "--verify", "HEAD"])
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            tracing::warn!(%repo, %err, "could not run {}", program);
            return None;
        }
    };
    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        tracing::debug!(%repo, code, "git rev-parse HEAD failed");
        return None;
    }

    let commit = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    (!commit.is_empty()).then_some(commit)
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
    fn plain_directory_has_no_commit() {
        let (_tmp, dir) = scratch();
        assert_eq!(head_commit(&dir), None);
    }

    #[test]
    fn fake_git_dir_without_history_has_no_commit() {
        let (_tmp, dir) = scratch();
        std::fs::create_dir(dir.join(".git")).unwrap();
        assert_eq!(head_commit(&dir), None);
    }

    #[test]
    fn missing_git_binary_has_no_commit() {
        let (_tmp, dir) = scratch();
        std::fs::create_dir(dir.join(".git")).unwrap();
        assert_eq!(head_commit_with("git-binary-that-does-not-exist", &dir), None);
    }
}
