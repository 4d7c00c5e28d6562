//! Log persistence for failed settlement transactions.
//!
//! One plain-text file per failed sub-transaction, named after its
//! signature. Files from earlier runs are overwritten without warning;
//! last write wins.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::transaction::SettlementLogBundle;

/// Directory the CLI writes into, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Write a bundle to `<dir>/<signature>.log`, creating the directory if
/// absent. Returns the path written.
pub fn save_bundle(dir: &Path, bundle: &SettlementLogBundle) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.log", bundle.signature));
    fs::write(&path, bundle.logs.join("\n"))?;
    Ok(path)
}

/// Read back every saved log file, path-sorted for stable output.
///
/// A missing directory simply means nothing was saved yet.
pub fn read_saved_logs(dir: &Path) -> Result<Vec<(PathBuf, String)>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut logs = Vec::with_capacity(paths.len());
    for path in paths {
        let contents = fs::read_to_string(&path)?;
        logs.push((path, contents));
    }
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bundle(signature: &str, logs: &[&str]) -> SettlementLogBundle {
        SettlementLogBundle::new(
            signature.to_string(),
            logs.iter().map(|l| l.to_string()).collect(),
        )
    }

    #[test]
    fn saves_newline_joined_logs() -> Result<()> {
        let dir = TempDir::new()?;
        let target = dir.path().join("logs");

        let path = save_bundle(&target, &bundle("sigA", &["line one", "line two"]))?;
        assert_eq!(path, target.join("sigA.log"));
        assert_eq!(fs::read_to_string(&path)?, "line one\nline two");
        Ok(())
    }

    #[test]
    fn reason_matches_last_line_of_saved_file() -> Result<()> {
        let dir = TempDir::new()?;
        let b = bundle("sigB", &["begin", "custom program error: 0x1"]);
        let path = save_bundle(dir.path(), &b)?;
        let contents = fs::read_to_string(&path)?;
        assert_eq!(contents.lines().last().unwrap(), b.reason());
        Ok(())
    }

    #[test]
    fn overwrites_previous_run() -> Result<()> {
        let dir = TempDir::new()?;
        save_bundle(dir.path(), &bundle("sigA", &["old"]))?;
        let path = save_bundle(dir.path(), &bundle("sigA", &["new"]))?;
        assert_eq!(fs::read_to_string(&path)?, "new");
        Ok(())
    }

    #[test]
    fn reads_back_sorted() -> Result<()> {
        let dir = TempDir::new()?;
        save_bundle(dir.path(), &bundle("sigB", &["b"]))?;
        save_bundle(dir.path(), &bundle("sigA", &["a"]))?;

        let logs = read_saved_logs(dir.path())?;
        assert_eq!(logs.len(), 2);
        assert!(logs[0].0.ends_with("sigA.log"));
        assert_eq!(logs[0].1, "a");
        assert!(logs[1].0.ends_with("sigB.log"));
        Ok(())
    }

    #[test]
    fn missing_directory_reads_as_empty() -> Result<()> {
        let dir = TempDir::new()?;
        let logs = read_saved_logs(&dir.path().join("nothing-here"))?;
        assert!(logs.is_empty());
        Ok(())
    }
}
