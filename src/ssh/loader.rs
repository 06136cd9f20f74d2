// ABOUTME: File loader resolving default SSH config locations and aggregating parsed host records
// ABOUTME: Any unreadable or malformed file aborts the whole load so no partial result escapes

use super::parser::{HostRecord, parse};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default file list for a home directory: every entry of `~/.ssh/config.d`
/// sorted by name, followed by `~/.ssh/config`.
pub fn default_config_files(home: &Path) -> Vec<PathBuf> {
    let ssh_dir = home.join(".ssh");
    config_files(&ssh_dir.join("config.d"), &ssh_dir.join("config"))
}

/// Fragment files from `fragment_dir` (by name), then `config_path`.
///
/// A missing or unreadable fragment directory contributes nothing.
pub fn config_files(fragment_dir: &Path, config_path: &Path) -> Vec<PathBuf> {
    let mut files = match fs::read_dir(fragment_dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect(),
        Err(e) => {
            debug!("skipping fragment directory {}: {}", fragment_dir.display(), e);
            Vec::new()
        }
    };
    files.sort();

    files.push(config_path.to_path_buf());
    files
}

pub fn parse_file(path: &Path) -> Result<Vec<HostRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read SSH config file: {}", path.display()))?;

    let records = parse(&content)
        .with_context(|| format!("Failed to parse SSH config file: {}", path.display()))?;

    debug!("parsed {} host records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse each file in order and concatenate the records.
pub fn load_hosts(paths: &[PathBuf]) -> Result<Vec<HostRecord>> {
    let mut records = Vec::new();

    for path in paths {
        match parse_file(path) {
            Ok(mut parsed) => records.append(&mut parsed),
            Err(e) => {
                warn!("aborting load at {}: {:#}", path.display(), e);
                return Err(e);
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssh::parser::ParseError;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(path: &Path, content: &str) {
        let mut file = fs::File::create(path).unwrap();
        write!(file, "{content}").unwrap();
    }

    fn create_ssh_home(temp_dir: &TempDir) -> PathBuf {
        let ssh_dir = temp_dir.path().join(".ssh");
        fs::create_dir_all(ssh_dir.join("config.d")).unwrap();

        write_file(&ssh_dir.join("config.d").join("20-work"), "Host work\n    HostName work.example.com\n");
        write_file(&ssh_dir.join("config.d").join("10-home"), "Host home\n    User me\n");
        write_file(&ssh_dir.join("config"), "Host *\n    Port 2222\n");

        temp_dir.path().to_path_buf()
    }

    #[test]
    fn test_default_config_files_order() {
        let temp_dir = TempDir::new().unwrap();
        let home = create_ssh_home(&temp_dir);

        let files = default_config_files(&home);

        let ssh_dir = home.join(".ssh");
        assert_eq!(
            files,
            vec![
                ssh_dir.join("config.d").join("10-home"),
                ssh_dir.join("config.d").join("20-work"),
                ssh_dir.join("config"),
            ]
        );
    }

    #[test]
    fn test_default_config_files_without_fragment_dir() {
        let temp_dir = TempDir::new().unwrap();

        let files = default_config_files(temp_dir.path());

        assert_eq!(files, vec![temp_dir.path().join(".ssh").join("config")]);
    }

    #[test]
    fn test_load_hosts_concatenates_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let home = create_ssh_home(&temp_dir);

        let records = load_hosts(&default_config_files(&home)).unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.patterns[0].as_str()).collect();
        assert_eq!(names, vec!["home", "work", "*"]);
        assert_eq!(records[0].user, "me");
        assert_eq!(records[1].host_name, "work.example.com");
        assert_eq!(records[2].port, 2222);
    }

    #[test]
    fn test_load_hosts_missing_file_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let present = temp_dir.path().join("config");
        write_file(&present, "Host a\n");

        let result = load_hosts(&[present, temp_dir.path().join("missing")]);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read SSH config file"));
    }

    #[test]
    fn test_load_hosts_parse_error_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good");
        let bad = temp_dir.path().join("bad");
        write_file(&good, "Host a\n");
        write_file(&bad, "Host b\nPort abc\n");

        let err = load_hosts(&[good, bad]).unwrap_err();

        assert!(err.to_string().contains("Failed to parse SSH config file"));
        let cause = err.downcast_ref::<ParseError>().unwrap();
        assert!(matches!(cause, ParseError::InvalidPort { .. }));
    }

    #[test]
    fn test_load_hosts_empty_list() {
        assert!(load_hosts(&[]).unwrap().is_empty());
    }
}
