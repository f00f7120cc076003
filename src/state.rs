// src/state.rs
use crate::error::{PayoutError, PayoutResult};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Load the newline-delimited wallet list. A missing file is fatal: without
/// targets there is nothing to run.
pub fn load_wallets(path: &Path) -> PayoutResult<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| PayoutError::WalletList(format!("{}: {}", path.display(), e)))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Addresses already paid in this or a prior run. Backed by a newline-
/// delimited file that is appended on every success, which makes reruns
/// idempotent: an address present here is never reprocessed.
pub struct SuccessSet {
    path: PathBuf,
    paid: HashSet<String>,
}

impl SuccessSet {
    /// A missing file is an empty set; any other read failure is fatal.
    pub fn load(path: &Path) -> PayoutResult<Self> {
        let paid = match std::fs::read_to_string(path) {
            Ok(raw) => raw
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            paid,
        })
    }

    pub fn contains(&self, wallet: &str) -> bool {
        self.paid.contains(wallet)
    }

    /// Append the wallet to the backing file and the in-memory set.
    pub fn record(&mut self, wallet: &str) -> PayoutResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", wallet)?;
        self.paid.insert(wallet.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.paid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paid.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_wallet_list_is_fatal() {
        let err = load_wallets(Path::new("/nonexistent/wallets.txt")).unwrap_err();
        assert!(matches!(err, PayoutError::WalletList(_)));
    }

    #[test]
    fn wallet_list_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallets.txt");
        std::fs::write(&path, "0xaaa\n\n  \n0xbbb\n").unwrap();
        assert_eq!(load_wallets(&path).unwrap(), vec!["0xaaa", "0xbbb"]);
    }

    #[test]
    fn missing_success_file_is_an_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = SuccessSet::load(&dir.path().join("success_wallets.txt")).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn record_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("success_wallets.txt");

        let mut set = SuccessSet::load(&path).unwrap();
        set.record("0xaaa").unwrap();
        set.record("0xbbb").unwrap();
        assert!(set.contains("0xaaa"));
        assert_eq!(set.len(), 2);

        let reloaded = SuccessSet::load(&path).unwrap();
        assert!(reloaded.contains("0xaaa"));
        assert!(reloaded.contains("0xbbb"));
        assert!(!reloaded.contains("0xccc"));
    }
}
