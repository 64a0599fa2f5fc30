//! billbook-storage-json
//!
//! Filesystem-backed key-value store plus JSON export/import of the ledger.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use billbook_core::{
    codec::{decode_ledger, encode_ledger_pretty},
    CoreError, KeyValueStore,
};
use billbook_domain::Ledger;
use tracing::{debug, info};

const STORE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Default file name used for exports.
pub const DEFAULT_EXPORT_FILE: &str = "people_data.json";

/// Stores each key as `<root>/<key>.json`, written atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), STORE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        write_synced(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "store entry saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        if !self.root.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(STORE_EXTENSION)
            {
                fs::remove_file(&path)?;
            }
        }
        info!(root = %self.root.display(), "store cleared");
        Ok(())
    }
}

/// Writes the ledger as pretty-printed JSON to `path`.
pub fn export_ledger(ledger: &Ledger, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    write_synced(&tmp, &encode_ledger_pretty(ledger)?)?;
    fs::rename(&tmp, path)?;
    info!(path = %path.display(), people = ledger.len(), "ledger exported");
    Ok(())
}

/// Reads a ledger export. Anything but a top-level array of people is a
/// [`CoreError::Format`].
pub fn import_ledger(path: &Path) -> Result<Ledger, CoreError> {
    let data = fs::read_to_string(path)?;
    let ledger = decode_ledger(&data)?;
    info!(path = %path.display(), people = ledger.len(), "ledger file read");
    Ok(ledger)
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_synced(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_replaces_path_characters() {
        assert_eq!(canonical_key("peopleData"), "peopleData");
        assert_eq!(canonical_key("../etc/passwd"), "___etc_passwd");
        assert_eq!(canonical_key("  "), "ledger");
    }

    #[test]
    fn tmp_path_keeps_original_extension() {
        let tmp = tmp_path(Path::new("/data/people_data.json"));
        assert_eq!(tmp, PathBuf::from("/data/people_data.json.tmp"));
    }
}
