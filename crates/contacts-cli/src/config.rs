use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use contacts_core::DEFAULT_FILENAME;

/// Contacts shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContactsConfig {
    #[serde(default)]
    pub book: BookSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BookSection {
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    pub page_size: Option<usize>,
}

impl ContactsConfig {
    /// Storage path: CLI argument (or `CONTACTS_PATH`), then config, then the
    /// XDG data dir.
    pub fn book_path(&self, cli_path: Option<&str>) -> anyhow::Result<PathBuf> {
        if let Some(path) = cli_path.filter(|p| !p.trim().is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = self.book.path.as_deref() {
            return Ok(PathBuf::from(path));
        }
        default_book_path()
    }

    pub fn page_size(&self, cli_page_size: Option<usize>) -> usize {
        cli_page_size
            .or(self.ui.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .max(1)
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_book_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(DEFAULT_FILENAME))
}

/// Read the config at `path`, or defaults if there is none.
pub fn load_config(path: &Path) -> anyhow::Result<ContactsConfig> {
    if !path.exists() {
        return Ok(ContactsConfig::default());
    }
    read_config(path)
}

pub fn read_config(path: &Path) -> anyhow::Result<ContactsConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("contacts"));
        }
    }
    Ok(home_dir()?.join(".config").join("contacts"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("contacts"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("contacts"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml")).unwrap();
        assert!(config.book.path.is_none());
        assert_eq!(config.page_size(None), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_reads_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[book]\npath = \"/tmp/mine.json\"\n\n[ui]\npage_size = 8\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.page_size(None), 8);
        assert_eq!(config.page_size(Some(3)), 3);
        assert_eq!(
            config.book_path(None).unwrap(),
            PathBuf::from("/tmp/mine.json")
        );
        assert_eq!(
            config.book_path(Some("other.json")).unwrap(),
            PathBuf::from("other.json")
        );
    }

    #[test]
    fn test_partial_config() {
        let config: ContactsConfig = toml::from_str("[ui]\npage_size = 0\n").unwrap();
        assert!(config.book.path.is_none());
        assert_eq!(config.page_size(None), 1);
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui\npage_size = ").unwrap();
        assert!(load_config(&path).is_err());
    }
}
