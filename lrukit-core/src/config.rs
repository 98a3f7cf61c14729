//! Project configuration read from a `.lrukit` TOML file.
//!
//! # Config file format (`.lrukit`)
//!
//! ```toml
//! [cache]
//! # Capacity used by scenarios that do not set their own.
//! capacity = 128
//!
//! [output]
//! # pretty | text | json
//! format = "pretty"
//! ```
//!
//! # Discovery
//! [`Config::load`] walks upward from the given path looking for a `.lrukit`
//! file or a `.git` directory, using the first match as the config root.
//! Falls back to defaults when neither is found.

use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Capacity used when neither the scenario nor the config names one.
pub const DEFAULT_CAPACITY: usize = 128;

const CONFIG_FILE: &str = ".lrukit";

// ---------------------------------------------------------------------------
// TOML config types (private)
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    cache: CacheSection,
    #[serde(default)]
    output: OutputSection,
}

#[derive(serde::Deserialize)]
struct CacheSection {
    #[serde(default = "default_capacity")]
    capacity: usize,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[derive(serde::Deserialize)]
struct OutputSection {
    #[serde(default = "default_format")]
    format: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_format() -> String {
    "pretty".to_string()
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the config was discovered in (or the start directory).
    pub root: PathBuf,
    pub capacity: usize,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            capacity: DEFAULT_CAPACITY,
            format: OutputFormat::Pretty,
        }
    }
}

impl Config {
    /// Discover and load the nearest `.lrukit`, walking upward from `start`
    /// to the git root.  Uses defaults if none is found or the file cannot
    /// be parsed.
    pub fn load(start: &Path) -> Self {
        let root = find_config_root(start);
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Self::from_parts(root, ConfigFile::default());
        }
        match Self::from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("{e:#}; using defaults");
                Self::from_parts(root, ConfigFile::default())
            }
        }
    }

    /// Load from an explicit config file path.
    ///
    /// Returns an error if the file cannot be read or parsed, or if it names
    /// a zero capacity or an unknown output format.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let f: ConfigFile = toml::from_str(&s)
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
        if f.cache.capacity == 0 {
            anyhow::bail!("{}: cache.capacity must be at least 1", path.display());
        }
        f.output
            .format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
        let root = path.parent().unwrap_or(path).to_path_buf();
        Ok(Self::from_parts(root, f))
    }

    fn from_parts(root: PathBuf, f: ConfigFile) -> Self {
        Self {
            root,
            capacity: f.cache.capacity,
            format: f.output.format.parse().unwrap_or(OutputFormat::Pretty),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Walk upward from `start` (normalised to a directory) looking for a
/// `.lrukit` file or a `.git` directory.  Returns the first match, or
/// `start` itself if neither is found before the filesystem root.
fn find_config_root(start: &Path) -> PathBuf {
    let dir = if start.is_file() {
        start.parent().unwrap_or(start)
    } else {
        start
    };

    let mut current = dir;
    loop {
        if current.join(CONFIG_FILE).is_file() || current.join(".git").is_dir() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(p) => current = p,
            None => return dir.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults_when_no_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let cfg = Config::load(dir.path());
        assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
        assert_eq!(cfg.format, OutputFormat::Pretty);
    }

    #[test]
    fn load_reads_capacity_and_format() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".lrukit"),
            "[cache]\ncapacity = 2\n\n[output]\nformat = \"json\"\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path());
        assert_eq!(cfg.capacity, 2);
        assert_eq!(cfg.format, OutputFormat::Json);
        assert_eq!(cfg.root, dir.path());
    }

    #[test]
    fn load_falls_back_on_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".lrukit"), "not valid toml ][[[").unwrap();
        let cfg = Config::load(dir.path());
        assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let f = dir.path().join(".lrukit");
        std::fs::write(&f, "[output]\nformat = \"text\"\n").unwrap();
        let cfg = Config::from_file(&f).unwrap();
        assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
        assert_eq!(cfg.format, OutputFormat::Text);
    }

    #[test]
    fn from_file_rejects_zero_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let f = dir.path().join(".lrukit");
        std::fs::write(&f, "[cache]\ncapacity = 0\n").unwrap();
        let err = Config::from_file(&f).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn from_file_rejects_negative_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let f = dir.path().join(".lrukit");
        std::fs::write(&f, "[cache]\ncapacity = -3\n").unwrap();
        assert!(Config::from_file(&f).is_err());
    }

    #[test]
    fn from_file_rejects_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let f = dir.path().join(".lrukit");
        std::fs::write(&f, "[output]\nformat = \"yaml\"\n").unwrap();
        let err = Config::from_file(&f).unwrap_err();
        assert!(err.to_string().contains("unknown format: yaml"));
    }

    #[test]
    fn from_file_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_file(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn find_config_root_stops_at_git() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let sub = dir.path().join("scenarios");
        std::fs::create_dir(&sub).unwrap();
        assert_eq!(find_config_root(&sub), dir.path());
    }

    #[test]
    fn find_config_root_stops_at_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".lrukit"), "").unwrap();
        let sub = dir.path().join("deep/nested");
        std::fs::create_dir_all(&sub).unwrap();
        assert_eq!(find_config_root(&sub), dir.path());
    }
}
