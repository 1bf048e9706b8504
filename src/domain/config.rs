use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for the tracker.
///
/// Lives at `<root>/config.toml`. A missing or unreadable file falls back to
/// defaults at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Filename of the policy collection, relative to the root directory.
    data_file: String,

    /// How many days ahead the urgency flag looks.
    urgency_window_days: u64,

    /// Endpoint of the AI drafting service, if configured.
    pub assistant_url: Option<String>,

    /// Hard timeout for the drafting call, in seconds.
    pub assistant_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            urgency_window_days: default_urgency_window(),
            assistant_url: None,
            assistant_timeout_secs: default_assistant_timeout(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration from `<root>/config.toml`, falling back to
    /// defaults when missing or invalid.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join("config.toml");
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Filename of the policy collection.
    #[must_use]
    pub fn data_file(&self) -> &str {
        &self.data_file
    }

    /// How many days ahead the urgency flag looks.
    #[must_use]
    pub const fn urgency_window_days(&self) -> u64 {
        self.urgency_window_days
    }
}

fn default_data_file() -> String {
    "policies.json".to_string()
}

const fn default_urgency_window() -> u64 {
    7
}

const fn default_assistant_timeout() -> u64 {
    30
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_data_file")]
        data_file: String,

        #[serde(default = "default_urgency_window")]
        urgency_window_days: u64,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        assistant_url: Option<String>,

        #[serde(default = "default_assistant_timeout")]
        assistant_timeout_secs: u64,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                data_file,
                urgency_window_days,
                assistant_url,
                assistant_timeout_secs,
            } => Self {
                data_file,
                urgency_window_days,
                assistant_url,
                assistant_timeout_secs,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            data_file: config.data_file,
            urgency_window_days: config.urgency_window_days,
            assistant_url: config.assistant_url,
            assistant_timeout_secs: config.assistant_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\ndata_file = \"book.json\"\nurgency_window_days = 14\nassistant_url = \"https://assistant.example.com/generate\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.data_file(), "book.json");
        assert_eq!(config.urgency_window_days(), 14);
        assert_eq!(
            config.assistant_url.as_deref(),
            Some("https://assistant.example.com/generate")
        );
        assert_eq!(config.assistant_timeout_secs, 30);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nurgency_window_days = \"soon\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn load_or_default_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_or_default(tmp.path()), Config::default());
    }

    #[test]
    fn save_and_reload_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::default();
        config.assistant_url = Some("https://assistant.example.com".to_string());
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
