use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub log_level: Option<String>,
    pub history_file: Option<String>,
    pub script: Option<String>,

    // Feature configs
    pub popularity: Option<PopularityConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct PopularityConfig {
    pub no_artists_message: Option<String>,
    pub no_liked_artist_message: Option<String>,
    pub no_songs_message: Option<String>,
    pub no_liked_song_message: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_file() {
        let content = r#"
            log_level = "debug"
            history_file = "/tmp/catalog_history"
            script = "seed.txt"

            [popularity]
            no_artists_message = "No artists yet"
            no_liked_song_message = "Nobody likes anything"
        "#;
        let config: FileConfig = toml::from_str(content).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.history_file.as_deref(), Some("/tmp/catalog_history"));
        assert_eq!(config.script.as_deref(), Some("seed.txt"));
        let popularity = config.popularity.unwrap();
        assert_eq!(
            popularity.no_artists_message.as_deref(),
            Some("No artists yet")
        );
        assert_eq!(
            popularity.no_liked_song_message.as_deref(),
            Some("Nobody likes anything")
        );
        assert!(popularity.no_songs_message.is_none());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.log_level.is_none());
        assert!(config.popularity.is_none());
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"info\"").unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = [").unwrap();

        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
