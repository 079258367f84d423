mod file_config;

pub use file_config::{FileConfig, PopularityConfig};

use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub log_level: Option<String>,
    pub history_file: Option<PathBuf>,
    pub script: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: LevelFilter,
    pub history_file: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub popularity: PopularitySettings,
}

/// Messages returned by the most-popular queries when there is no winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularitySettings {
    /// Returned when there are no artists at all.
    pub no_artists_message: String,
    /// Returned when no artist has any like.
    pub no_liked_artist_message: String,
    /// Returned when there are no songs at all.
    pub no_songs_message: String,
    /// Returned when no song has any like.
    pub no_liked_song_message: String,
}

impl Default for PopularitySettings {
    fn default() -> Self {
        Self {
            no_artists_message: "Artist not found!!".to_owned(),
            no_liked_artist_message: "No artist with likes found!".to_owned(),
            no_songs_message: "Song not found!!".to_owned(),
            no_liked_song_message: "No song with likes found!".to_owned(),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let log_level_str = file
            .log_level
            .or_else(|| cli.log_level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned());
        let log_level = match parse_log_level(&log_level_str) {
            Some(level) => level,
            None => bail!("Invalid log level: {}", log_level_str),
        };

        let history_file = file
            .history_file
            .map(PathBuf::from)
            .or_else(|| cli.history_file.clone());

        let script = file
            .script
            .map(PathBuf::from)
            .or_else(|| cli.script.clone());
        if let Some(script) = &script {
            if !script.is_file() {
                bail!("Script file does not exist: {:?}", script);
            }
        }

        // Popularity messages - merge file config with defaults
        let defaults = PopularitySettings::default();
        let popularity_file = file.popularity.unwrap_or_default();
        let popularity = PopularitySettings {
            no_artists_message: popularity_file
                .no_artists_message
                .unwrap_or(defaults.no_artists_message),
            no_liked_artist_message: popularity_file
                .no_liked_artist_message
                .unwrap_or(defaults.no_liked_artist_message),
            no_songs_message: popularity_file
                .no_songs_message
                .unwrap_or(defaults.no_songs_message),
            no_liked_song_message: popularity_file
                .no_liked_song_message
                .unwrap_or(defaults.no_liked_song_message),
        };

        Ok(Self {
            log_level,
            history_file,
            script,
            popularity,
        })
    }
}

/// Parses a log level name, case insensitively.
fn parse_log_level(s: &str) -> Option<LevelFilter> {
    s.trim().parse::<LevelFilter>().ok()
}
