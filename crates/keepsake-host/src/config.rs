//! Host configuration, read from the environment.

use std::path::PathBuf;

use keepsake_media::MediaAssets;

use crate::error::AppError;

/// Asset root used when `KEEPSAKE_ASSET_ROOT` is unset.
pub const DEFAULT_ASSET_ROOT: &str = "public";
/// Text width used when `KEEPSAKE_RENDER_WIDTH` is unset.
pub const DEFAULT_RENDER_WIDTH: usize = 48;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable lines.
    Pretty,
}

/// Everything the host needs to start.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Resolved media asset locations.
    pub assets: MediaAssets,
    /// Log output format.
    pub log_format: LogFormat,
    /// Width of rendered scene text.
    pub render_width: usize,
}

impl HostConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of an
    /// environment variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let root = lookup("KEEPSAKE_ASSET_ROOT").unwrap_or_else(|| DEFAULT_ASSET_ROOT.to_owned());
        let defaults = MediaAssets::default();
        let assets = MediaAssets {
            ambient: lookup("KEEPSAKE_AMBIENT_TRACK").map_or(defaults.ambient, PathBuf::from),
            climax: lookup("KEEPSAKE_CLIMAX_TRACK").map_or(defaults.climax, PathBuf::from),
            video: lookup("KEEPSAKE_VIDEO").map_or(defaults.video, PathBuf::from),
        }
        .rooted_at(&PathBuf::from(root));

        let log_format = match lookup("KEEPSAKE_LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "KEEPSAKE_LOG_FORMAT must be `json` or `pretty`, got `{other}`"
                )));
            }
        };

        let render_width = match lookup("KEEPSAKE_RENDER_WIDTH") {
            None => DEFAULT_RENDER_WIDTH,
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("KEEPSAKE_RENDER_WIDTH must be a valid usize: {e}"))
            })?,
        };

        Ok(Self {
            assets,
            log_format,
            render_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = HostConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.render_width, DEFAULT_RENDER_WIDTH);
        assert_eq!(
            config.assets.ambient,
            PathBuf::from("public/audio/background_song.mp3")
        );
        assert_eq!(config.assets.video, PathBuf::from("public/videos/birthday_video.mp4"));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = HostConfig::from_lookup(lookup_from(&[
            ("KEEPSAKE_ASSET_ROOT", "/srv/keepsake"),
            ("KEEPSAKE_CLIMAX_TRACK", "audio/happy_birthday.mp3"),
            ("KEEPSAKE_LOG_FORMAT", "pretty"),
            ("KEEPSAKE_RENDER_WIDTH", "72"),
        ]))
        .unwrap();

        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.render_width, 72);
        assert_eq!(
            config.assets.climax,
            PathBuf::from("/srv/keepsake/audio/happy_birthday.mp3")
        );
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let bad_format = HostConfig::from_lookup(lookup_from(&[("KEEPSAKE_LOG_FORMAT", "xml")]));
        let bad_width = HostConfig::from_lookup(lookup_from(&[("KEEPSAKE_RENDER_WIDTH", "wide")]));

        assert!(matches!(bad_format, Err(AppError::Config(_))));
        assert!(matches!(bad_width, Err(AppError::Config(msg)) if msg.contains("RENDER_WIDTH")));
    }
}
