use std::path::PathBuf;

use crate::error::ConfigError;

/// Application configuration loaded from environment variables.
///
/// | Env Var              | Default                          |
/// |----------------------|----------------------------------|
/// | `VSL_DATA_DIR`       | `./vsl-data`                     |
/// | `VSL_PLAYER_ORIGIN`  | `https://meu-vsl-app.vercel.app` |
/// | `VSL_WINDOW_WIDTH`   | `1280`                           |
/// | `VSL_WINDOW_HEIGHT`  | `800`                            |
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the key-value storage files.
    pub data_dir: PathBuf,
    /// Origin the embed snippets point their iframe at.
    pub player_origin: String,
    pub window_size: (f32, f32),
}

const DEFAULT_DATA_DIR: &str = "./vsl-data";
const DEFAULT_PLAYER_ORIGIN: &str = "https://meu-vsl-app.vercel.app";

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("VSL_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.into());

        let player_origin = lookup("VSL_PLAYER_ORIGIN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER_ORIGIN.into());
        if !(player_origin.starts_with("http://") || player_origin.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "VSL_PLAYER_ORIGIN",
                reason: format!("expected an http(s) origin, got {player_origin:?}"),
            });
        }

        let width = parse_dimension(&lookup, "VSL_WINDOW_WIDTH", 1280.0)?;
        let height = parse_dimension(&lookup, "VSL_WINDOW_HEIGHT", 800.0)?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            player_origin,
            window_size: (width, height),
        })
    }
}

fn parse_dimension(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: f32,
) -> Result<f32, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value: f32 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        reason: format!("{raw:?} is not a number"),
    })?;
    if !value.is_finite() || value < 200.0 {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("{value} is below the 200px minimum"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./vsl-data"));
        assert_eq!(config.player_origin, "https://meu-vsl-app.vercel.app");
        assert_eq!(config.window_size, (1280.0, 800.0));
    }

    #[test]
    fn test_reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("VSL_DATA_DIR", "/var/lib/vsl"),
            ("VSL_PLAYER_ORIGIN", " http://localhost:5173 "),
            ("VSL_WINDOW_WIDTH", "1600"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/vsl"));
        assert_eq!(config.player_origin, "http://localhost:5173");
        assert_eq!(config.window_size, (1600.0, 800.0));
    }

    #[test]
    fn test_rejects_non_http_origin() {
        let result = AppConfig::from_lookup(lookup_from(&[("VSL_PLAYER_ORIGIN", "ftp://x")]));
        assert_matches!(
            result,
            Err(ConfigError::Invalid {
                key: "VSL_PLAYER_ORIGIN",
                ..
            })
        );
    }

    #[test]
    fn test_rejects_bad_window_size() {
        let result = AppConfig::from_lookup(lookup_from(&[("VSL_WINDOW_HEIGHT", "tall")]));
        assert_matches!(
            result,
            Err(ConfigError::Invalid {
                key: "VSL_WINDOW_HEIGHT",
                ..
            })
        );

        let result = AppConfig::from_lookup(lookup_from(&[("VSL_WINDOW_WIDTH", "10")]));
        assert_matches!(result, Err(ConfigError::Invalid { .. }));
    }
}
