use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::Error;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Mood Stone".to_string(),
            width: 1000.0,
            height: 700.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Redraw interval in milliseconds. 40ms is roughly 25 frames per second.
    pub tick_ms: u64,
    /// Upper bound on the frame delta fed to one tick, in nominal frames.
    pub max_frame_delta: f32,
    /// Fixed RNG seed, mostly for reproducible screenshots.
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 40,
            max_frame_delta: 4.0,
            seed: None,
        }
    }
}

impl AnimationConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Converts wall-clock time into nominal frames, clamped to `max_frame_delta`.
    pub fn frames(&self, elapsed: Duration) -> f32 {
        let frames = elapsed.as_secs_f32() / self.tick().as_secs_f32();
        frames.clamp(0.0, self.max_frame_delta.max(0.0))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub directory: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Loads the TOML file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Config, Error> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
                Config::parse(&text)
            }
            None => Ok(Config::default()),
        }
    }

    pub fn parse(text: &str) -> Result<Config, Error> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.window.width, 1000.0);
        assert_eq!(config.window.height, 700.0);
        assert_eq!(config.animation.tick_ms, 40);
        assert_eq!(config.animation.seed, None);
        assert_eq!(config.snapshot.directory, PathBuf::from("."));
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            r#"
            [animation]
            seed = 7

            [snapshot]
            directory = "shots"
            "#,
        )
        .unwrap();
        assert_eq!(config.animation.seed, Some(7));
        assert_eq!(config.animation.tick_ms, 40);
        assert_eq!(config.snapshot.directory, PathBuf::from("shots"));
        assert_eq!(config.window.title, "Mood Stone");
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            Config::parse("[window]\nwidth = \"wide\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = 640.0\nheight = 480.0").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.window.width, 640.0);
        assert_eq!(config.window.height, 480.0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_frames() {
        let animation = AnimationConfig::default();
        assert!((animation.frames(Duration::from_millis(40)) - 1.0).abs() < 1e-5);
        assert!((animation.frames(Duration::from_millis(20)) - 0.5).abs() < 1e-5);
        assert_eq!(animation.frames(Duration::from_secs(10)), 4.0);
    }
}
