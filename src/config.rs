//! Demo configuration.
//!
//! Settings are read from a JSON file. Every field is optional and falls back to the values
//! in the [`Default`] implementations, so an empty object `{}` is a valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Name of the configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "hello-gl.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub clear_color: [f32; 4],
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            assets: AssetConfig::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
    /// Creates the window without showing it.
    pub hidden: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "opengl-demo".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
            hidden: false,
        }
    }
}

/// Locations of shader sources and textures. Relative paths are resolved against `root`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub root: PathBuf,
    pub cube_vertex: PathBuf,
    pub cube_fragment: PathBuf,
    pub light_vertex: PathBuf,
    pub light_fragment: PathBuf,
    pub texture: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            cube_vertex: PathBuf::from("shaders/cube/vert.glsl"),
            cube_fragment: PathBuf::from("shaders/cube/frag.glsl"),
            light_vertex: PathBuf::from("shaders/light/vert.glsl"),
            light_fragment: PathBuf::from("shaders/light/frag.glsl"),
            texture: PathBuf::from("textures/checker.png"),
        }
    }
}

impl AssetConfig {
    /// Resolves an asset path against the asset root. Absolute paths are returned unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// Also append log lines to this file.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }

    /// Reads and parses the configuration file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        Self::from_json(&text).map_err(|e| format!("Invalid config {}: {e}", path.display()))
    }

    /// Loads the configuration.
    ///
    /// An explicitly given path must exist. Otherwise the first existing file of
    /// [`Config::search_paths`] is used, falling back to the defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), String> {
        Self::load_from(explicit, &Self::search_paths())
    }

    /// Like [`Config::load`], but searching `candidates` instead of the default locations.
    pub fn load_from(
        explicit: Option<&Path>,
        candidates: &[PathBuf],
    ) -> Result<(Self, Option<PathBuf>), String> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => Ok((Self::from_file(path)?, Some(path.clone()))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Candidate configuration files, in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("hello-gl").join("config.json"));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.window.title, "opengl-demo");
        assert_eq!((config.window.width, config.window.height), (800, 600));
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_json(
            r#"{
                "window": { "width": 1280, "hidden": true },
                "clear_color": [0.0, 0.0, 0.0, 1.0],
                "log": { "level": "debug", "file": "demo.log" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 600);
        assert!(config.window.hidden);
        assert!(config.window.vsync);
        assert_eq!(config.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, Some(PathBuf::from("demo.log")));
        assert_eq!(config.assets, AssetConfig::default());
    }

    #[test]
    fn test_malformed_config() {
        assert!(Config::from_json("{ \"window\": ").is_err());
        assert!(Config::from_json("{ \"window\": { \"width\": -3 } }").is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let path = std::env::temp_dir().join("hello-gl-test-missing-config.json");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.contains("Failed to read config"));
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hello-gl-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_no_candidate_uses_defaults() {
        let dir = scratch_dir("no-candidate");
        let candidates = [dir.join("first.json"), dir.join("second.json")];
        let (config, found) = Config::load_from(None, &candidates).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(found, None);
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = scratch_dir("second-candidate");
        let candidates = [
            dir.join("first.json"),
            dir.join("second.json"),
            dir.join("third.json"),
        ];
        std::fs::write(&candidates[1], r#"{ "window": { "title": "second" } }"#).unwrap();
        std::fs::write(&candidates[2], r#"{ "window": { "title": "third" } }"#).unwrap();
        let (config, found) = Config::load_from(None, &candidates).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(config.window.title, "second");
        assert_eq!(found, Some(candidates[1].clone()));
    }

    #[test]
    fn test_malformed_candidate_is_an_error() {
        let dir = scratch_dir("malformed-candidate");
        let candidates = [dir.join("config.json")];
        std::fs::write(&candidates[0], "{ \"clear_color\": [1.0, ").unwrap();
        let result = Config::load_from(None, &candidates);
        std::fs::remove_dir_all(&dir).unwrap();
        let err = result.unwrap_err();
        assert!(err.starts_with("Invalid config"));
    }

    #[test]
    fn test_resolve_asset_paths() {
        let assets = AssetConfig::default();
        assert_eq!(
            assets.resolve(&assets.cube_vertex),
            PathBuf::from("assets/shaders/cube/vert.glsl")
        );
        let absolute = std::env::temp_dir().join("tex.png");
        assert_eq!(assets.resolve(&absolute), absolute);
    }
}
