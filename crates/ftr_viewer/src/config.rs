use serde::Deserialize;
use std::fs;
use std::path::Path;

const SUPPORTED_VERSION: &str = "0.1";

#[derive(Debug, Deserialize, Clone)]
pub struct ViewerConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub scene: SceneSettings,
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: f64,
    #[serde(default = "default_clear_color")]
    pub clear_color: [f64; 4],
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Initial scene parameters.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SceneSettings {
    pub wheel_radius: f64,
    pub zoom: f32,
    pub ladder_steps: u32,
    pub show_panel: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            window: WindowSettings::default(),
            scene: SceneSettings::default(),
            tick_rate_hz: default_tick_rate(),
            clear_color: default_clear_color(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Fire Truck".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            wheel_radius: 0.2,
            zoom: 1.2,
            ladder_steps: 8,
            show_panel: true,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<ViewerConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read viewer config {}: {e}", path.display()))?;
    let config: ViewerConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse viewer config {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load the config, falling back to defaults when the file is absent or bad.
pub fn load_or_default(path: &Path) -> ViewerConfig {
    if !path.exists() {
        log::warn!(
            "Viewer config '{}' not found, using defaults.",
            path.display()
        );
        return ViewerConfig::default();
    }
    match load_config_from_path(path) {
        Ok(config) => {
            log::info!("Loaded viewer config '{}'", path.display());
            config
        }
        Err(err) => {
            log::error!("{err}; using defaults.");
            ViewerConfig::default()
        }
    }
}

fn validate_config(config: &ViewerConfig) -> Result<(), String> {
    if config.version != SUPPORTED_VERSION {
        return Err(format!(
            "Config validation failed: unsupported version '{}'",
            config.version
        ));
    }
    if config.window.width == 0 || config.window.height == 0 {
        return Err("Config validation failed: window size must be non-zero".to_string());
    }
    let scene = &config.scene;
    if !(0.1..=0.5).contains(&scene.wheel_radius) {
        return Err(format!(
            "Config validation failed: wheel_radius {} outside [0.1, 0.5]",
            scene.wheel_radius
        ));
    }
    if !(5..=20).contains(&scene.ladder_steps) {
        return Err(format!(
            "Config validation failed: ladder_steps {} outside [5, 20]",
            scene.ladder_steps
        ));
    }
    if scene.zoom <= 0.0 {
        return Err("Config validation failed: zoom must be > 0".to_string());
    }
    if config.tick_rate_hz <= 0.0 {
        return Err("Config validation failed: tick_rate_hz must be > 0".to_string());
    }
    Ok(())
}

fn default_version() -> String {
    SUPPORTED_VERSION.to_string()
}

const fn default_tick_rate() -> f64 {
    60.0
}

const fn default_clear_color() -> [f64; 4] {
    [0.1, 0.7, 1.0, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "ftr_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn load_str(name_hint: &str, json: &str) -> Result<ViewerConfig, String> {
        let path = temp_file_path(name_hint);
        fs::write(&path, json).expect("write temp file");
        let result = load_config_from_path(&path);
        let _ = fs::remove_file(path);
        result
    }

    #[test]
    fn parses_full_config() {
        let config = load_str(
            "full",
            r#"
            {
              "version": "0.1",
              "window": { "title": "Truck", "width": 800, "height": 600 },
              "scene": { "wheel_radius": 0.3, "zoom": 2.0, "ladder_steps": 12, "show_panel": false },
              "tick_rate_hz": 30,
              "clear_color": [0.0, 0.0, 0.0, 1.0]
            }
            "#,
        )
        .expect("should parse");

        assert_eq!(config.window.title, "Truck");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.scene.ladder_steps, 12);
        assert!(!config.scene.show_panel);
        assert!((config.scene.wheel_radius - 0.3).abs() < f64::EPSILON);
        assert!((config.tick_rate_hz - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.clear_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = load_str("partial", r#"{ "scene": { "ladder_steps": 10 } }"#)
            .expect("should parse");
        assert_eq!(config.version, "0.1");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.scene.ladder_steps, 10);
        assert!((config.scene.wheel_radius - 0.2).abs() < f64::EPSILON);
        assert!(config.scene.show_panel);
        assert_eq!(config.clear_color, [0.1, 0.7, 1.0, 1.0]);
    }

    #[test]
    fn rejects_bad_version() {
        let err = load_str("bad_version", r#"{ "version": "9.9" }"#)
            .expect_err("bad version should fail");
        assert!(err.contains("unsupported version"));
    }

    #[test]
    fn rejects_wheel_radius_out_of_range() {
        let err = load_str("radius", r#"{ "scene": { "wheel_radius": 0.8 } }"#)
            .expect_err("radius should fail");
        assert!(err.contains("wheel_radius"));
    }

    #[test]
    fn rejects_ladder_steps_out_of_range() {
        let err = load_str("steps", r#"{ "scene": { "ladder_steps": 3 } }"#)
            .expect_err("steps should fail");
        assert!(err.contains("ladder_steps"));
    }

    #[test]
    fn rejects_non_positive_tick_rate() {
        let err = load_str("tick", r#"{ "tick_rate_hz": 0 }"#).expect_err("tick should fail");
        assert!(err.contains("tick_rate_hz"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = load_str("malformed", "{ not json").expect_err("should fail");
        assert!(err.contains("Failed to parse"));
    }

    #[test]
    fn load_or_default_handles_missing_file() {
        let path = temp_file_path("missing");
        let config = load_or_default(&path);
        assert_eq!(config.scene, SceneSettings::default());
    }
}
