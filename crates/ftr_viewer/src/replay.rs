use crate::controls::{key_from_name, Action};
use crate::state::SceneState;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct KeyScript {
    pub steps: Vec<ScriptStep>,
}

/// One scripted key press and/or a run of animation ticks.
#[derive(Debug, Deserialize, Clone)]
pub struct ScriptStep {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub ticks: u32,
}

impl KeyScript {
    /// Apply the script to `scene`: each step presses its key `repeat` times,
    /// then advances `ticks` ticks.
    pub fn run(&self, scene: &mut SceneState) -> Result<(), String> {
        for (index, step) in self.steps.iter().enumerate() {
            if let Some(name) = &step.key {
                let key = key_from_name(name)
                    .ok_or_else(|| format!("Step {index}: unknown key '{name}'"))?;
                let action = Action::for_key(key)
                    .ok_or_else(|| format!("Step {index}: key '{name}' has no scene action"))?;
                for _ in 0..step.repeat.max(1) {
                    scene.apply(action);
                }
            }
            for _ in 0..step.ticks {
                scene.tick();
            }
        }
        Ok(())
    }
}

pub fn load_script_from_path(path: &Path) -> Result<KeyScript, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let script: KeyScript = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse key script JSON {}: {e}", path.display()))?;
    validate_script(&script)?;
    Ok(script)
}

fn validate_script(script: &KeyScript) -> Result<(), String> {
    if script.steps.is_empty() {
        return Err("Key script validation failed: steps list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blinker::IDLE_COLOR;
    use crate::scene::build_scene;
    use crate::state::CAR_X_LIMIT;
    use ftr_core::RenderMode;
    use ftr_render::ViewKind;
    use std::f32::consts::PI;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "ftr_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn script(json: &str) -> KeyScript {
        serde_json::from_str(json).expect("valid script")
    }

    #[test]
    fn drive_right_until_clamped() {
        let mut scene = SceneState::default();
        script(r#"{ "steps": [ { "key": "d", "repeat": 50 } ] }"#)
            .run(&mut scene)
            .expect("script runs");

        let per_press = 0.01 / (2.0 * PI * 0.2) * 360.0;
        assert_eq!(scene.car.position.x, CAR_X_LIMIT);
        assert!((scene.car.wheel_rotation + 50.0 * per_press).abs() < 1e-2);
    }

    #[test]
    fn blinkers_settle_after_one_hundred_ticks() {
        let mut scene = SceneState::default();
        script(r#"{ "steps": [ { "key": "l", "ticks": 100 } ] }"#)
            .run(&mut scene)
            .expect("script runs");

        for blinker in &scene.blinkers {
            assert!(!blinker.blinking);
            assert_eq!(blinker.blink_count, 0);
            assert_eq!(blinker.color, IDLE_COLOR);
        }
    }

    #[test]
    fn view_and_mode_keys() {
        let mut scene = SceneState::default();
        script(
            r#"{ "steps": [
                { "key": "0" },
                { "key": "2" },
                { "key": " " },
                { "key": "ArrowUp", "repeat": 3 },
                { "key": "r" }
            ] }"#,
        )
        .run(&mut scene)
        .expect("script runs");

        assert!(!scene.camera.is_quad());
        assert_eq!(scene.camera.active(), ViewKind::Left);
        assert_eq!(scene.render_mode, RenderMode::Wireframe);
        assert_eq!(scene.camera.gamma(), 25.0);
    }

    #[test]
    fn long_session_keeps_scene_buildable() {
        let mut scene = SceneState::default();
        script(
            r#"{ "steps": [
                { "key": "i", "repeat": 40 },
                { "key": "o", "repeat": 60 },
                { "key": "k", "repeat": 45 },
                { "key": "w", "repeat": 30 },
                { "key": "m", "repeat": 30 },
                { "key": "q", "repeat": 7 },
                { "key": "l", "ticks": 35 },
                { "key": "a", "repeat": 80 }
            ] }"#,
        )
        .run(&mut scene)
        .expect("script runs");

        assert_eq!(scene.ladder.angle, -90.0);
        assert_eq!(scene.ladder.steps, 20);
        assert!(scene.ladder.extension <= 2.9 * scene.metrics.wheel_radius + 1e-5);
        assert_eq!(scene.car.position.x, -CAR_X_LIMIT);
        assert_eq!(scene.blinkers_active(), 4);
        assert_eq!(build_scene(&scene).len(), 800 + 130 + 4 * 20);
    }

    #[test]
    fn escape_is_rejected_in_scripts() {
        let mut scene = SceneState::default();
        let err = script(r#"{ "steps": [ { "key": "Escape" } ] }"#)
            .run(&mut scene)
            .expect_err("escape has no scene action");
        assert!(err.contains("no scene action"));
    }

    #[test]
    fn unknown_key_is_reported() {
        let mut scene = SceneState::default();
        let err = script(r#"{ "steps": [ { "key": "F13" } ] }"#)
            .run(&mut scene)
            .expect_err("unknown key");
        assert!(err.contains("unknown key 'F13'"));
    }

    #[test]
    fn script_file_round_trip() {
        let path = temp_file_path("file");
        fs::write(
            &path,
            r#"{ "steps": [ { "key": "p", "repeat": 3 }, { "key": "n", "repeat": 10 } ] }"#,
        )
        .expect("write temp script");
        let loaded = load_script_from_path(&path);
        let _ = fs::remove_file(&path);

        let mut scene = SceneState::default();
        loaded
            .expect("script should load")
            .run(&mut scene)
            .expect("script runs");
        assert_eq!(scene.ladder.extension, 0.0);
        assert_eq!(scene.ladder.steps, 5);
    }

    #[test]
    fn empty_script_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "steps": [] }"#).expect("write temp script");
        let result = load_script_from_path(&path);
        let _ = fs::remove_file(&path);
        let err = result.expect_err("empty script should fail");
        assert!(err.contains("steps list is empty"));
    }
}
