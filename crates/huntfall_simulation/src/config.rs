//! Tuning всех трёх подсистем (load-time, JSON)
//!
//! Отсутствующие поля берут значения по умолчанию (`#[serde(default)]`),
//! после парсинга конфиг валидируется. Загрузчик никогда не паникует.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ai::ChaseConfig;
use crate::camera::CameraConfig;
use crate::error::ConfigError;
use crate::locomotion::LocomotionConfig;

/// Resource: tuning, из которого spawn helpers собирают контроллеры
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct AgentTuning {
    pub locomotion: LocomotionConfig,
    pub camera: CameraConfig,
    pub chase: ChaseConfig,
}

impl AgentTuning {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locomotion.validate()?;
        self.camera.validate()?;
        self.chase.validate()
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let tuning = AgentTuning::from_json_str("{}").unwrap();
        assert_eq!(tuning, AgentTuning::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let tuning = AgentTuning::from_json_str(
            r#"{ "locomotion": { "jump_height": 2.0 }, "chase": { "detect_radius": 20.0 } }"#,
        )
        .unwrap();

        assert_eq!(tuning.locomotion.jump_height, 2.0);
        assert_eq!(tuning.locomotion.walk_speed, 5.0);
        assert_eq!(tuning.chase.detect_radius, 20.0);
        assert_eq!(tuning.chase.attack_range, 1.8);
        assert_eq!(tuning.camera, CameraConfig::default());
    }

    #[test]
    fn test_pretty_json_reloads() {
        let mut tuning = AgentTuning::default();
        tuning.camera.max_distance = 9.0;

        let json = tuning.to_json_pretty().unwrap();
        assert_eq!(AgentTuning::from_json_str(&json).unwrap(), tuning);
    }

    #[test]
    fn test_parse_error() {
        let error = AgentTuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_names_field() {
        let error =
            AgentTuning::from_json_str(r#"{ "camera": { "min_distance": 3.0, "max_distance": 1.0 } }"#)
                .unwrap_err();

        match error {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "camera.max_distance"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = AgentTuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }
}
