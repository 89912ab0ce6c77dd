//! Ошибки конфигурации и setup
//!
//! Runtime тик не возвращает ошибок: отсутствие цели, окклюзия и дистанция
//! это обычные входы state machine. Ошибки бывают только:
//! - ConfigError: при загрузке/валидации tuning файла
//! - SetupError: при инициализации компонента без обязательного коллаборатора

use bevy::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Обязательный коллаборатор отсутствует при инициализации
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("entity {0:?} has LocomotionController but no KinematicCharacterController")]
    MissingCharacterBody(Entity),

    #[error("entity {0:?} has ChaseController but no NavAgent")]
    MissingNavAgent(Entity),

    #[error("camera rig {rig:?} tracks missing target {target:?}")]
    MissingCameraTarget { rig: Entity, target: Entity },

    #[error("no Rapier context available for spatial queries")]
    MissingSpatialQuery,
}

/// Компонент-маркер: инициализация провалилась, entity больше не тикает
///
/// Ставится один раз setup системой. Все per-tick системы фильтруют
/// `Without<Disabled>`, поэтому операции против отсутствующего
/// коллаборатора никогда не выполняются.
#[derive(Component, Debug, Clone)]
pub struct Disabled {
    pub reason: SetupError,
}

impl Disabled {
    pub fn new(reason: SetupError) -> Self {
        Self { reason }
    }
}

/// Helper для setup систем: залогировать причину и повесить Disabled
pub(crate) fn disable(commands: &mut Commands, entity: Entity, reason: SetupError) {
    crate::log_error(&format!("Setup failed, {:?} disabled: {}", entity, reason));
    commands.entity(entity).insert(Disabled::new(reason));
}
