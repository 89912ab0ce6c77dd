//! Tests for chase AI components.

#[cfg(test)]
mod tests {
    use super::super::chase::{ChaseConfig, ChaseMode, ChaseState, ChaseTarget};
    use crate::physics::MASK_SIGHT;

    #[test]
    fn test_chase_state_default() {
        let state = ChaseState::default();
        assert_eq!(state.mode, ChaseMode::Idle);
        assert_eq!(state.last_seen_time, f32::NEG_INFINITY);
        assert!(state.is_alive);
        assert!(!state.was_moving);
    }

    #[test]
    fn test_chase_config_default() {
        let config = ChaseConfig::default();
        assert_eq!(config.detect_radius, 12.0);
        assert_eq!(config.fov_degrees, 120.0);
        assert_eq!(config.lose_sight_time, 2.0);
        assert_eq!(config.attack_range, 1.8);
        assert_eq!(config.repath_interval, 0.1);
        assert_eq!(config.sight_groups, MASK_SIGHT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_chase_config_rejects_bad_fov() {
        let config = ChaseConfig {
            fov_degrees: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ChaseConfig {
            detect_radius: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_never_seen_is_always_lost() {
        let state = ChaseState::default();
        // now − (−inf) = +inf > lose_sight_time
        assert!(10.0 - state.last_seen_time > ChaseConfig::default().lose_sight_time);
    }

    #[test]
    fn test_chase_target_default_is_empty() {
        assert_eq!(ChaseTarget::default().entity, None);
    }
}
