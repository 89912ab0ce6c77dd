//! Shared domain: cross-cutting типы
//!
//! Содержит:
//! - EventQueue (outbox каждого контроллера, дренируется раз в тик)
//! - KillRequest (вход от внешнего combat resolution)
//! - steering math (move_towards, yaw_toward, smoothing factors)

pub mod events;
pub mod steering;


pub use events::*;
pub use steering::*;
