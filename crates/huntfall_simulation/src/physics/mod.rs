//! Physics collaborators
//!
//! Ядро не владеет physics world: оно спрашивает и командует через узкие трейты.
//! - query: SpatialQuery (ray cast, sphere cast) + Rapier адаптер
//! - character: CharacterBody (ground test, move primitive) + Rapier KCC адаптер
//! - collision_groups: слои Rapier для актёров/окружения и маски запросов

pub mod character;
pub mod collision_groups;
pub mod query;

pub use character::{CharacterBody, RapierCharacterBody};
pub use collision_groups::*;
pub use query::{ProbeFilter, ProbeHit, RapierSpatialQuery, SpatialQuery};
