//! Spatial query service (ray cast, sphere cast).
//!
//! Ядро использует только трейт `SpatialQuery`; Rapier: одна из реализаций.
//! Запросы синхронные: результат готов до возврата из `advance`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Ближайшее препятствие вдоль луча/свипа
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Collider entity который был задет
    pub entity: Entity,
    /// Точка контакта на поверхности препятствия (world space)
    pub point: Vec3,
    /// Нормаль поверхности в точке контакта
    pub normal: Vec3,
    /// Дистанция от origin вдоль direction
    pub distance: f32,
}

/// Layer filter + self-exclusion для одного запроса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeFilter {
    /// Битовая маска слоёв (см. collision_groups)
    pub groups: u32,
    /// Collider который запрос игнорирует (обычно собственный)
    pub exclude: Option<Entity>,
}

impl ProbeFilter {
    pub fn new(groups: u32) -> Self {
        Self {
            groups,
            exclude: None,
        }
    }

    pub fn excluding(mut self, entity: Option<Entity>) -> Self {
        self.exclude = entity;
        self
    }
}

pub trait SpatialQuery {
    /// `direction` должен быть нормализован.
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: ProbeFilter,
    ) -> Option<ProbeHit>;

    /// Sweep сферы радиуса `radius` из `origin` вдоль `direction`.
    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        filter: ProbeFilter,
    ) -> Option<ProbeHit>;

    /// Принадлежит ли задетый collider `root` (сам root или его потомок).
    fn belongs_to(&self, hit: Entity, root: Entity) -> bool {
        hit == root
    }
}

/// Rapier реализация поверх query pipeline
///
/// `parent_of` используется для `belongs_to`: коллайдер цели может висеть
/// на дочерней entity (hitbox, part of the rig). Обычно это
/// `|e| parents.get(e).ok().map(ChildOf::parent)` над `Query<&ChildOf>`.
pub struct RapierSpatialQuery<'a> {
    context: &'a RapierContext<'a>,
    parent_of: &'a dyn Fn(Entity) -> Option<Entity>,
}

impl<'a> RapierSpatialQuery<'a> {
    pub fn new(
        context: &'a RapierContext<'a>,
        parent_of: &'a dyn Fn(Entity) -> Option<Entity>,
    ) -> Self {
        Self { context, parent_of }
    }
}

fn rapier_filter(filter: ProbeFilter) -> QueryFilter<'static> {
    let mut query = QueryFilter::default().exclude_sensors().groups(CollisionGroups::new(
        Group::ALL,
        Group::from_bits_truncate(filter.groups),
    ));
    if let Some(entity) = filter.exclude {
        query = query.exclude_collider(entity).exclude_rigid_body(entity);
    }
    query
}

impl SpatialQuery for RapierSpatialQuery<'_> {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: ProbeFilter,
    ) -> Option<ProbeHit> {
        let (entity, hit) = self.context.cast_ray_and_get_normal(
            origin,
            direction,
            max_distance,
            true,
            rapier_filter(filter),
        )?;

        Some(ProbeHit {
            entity,
            point: hit.point,
            normal: hit.normal,
            distance: hit.time_of_impact,
        })
    }

    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        filter: ProbeFilter,
    ) -> Option<ProbeHit> {
        let shape = Collider::ball(radius);
        let options = ShapeCastOptions {
            max_time_of_impact: max_distance,
            target_distance: 0.0,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: true,
        };

        let (entity, hit) = self.context.cast_shape(
            origin,
            Quat::IDENTITY,
            direction,
            &shape,
            options,
            rapier_filter(filter),
        )?;

        // Без деталей контакта: точка на передней кромке сферы
        let (point, normal) = match hit.details {
            Some(details) => (details.witness1, details.normal1),
            None => (
                origin + direction * (hit.time_of_impact + radius),
                -direction,
            ),
        };

        Some(ProbeHit {
            entity,
            point,
            normal,
            distance: hit.time_of_impact,
        })
    }

    fn belongs_to(&self, hit: Entity, root: Entity) -> bool {
        let mut current = hit;
        loop {
            if current == root {
                return true;
            }
            match (self.parent_of)(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}
