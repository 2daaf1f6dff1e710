//! The sensor scene: collider registry plus non-allocating queries
//!
//! All intersection math is delegated to parry3d (ray casts, time-of-impact
//! shape casts, intersection tests). The scene's own job is parameter
//! plumbing: walk the registry, apply the query filter, call the engine,
//! and write results into the caller's buffer.
//!
//! Every query follows the non-allocating contract: the caller supplies the
//! output slice, at most `out.len()` records are written, and the return
//! value is the number written. A single-element buffer selects the closest
//! hit across all colliders; larger buffers fill in scan order, unordered,
//! until full.

use log::{debug, warn};
use parry3d::query::{self, Ray, RayCast as _, TOIStatus, TOI};
use parry3d::shape::{Ball, Capsule, Cuboid, FeatureId, Shape};
use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::{Iso3, Point3, Quat, Translation3, Vec3};

use super::collider::Collider;
use super::filter::QueryFilter;
use super::hit::SensorHit;

new_key_type! {
    /// Generational key identifying a collider in a [`SensorScene`]
    pub struct ColliderKey;
}

/// Scene-wide query defaults
#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    /// Whether queries report trigger colliders when the filter says
    /// [`TriggerInteraction::UseGlobal`](super::filter::TriggerInteraction::UseGlobal)
    pub queries_hit_triggers: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            queries_hit_triggers: true,
        }
    }
}

/// The collider registry sensors run their queries against
pub struct SensorScene {
    colliders: SlotMap<ColliderKey, Collider>,
    config: SceneConfig,
}

impl Default for SensorScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorScene {
    /// Create an empty scene with default configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create an empty scene with custom configuration
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            colliders: SlotMap::with_key(),
            config,
        }
    }

    /// Scene configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Mutable scene configuration
    pub fn config_mut(&mut self) -> &mut SceneConfig {
        &mut self.config
    }

    /// Register a collider and return its key
    pub fn add_collider(&mut self, collider: Collider) -> ColliderKey {
        debug!("registering collider '{}'", collider.display_name());
        self.colliders.insert(collider)
    }

    /// Remove a collider, returning it if it was registered
    pub fn remove_collider(&mut self, key: ColliderKey) -> Option<Collider> {
        self.colliders.remove(key)
    }

    /// Get a collider by key
    pub fn collider(&self, key: ColliderKey) -> Option<&Collider> {
        self.colliders.get(key)
    }

    /// Get a mutable collider by key
    pub fn collider_mut(&mut self, key: ColliderKey) -> Option<&mut Collider> {
        self.colliders.get_mut(key)
    }

    /// Number of registered colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// True when no colliders are registered
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterate over all collider keys
    pub fn collider_keys(&self) -> impl Iterator<Item = ColliderKey> + '_ {
        self.colliders.keys()
    }

    /// Cast a ray and collect hits into `hits`
    ///
    /// The ray direction should be normalized so reported distances are in
    /// world units. Triangle-mesh hits carry the struck triangle index.
    pub fn cast_ray(
        &self,
        ray: &Ray,
        max_distance: f32,
        filter: &QueryFilter,
        hits: &mut [SensorHit],
    ) -> usize {
        if hits.is_empty() {
            return 0;
        }

        let max_toi = finite_range(max_distance);
        let closest_only = hits.len() == 1;
        let mut count = 0;
        let mut closest = f32::MAX;

        for (key, collider) in &self.colliders {
            if !filter.allows(collider, self.config.queries_hit_triggers) {
                continue;
            }

            let Some(intersection) =
                collider.shape.cast_ray_and_get_normal(&collider.pose, ray, max_toi, true)
            else {
                continue;
            };

            let hit = SensorHit {
                collider: key,
                distance: intersection.toi,
                point: ray.point_at(intersection.toi),
                normal: intersection.normal,
                triangle_index: triangle_index_of(collider, intersection.feature),
            };

            if closest_only {
                if hit.distance < closest {
                    closest = hit.distance;
                    hits[0] = hit;
                    count = 1;
                }
            } else {
                hits[count] = hit;
                count += 1;
                if count == hits.len() {
                    break;
                }
            }
        }

        count
    }

    /// Sweep a sphere from `origin` along `dir` and collect hits
    pub fn cast_sphere(
        &self,
        origin: Point3,
        radius: f32,
        dir: &Vec3,
        max_distance: f32,
        filter: &QueryFilter,
        hits: &mut [SensorHit],
    ) -> usize {
        let pose = Iso3::from_parts(Translation3::from(origin.coords), Quat::identity());
        self.cast_shape(&pose, &Ball::new(radius), dir, max_distance, filter, hits)
    }

    /// Sweep a capsule spanning the world-space segment `p1`-`p2`
    pub fn cast_capsule(
        &self,
        p1: Point3,
        p2: Point3,
        radius: f32,
        dir: &Vec3,
        max_distance: f32,
        filter: &QueryFilter,
        hits: &mut [SensorHit],
    ) -> usize {
        let capsule = Capsule::new(p1, p2, radius);
        self.cast_shape(&Iso3::identity(), &capsule, dir, max_distance, filter, hits)
    }

    /// Sweep an oriented box from `origin` along `dir` and collect hits
    pub fn cast_box(
        &self,
        origin: Point3,
        rotation: Quat,
        half_extents: Vec3,
        dir: &Vec3,
        max_distance: f32,
        filter: &QueryFilter,
        hits: &mut [SensorHit],
    ) -> usize {
        let pose = Iso3::from_parts(Translation3::from(origin.coords), rotation);
        let cuboid = Cuboid::new(half_extents);
        self.cast_shape(&pose, &cuboid, dir, max_distance, filter, hits)
    }

    /// Collect colliders intersecting a sphere volume
    pub fn overlap_sphere(
        &self,
        center: Point3,
        radius: f32,
        filter: &QueryFilter,
        out: &mut [ColliderKey],
    ) -> usize {
        let pose = Iso3::from_parts(Translation3::from(center.coords), Quat::identity());
        self.overlap_shape(&pose, &Ball::new(radius), filter, out)
    }

    /// Collect colliders intersecting a capsule volume
    pub fn overlap_capsule(
        &self,
        p1: Point3,
        p2: Point3,
        radius: f32,
        filter: &QueryFilter,
        out: &mut [ColliderKey],
    ) -> usize {
        let capsule = Capsule::new(p1, p2, radius);
        self.overlap_shape(&Iso3::identity(), &capsule, filter, out)
    }

    /// Collect colliders intersecting an oriented box volume
    pub fn overlap_box(
        &self,
        center: Point3,
        rotation: Quat,
        half_extents: Vec3,
        filter: &QueryFilter,
        out: &mut [ColliderKey],
    ) -> usize {
        let pose = Iso3::from_parts(Translation3::from(center.coords), rotation);
        let cuboid = Cuboid::new(half_extents);
        self.overlap_shape(&pose, &cuboid, filter, out)
    }

    /// Shared sweep path for all shape casts
    ///
    /// The swept shape moves with velocity `dir` while colliders stand
    /// still; the engine's time-of-impact query resolves contact data. A
    /// cast that starts penetrating reports distance 0.
    fn cast_shape(
        &self,
        pose: &Iso3,
        shape: &dyn Shape,
        dir: &Vec3,
        max_distance: f32,
        filter: &QueryFilter,
        hits: &mut [SensorHit],
    ) -> usize {
        if hits.is_empty() {
            return 0;
        }

        let max_toi = finite_range(max_distance);
        let closest_only = hits.len() == 1;
        let mut count = 0;
        let mut closest = f32::MAX;

        for (key, collider) in &self.colliders {
            if !filter.allows(collider, self.config.queries_hit_triggers) {
                continue;
            }

            let impact = query::time_of_impact(
                pose,
                dir,
                shape,
                &collider.pose,
                &Vec3::zeros(),
                &*collider.shape,
                max_toi,
                true,
            );

            let hit = match impact {
                Ok(Some(toi)) => shape_cast_hit(key, collider, &toi),
                Ok(None) => continue,
                Err(unsupported) => {
                    warn!(
                        "unsupported shape-cast pair against '{}': {unsupported}",
                        collider.display_name()
                    );
                    continue;
                }
            };

            if closest_only {
                if hit.distance < closest {
                    closest = hit.distance;
                    hits[0] = hit;
                    count = 1;
                }
            } else {
                hits[count] = hit;
                count += 1;
                if count == hits.len() {
                    break;
                }
            }
        }

        count
    }

    /// Shared intersection path for all volume overlaps
    fn overlap_shape(
        &self,
        pose: &Iso3,
        shape: &dyn Shape,
        filter: &QueryFilter,
        out: &mut [ColliderKey],
    ) -> usize {
        if out.is_empty() {
            return 0;
        }

        let mut count = 0;

        for (key, collider) in &self.colliders {
            if !filter.allows(collider, self.config.queries_hit_triggers) {
                continue;
            }

            match query::intersection_test(pose, shape, &collider.pose, &*collider.shape) {
                Ok(true) => {
                    out[count] = key;
                    count += 1;
                    if count == out.len() {
                        break;
                    }
                }
                Ok(false) => {}
                Err(unsupported) => {
                    warn!(
                        "unsupported overlap pair against '{}': {unsupported}",
                        collider.display_name()
                    );
                }
            }
        }

        count
    }
}

/// Convert a time-of-impact record into a hit record
///
/// parry reports witness points and normals in each shape's local space;
/// the collider pose maps them back to world space. For a penetrating
/// start the travel distance is zero by construction.
fn shape_cast_hit(key: ColliderKey, collider: &Collider, toi: &TOI) -> SensorHit {
    let distance = if toi.status == TOIStatus::Penetrating {
        0.0
    } else {
        toi.toi
    };

    SensorHit {
        collider: key,
        distance,
        point: collider.pose * toi.witness2,
        normal: (collider.pose * toi.normal2).into_inner(),
        triangle_index: None,
    }
}

/// Triangle index for ray hits against triangle meshes
///
/// Only mesh colliders expose a meaningful face id; for every other shape
/// the face feature numbers flat faces, not triangles.
fn triangle_index_of(collider: &Collider, feature: FeatureId) -> Option<u32> {
    if collider.shape.as_trimesh().is_none() {
        return None;
    }

    match feature {
        FeatureId::Face(index) => Some(index),
        _ => None,
    }
}

/// Upper bound handed to the engine; keeps infinity out of its arithmetic
fn finite_range(max_distance: f32) -> f32 {
    if max_distance.is_finite() {
        max_distance
    } else {
        f32::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SensorHit;

    #[test]
    fn test_registry_lifecycle() {
        let mut scene = SensorScene::new();
        assert!(scene.is_empty());

        let key = scene.add_collider(Collider::ball(1.0).named("probe_target"));
        assert_eq!(scene.collider_count(), 1);
        assert_eq!(scene.collider(key).map(Collider::display_name), Some("probe_target"));
        assert!(scene.collider_keys().any(|k| k == key));

        let removed = scene.remove_collider(key).expect("collider was registered");
        assert_eq!(removed.display_name(), "probe_target");
        assert!(scene.is_empty());
        assert!(scene.collider(key).is_none());
    }

    #[test]
    fn test_stale_key_is_rejected() {
        let mut scene = SensorScene::new();
        let key = scene.add_collider(Collider::ball(1.0));
        scene.remove_collider(key);
        scene.add_collider(Collider::ball(2.0));

        // Generational keys: the old slot may be reused, the key may not.
        assert!(scene.collider(key).is_none());
        assert!(scene.collider_mut(key).is_none());
    }

    #[test]
    fn test_queries_respect_empty_buffers() {
        let mut scene = SensorScene::new();
        scene.add_collider(Collider::ball(1.0));

        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::z());
        let filter = QueryFilter::default();

        assert_eq!(scene.cast_ray(&ray, 100.0, &filter, &mut []), 0);
        assert_eq!(scene.overlap_sphere(Point3::origin(), 10.0, &filter, &mut []), 0);
    }

    #[test]
    fn test_default_hit_record_is_invalid() {
        let hit = SensorHit::default();
        assert!(!hit.is_valid());

        let mut scene = SensorScene::new();
        scene.add_collider(Collider::ball(1.0));

        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::z());
        let mut hits = [SensorHit::default(); 1];
        let count = scene.cast_ray(&ray, 100.0, &QueryFilter::default(), &mut hits);

        assert_eq!(count, 1);
        assert!(hits[0].is_valid());
    }
}
