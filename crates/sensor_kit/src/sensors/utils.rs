//! Scale-aware parameter arithmetic shared by the sensors
//!
//! Sensors are configured in local units; these helpers map the configured
//! dimensions into world space using the transform's non-uniform scale.
//! Radii follow the engine's conventions: a sphere grows with the largest
//! scale component, a capsule's radius with the larger of Y and Z (its
//! axis lies along X), and cast distance follows Z, the cast axis.

use crate::foundation::math::{Point3, Quat, Vec3};

/// World-space cast distance for a configured distance and scale
pub fn scaled_cast_distance(distance: f32, scale: &Vec3) -> f32 {
    (distance * scale.z).abs()
}

/// World-space sphere radius: the configured radius times the largest
/// scale component
pub fn scaled_sphere_radius(radius: f32, scale: &Vec3) -> f32 {
    (radius * scale.x.max(scale.y).max(scale.z)).abs()
}

/// World-space capsule radius: the configured radius times the larger of
/// the Y and Z scale components
pub fn scaled_capsule_radius(radius: f32, scale: &Vec3) -> f32 {
    (radius * scale.y.max(scale.z)).abs()
}

/// World-space box half extents, scaled per axis
pub fn scaled_box_half_extents(half_extents: &Vec3, scale: &Vec3) -> Vec3 {
    Vec3::new(
        half_extents.x * scale.x.abs(),
        half_extents.y * scale.y.abs(),
        half_extents.z * scale.z.abs(),
    )
}

/// Capsule endpoints: `origin` offset along the rotated local X axis by
/// the scaled half width on each side
pub fn capsule_points(origin: Point3, rotation: Quat, width: f32, x_scale: f32) -> (Point3, Point3) {
    let offset = rotation * Vec3::new((width * x_scale).abs(), 0.0, 0.0);
    (origin + offset, origin - offset)
}
