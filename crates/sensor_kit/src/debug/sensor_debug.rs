//! Sensor-specific debug visualization
//!
//! Emits the classic sensor gizmos into a [`DebugDrawSystem`]: the cast
//! ray colored by outcome, the swept shape at each impact point, hit
//! normals and contact markers, and the struck triangle outline for mesh
//! colliders. Each call re-runs the sensor's query into a scratch buffer
//! so the overlay reflects the scene as it is now, not the last cached
//! update.

use crate::foundation::math::{Point3, Transform, Vec4};
use crate::scene::{ColliderKey, QueryFilter, Ray, SensorHit, SensorScene};
use crate::sensors::cast::ResolvedCast;
use crate::sensors::overlap::ResolvedOverlap;
use crate::sensors::utils;
use crate::sensors::{BoxCastSensor, BoxOverlapSensor, SphereCastSensor, SphereOverlapSensor};

use super::draw::{DebugDrawSystem, DebugShape};

/// Visualization range used when the cast distance is infinite
const UNBOUNDED_GIZMO_RANGE: f32 = 1_000_000.0;

/// Color scheme for sensor gizmos
#[derive(Clone, Debug)]
pub struct SensorGizmoColors {
    /// Ray and shape when nothing was hit
    pub no_hit: Vec4,
    /// Ray segment up to an impact, and the shape drawn there
    pub has_hit: Vec4,
    /// Ray segment between an impact and the cast end
    pub ray_end: Vec4,
    /// Surface normal at an impact
    pub normal: Vec4,
    /// Contact point markers
    pub hit_position: Vec4,
    /// Struck triangle outline on mesh colliders
    pub triangle: Vec4,
}

impl Default for SensorGizmoColors {
    fn default() -> Self {
        Self {
            no_hit: Vec4::new(1.0, 0.5, 0.5, 0.5),
            has_hit: Vec4::new(0.5, 1.0, 0.5, 0.5),
            ray_end: Vec4::new(1.0, 1.0, 0.5, 0.5),
            normal: Vec4::new(0.25, 0.75, 1.0, 1.0),
            hit_position: Vec4::new(1.0, 0.5, 1.0, 0.5),
            triangle: Vec4::new(1.0, 1.0, 1.0, 0.5),
        }
    }
}

/// Gizmo emitter for sensors
#[derive(Clone, Debug)]
pub struct SensorGizmos {
    /// Color scheme applied to every emitted shape
    pub colors: SensorGizmoColors,
    /// Lifetime given to emitted shapes; zero means one frame
    pub duration: f32,
}

impl Default for SensorGizmos {
    fn default() -> Self {
        Self {
            colors: SensorGizmoColors::default(),
            duration: 0.0,
        }
    }
}

impl SensorGizmos {
    /// Create a gizmo emitter with the default palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Visualize a box cast sensor
    pub fn draw_box_cast(
        &self,
        sensor: &BoxCastSensor,
        scene: &SensorScene,
        transform: &Transform,
        out: &mut DebugDrawSystem,
    ) {
        let ray = sensor.ray(transform);
        let cast = ResolvedCast::Box {
            rotation: transform.rotation,
            half_extents: utils::scaled_box_half_extents(&sensor.half_extents, &transform.scale),
        };
        self.draw_cast(
            scene,
            &ray,
            sensor.cast_distance(transform),
            &cast,
            sensor.settings.max_results,
            &sensor.settings.filter(),
            out,
        );
    }

    /// Visualize a sphere/capsule cast sensor
    pub fn draw_sphere_cast(
        &self,
        sensor: &SphereCastSensor,
        scene: &SensorScene,
        transform: &Transform,
        out: &mut DebugDrawSystem,
    ) {
        let ray = sensor.ray(transform);
        let cast = sensor.resolve(&ray, transform);
        self.draw_cast(
            scene,
            &ray,
            sensor.cast_distance(transform),
            &cast,
            sensor.settings.max_results,
            &sensor.settings.filter(),
            out,
        );
    }

    /// Visualize a box overlap sensor
    pub fn draw_box_overlap(
        &self,
        sensor: &BoxOverlapSensor,
        scene: &SensorScene,
        transform: &Transform,
        out: &mut DebugDrawSystem,
    ) {
        let center = Point3::from(transform.position);
        let overlap = ResolvedOverlap::Box {
            rotation: transform.rotation,
            half_extents: utils::scaled_box_half_extents(&sensor.half_extents, &transform.scale),
        };
        self.draw_overlap(scene, center, &overlap, &sensor.settings.filter(), out);
    }

    /// Visualize a sphere/capsule overlap sensor
    pub fn draw_sphere_overlap(
        &self,
        sensor: &SphereOverlapSensor,
        scene: &SensorScene,
        transform: &Transform,
        out: &mut DebugDrawSystem,
    ) {
        let center = Point3::from(transform.position);
        let overlap = sensor.resolve(center, transform);
        self.draw_overlap(scene, center, &overlap, &sensor.settings.filter(), out);
    }

    fn draw_cast(
        &self,
        scene: &SensorScene,
        ray: &Ray,
        distance: f32,
        cast: &ResolvedCast,
        max_results: usize,
        filter: &QueryFilter,
        out: &mut DebugDrawSystem,
    ) {
        let range = if distance.is_finite() {
            distance
        } else {
            UNBOUNDED_GIZMO_RANGE
        };

        let mut scratch = vec![SensorHit::default(); max_results];
        let count = match cast {
            ResolvedCast::Ray => scene.cast_ray(ray, range, filter, &mut scratch),
            ResolvedCast::Sphere { radius } => {
                scene.cast_sphere(ray.origin, *radius, &ray.dir, range, filter, &mut scratch)
            }
            ResolvedCast::Capsule { a, b, radius } => {
                scene.cast_capsule(*a, *b, *radius, &ray.dir, range, filter, &mut scratch)
            }
            ResolvedCast::Box {
                rotation,
                half_extents,
            } => scene.cast_box(
                ray.origin,
                *rotation,
                *half_extents,
                &ray.dir,
                range,
                filter,
                &mut scratch,
            ),
        };

        let ray_end = ray.point_at(range);

        if count == 0 {
            out.draw_line(ray.origin, ray_end, self.colors.no_hit, self.duration);
            self.draw_cast_shape(cast, ray_end, self.colors.no_hit, out);
            return;
        }

        for hit in &scratch[..count] {
            let collision_point = ray.point_at(hit.distance);

            out.draw_line(ray.origin, collision_point, self.colors.has_hit, self.duration);
            self.draw_cast_shape(cast, collision_point, self.colors.has_hit, out);
            out.draw_line(collision_point, ray_end, self.colors.ray_end, self.duration);

            self.draw_normal(hit, out);
            self.draw_contact(collision_point, hit, out);
            self.draw_hit_triangle(scene, hit, out);
        }
    }

    /// Draw the swept shape centered at `position`
    fn draw_cast_shape(
        &self,
        cast: &ResolvedCast,
        position: Point3,
        color: Vec4,
        out: &mut DebugDrawSystem,
    ) {
        match cast {
            ResolvedCast::Ray => {}
            ResolvedCast::Sphere { radius } => {
                out.draw_sphere(position, *radius, color, self.duration);
            }
            ResolvedCast::Capsule { a, b, radius } => {
                // Recenter the resolved axis on the requested position.
                let half_axis = (a - b) * 0.5;
                out.draw(DebugShape::Capsule {
                    start: position + half_axis,
                    end: position - half_axis,
                    radius: *radius,
                    color,
                    duration: self.duration,
                });
            }
            ResolvedCast::Box {
                rotation,
                half_extents,
            } => {
                out.draw(DebugShape::Box {
                    center: position,
                    half_extents: *half_extents,
                    rotation: *rotation,
                    color,
                    duration: self.duration,
                });
            }
        }
    }

    fn draw_normal(&self, hit: &SensorHit, out: &mut DebugDrawSystem) {
        let end = hit.point + hit.normal * 0.5;
        out.draw_line(hit.point, end, self.colors.normal, self.duration);
        out.draw_point(end, 0.1, self.colors.normal, self.duration);
    }

    fn draw_contact(&self, collision_point: Point3, hit: &SensorHit, out: &mut DebugDrawSystem) {
        out.draw_sphere(collision_point, 0.025, self.colors.has_hit, self.duration);
        out.draw_line(collision_point, hit.point, self.colors.hit_position, self.duration);
        out.draw_sphere(hit.point, 0.025, self.colors.hit_position, self.duration);
    }

    /// Outline the struck triangle of a mesh collider
    fn draw_hit_triangle(&self, scene: &SensorScene, hit: &SensorHit, out: &mut DebugDrawSystem) {
        let Some(index) = hit.triangle_index else {
            return;
        };
        let Some(collider) = scene.collider(hit.collider) else {
            return;
        };
        let Some(mesh) = collider.shape.as_trimesh() else {
            return;
        };
        if index as usize >= mesh.num_triangles() {
            return;
        }

        let triangle = mesh.triangle(index);
        // Lift the outline slightly off the surface so it stays visible.
        let offset = hit.normal * 0.001;
        let a = collider.pose * triangle.a + offset;
        let b = collider.pose * triangle.b + offset;
        let c = collider.pose * triangle.c + offset;

        out.draw_line(a, b, self.colors.triangle, self.duration);
        out.draw_line(b, c, self.colors.triangle, self.duration);
        out.draw_line(c, a, self.colors.triangle, self.duration);
    }

    fn draw_overlap(
        &self,
        scene: &SensorScene,
        center: Point3,
        overlap: &ResolvedOverlap,
        filter: &QueryFilter,
        out: &mut DebugDrawSystem,
    ) {
        let mut scratch = [ColliderKey::default(); 1];
        let count = match overlap {
            ResolvedOverlap::Sphere { radius } => {
                scene.overlap_sphere(center, *radius, filter, &mut scratch)
            }
            ResolvedOverlap::Capsule { a, b, radius } => {
                scene.overlap_capsule(*a, *b, *radius, filter, &mut scratch)
            }
            ResolvedOverlap::Box {
                rotation,
                half_extents,
            } => scene.overlap_box(center, *rotation, *half_extents, filter, &mut scratch),
        };

        let color = if count != 0 {
            self.colors.has_hit
        } else {
            self.colors.no_hit
        };

        match overlap {
            ResolvedOverlap::Sphere { radius } => {
                out.draw_sphere(center, *radius, color, self.duration);
            }
            ResolvedOverlap::Capsule { a, b, radius } => {
                out.draw(DebugShape::Capsule {
                    start: *a,
                    end: *b,
                    radius: *radius,
                    color,
                    duration: self.duration,
                });
            }
            ResolvedOverlap::Box {
                rotation,
                half_extents,
            } => {
                out.draw(DebugShape::Box {
                    center,
                    half_extents: *half_extents,
                    rotation: *rotation,
                    color,
                    duration: self.duration,
                });
            }
        }
    }
}
