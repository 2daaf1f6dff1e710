//! Debug drawing primitives and shape collection
//!
//! The kit never renders anything itself: sensors emit wireframe
//! primitives into a [`DebugDrawSystem`] and the host engine drains the
//! queue into whatever line renderer it has. Shapes are either temporary
//! (expire after a duration) or persistent (remain until removed by key).

use std::collections::HashMap;

use crate::foundation::math::{Point3, Quat, Vec3, Vec4};

/// Unique identifier for persistent debug shapes
pub type DebugShapeId = String;

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug)]
pub enum DebugShape {
    /// Line segment from start to end
    Line {
        /// Segment start, world space
        start: Point3,
        /// Segment end, world space
        end: Point3,
        /// RGBA color
        color: Vec4,
        /// Seconds until the shape expires
        duration: f32,
    },

    /// Wireframe sphere at center with radius
    Sphere {
        /// Sphere center, world space
        center: Point3,
        /// Sphere radius
        radius: f32,
        /// RGBA color
        color: Vec4,
        /// Seconds until the shape expires
        duration: f32,
    },

    /// Wireframe oriented box at center with half extents
    Box {
        /// Box center, world space
        center: Point3,
        /// Half extents along the box axes
        half_extents: Vec3,
        /// Box orientation
        rotation: Quat,
        /// RGBA color
        color: Vec4,
        /// Seconds until the shape expires
        duration: f32,
    },

    /// Wireframe capsule from start to end with radius
    Capsule {
        /// Axis start, world space
        start: Point3,
        /// Axis end, world space
        end: Point3,
        /// Capsule radius
        radius: f32,
        /// RGBA color
        color: Vec4,
        /// Seconds until the shape expires
        duration: f32,
    },

    /// Point marker at position
    Point {
        /// Marker position, world space
        position: Point3,
        /// Marker size hint
        size: f32,
        /// RGBA color
        color: Vec4,
        /// Seconds until the shape expires
        duration: f32,
    },
}

impl DebugShape {
    fn duration_mut(&mut self) -> &mut f32 {
        match self {
            Self::Line { duration, .. }
            | Self::Sphere { duration, .. }
            | Self::Box { duration, .. }
            | Self::Capsule { duration, .. }
            | Self::Point { duration, .. } => duration,
        }
    }

    /// Remaining lifetime in seconds
    pub fn duration(&self) -> f32 {
        match self {
            Self::Line { duration, .. }
            | Self::Sphere { duration, .. }
            | Self::Box { duration, .. }
            | Self::Capsule { duration, .. }
            | Self::Point { duration, .. } => *duration,
        }
    }

    /// Set the lifetime, returning the modified shape
    pub fn with_duration(mut self, new_duration: f32) -> Self {
        *self.duration_mut() = new_duration;
        self
    }

    /// Decrease lifetime by `delta_time`, returning true once expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let duration = self.duration_mut();
        *duration -= delta_time;
        *duration <= 0.0
    }
}

/// Collector for debug shapes emitted by sensors
///
/// Supports both temporary shapes, which expire as [`update`] ticks their
/// durations, and persistent keyed shapes, which remain until removed.
///
/// [`update`]: DebugDrawSystem::update
pub struct DebugDrawSystem {
    temporary_shapes: Vec<DebugShape>,
    persistent_shapes: HashMap<DebugShapeId, DebugShape>,

    /// Master enable/disable flag; a disabled system drops all submissions
    pub enabled: bool,
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugDrawSystem {
    /// Create an empty, enabled draw system
    pub fn new() -> Self {
        Self {
            temporary_shapes: Vec::new(),
            persistent_shapes: HashMap::new(),
            enabled: true,
        }
    }

    /// Submit a temporary shape
    pub fn draw(&mut self, shape: DebugShape) {
        if self.enabled {
            self.temporary_shapes.push(shape);
        }
    }

    /// Submit a line segment
    pub fn draw_line(&mut self, start: Point3, end: Point3, color: Vec4, duration: f32) {
        self.draw(DebugShape::Line {
            start,
            end,
            color,
            duration,
        });
    }

    /// Submit a wireframe sphere
    pub fn draw_sphere(&mut self, center: Point3, radius: f32, color: Vec4, duration: f32) {
        self.draw(DebugShape::Sphere {
            center,
            radius,
            color,
            duration,
        });
    }

    /// Submit a point marker
    pub fn draw_point(&mut self, position: Point3, size: f32, color: Vec4, duration: f32) {
        self.draw(DebugShape::Point {
            position,
            size,
            color,
            duration,
        });
    }

    /// Submit or replace a persistent shape under a key
    pub fn draw_persistent(&mut self, id: impl Into<DebugShapeId>, shape: DebugShape) {
        if self.enabled {
            self.persistent_shapes.insert(id.into(), shape);
        }
    }

    /// Remove a persistent shape
    pub fn remove_persistent(&mut self, id: &str) -> Option<DebugShape> {
        self.persistent_shapes.remove(id)
    }

    /// Tick temporary shape lifetimes, dropping expired ones
    pub fn update(&mut self, delta_time: f32) {
        self.temporary_shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// Iterate every live shape, temporary then persistent
    pub fn shapes(&self) -> impl Iterator<Item = &DebugShape> {
        self.temporary_shapes
            .iter()
            .chain(self.persistent_shapes.values())
    }

    /// Number of live shapes
    pub fn shape_count(&self) -> usize {
        self.temporary_shapes.len() + self.persistent_shapes.len()
    }

    /// Drop every shape, temporary and persistent
    pub fn clear(&mut self) {
        self.temporary_shapes.clear();
        self.persistent_shapes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(duration: f32) -> DebugShape {
        DebugShape::Line {
            start: Point3::origin(),
            end: Point3::new(0.0, 0.0, 1.0),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            duration,
        }
    }

    #[test]
    fn test_temporary_shapes_expire() {
        let mut system = DebugDrawSystem::new();
        system.draw(line(0.5));
        system.draw(line(2.0));

        system.update(1.0);
        assert_eq!(system.shape_count(), 1);

        system.update(1.5);
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_persistent_shapes_survive_updates() {
        let mut system = DebugDrawSystem::new();
        system.draw_persistent("probe", line(0.1));

        system.update(10.0);
        assert_eq!(system.shape_count(), 1);

        assert!(system.remove_persistent("probe").is_some());
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_disabled_system_drops_submissions() {
        let mut system = DebugDrawSystem::new();
        system.enabled = false;

        system.draw(line(1.0));
        system.draw_persistent("probe", line(1.0));
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_with_duration() {
        let shape = line(1.0).with_duration(5.0);
        assert_eq!(shape.duration(), 5.0);
    }
}
