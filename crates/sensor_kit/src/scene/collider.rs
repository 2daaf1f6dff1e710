//! Colliders registered in a sensor scene
//!
//! A collider pairs a parry3d shape with a world pose and the filtering
//! data sensors care about (layer bits, trigger flag). Shapes are stored
//! behind `SharedShape`, so cloning a collider never copies mesh data.

use parry3d::shape::SharedShape;
use thiserror::Error;

use crate::foundation::math::{Iso3, Point3, Quat, Translation3, Vec3};

use super::filter::SensorLayers;

/// Errors produced while constructing collider shapes
#[derive(Debug, Error)]
pub enum ColliderError {
    /// A triangle mesh needs at least one vertex and one triangle
    #[error("triangle mesh has no geometry (vertices: {vertices}, triangles: {triangles})")]
    EmptyMesh {
        /// Number of vertices supplied
        vertices: usize,
        /// Number of triangles supplied
        triangles: usize,
    },

    /// A triangle referenced a vertex that does not exist
    #[error("triangle index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds {
        /// The offending vertex index
        index: u32,
        /// Number of vertices supplied
        vertex_count: usize,
    },
}

/// A collider that sensors can detect
#[derive(Clone)]
pub struct Collider {
    /// Collision geometry, in the collider's local space
    pub shape: SharedShape,
    /// World pose of the shape
    pub pose: Iso3,
    /// Layers this collider belongs to
    pub layers: SensorLayers,
    /// Trigger volumes are detectable but queries may be told to skip them
    pub is_trigger: bool,
    /// Optional name, used in logs and debug overlays
    pub name: Option<String>,
}

impl Collider {
    fn from_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            pose: Iso3::identity(),
            layers: SensorLayers::DEFAULT,
            is_trigger: false,
            name: None,
        }
    }

    /// Create a sphere collider with the given radius
    pub fn ball(radius: f32) -> Self {
        Self::from_shape(SharedShape::ball(radius))
    }

    /// Create a box collider with the given half extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::from_shape(SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z))
    }

    /// Create a capsule collider between two local endpoints
    pub fn capsule(a: Point3, b: Point3, radius: f32) -> Self {
        Self::from_shape(SharedShape::capsule(a, b, radius))
    }

    /// Create a triangle-mesh collider
    ///
    /// Vertices are in local space; `indices` lists one `[u32; 3]` per
    /// triangle. The mesh is validated before it is handed to the query
    /// engine, which would otherwise panic on degenerate input.
    pub fn trimesh(vertices: Vec<Point3>, indices: Vec<[u32; 3]>) -> Result<Self, ColliderError> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(ColliderError::EmptyMesh {
                vertices: vertices.len(),
                triangles: indices.len(),
            });
        }

        let vertex_count = vertices.len();
        for triangle in &indices {
            for &index in triangle {
                if index as usize >= vertex_count {
                    return Err(ColliderError::IndexOutOfBounds {
                        index,
                        vertex_count,
                    });
                }
            }
        }

        Ok(Self::from_shape(SharedShape::trimesh(vertices, indices)))
    }

    /// Place the collider at a world position, keeping identity rotation
    pub fn at(mut self, position: Vec3) -> Self {
        self.pose = Iso3::from_parts(Translation3::from(position), self.pose.rotation);
        self
    }

    /// Rotate the collider, keeping its position
    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.pose = Iso3::from_parts(self.pose.translation, rotation);
        self
    }

    /// Replace the full world pose
    pub fn with_pose(mut self, pose: Iso3) -> Self {
        self.pose = pose;
        self
    }

    /// Assign the collider to specific layers
    pub fn with_layers(mut self, layers: SensorLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Mark this collider as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Attach a debug name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for logs: the debug name if set, a placeholder otherwise
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}
