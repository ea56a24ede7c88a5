//! Opaline Geometry - procedural mesh construction
//!
//! This crate turns abstract shape descriptions into GPU-ready triangle
//! meshes:
//! - Vertex grids to faces and angle-weighted vertex normals
//! - Face lists to directed edge lists
//! - Edge lists to thick-line stroke meshes (segments, caps, joins) with
//!   shader-cooperative tangent and side-code attributes
//! - Arbitrary planar contours to flat triangle lists via a sweep-line
//!   tessellator (nonzero winding, attribute interpolation at detected
//!   intersections)
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use opaline_geometry::Geometry;
//!
//! let mut geom = Geometry::build(1, 1, |g| {
//!     g.vertices.extend([
//!         Vec3::new(0.0, 0.0, 0.0),
//!         Vec3::new(1.0, 0.0, 0.0),
//!         Vec3::new(0.0, 1.0, 0.0),
//!         Vec3::new(1.0, 1.0, 0.0),
//!     ]);
//! });
//! geom.compute_faces(1, 1)?;
//! geom.compute_normals()?;
//! geom.make_triangle_edges();
//! geom.tessellate_edges()?;
//! assert_eq!(geom.face_count(), 2);
//! # Ok::<(), opaline_geometry::GeometryError>(())
//! ```

mod edges;
mod error;
mod faces;
mod geometry;
mod stroke;
mod triangulate;

pub use error::{GeometryError, GeometryResult};
pub use faces::BoundingBox;
pub use geometry::{FILL_VERTEX_STRIDE, Geometry};
pub use triangulate::PolygonTriangulator;
