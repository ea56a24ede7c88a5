//! Polygon triangulation over arbitrary planar contours.
//!
//! Wraps Lyon's sweep-line fill tessellator with the nonzero winding rule,
//! so overlapping contours union rather than cancel and self-intersections
//! are resolved by inserting new vertices. The full attribute tuple rides
//! through the sweep as interpolated custom attributes: vertices created at
//! detected intersections come back as the proximity-weighted average of
//! the contributing input tuples.

use glam::Vec3;
use lyon::lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};
use lyon::math::{Point, point};
use lyon::path::Path;

use crate::{FILL_VERTEX_STRIDE, GeometryError, GeometryResult};

/// Stateful polygon triangulator.
///
/// Feed one shape at a time through `begin_shape` / `begin_contour` /
/// `vertex` / `end_contour` / `end_shape`. Each vertex is a fixed-width
/// tuple of scalars whose first three slots are the 3D position; the rest
/// is opaque per-vertex data (the default stride matches
/// `FILL_VERTEX_STRIDE`). Only one shape may be in flight per instance;
/// overlapping use fails fast instead of corrupting the sweep state.
pub struct PolygonTriangulator {
    tessellator: FillTessellator,
    stride: usize,
    /// Sweep tolerance, forwarded to Lyon.
    pub tolerance: f32,
    shape: Option<Shape>,
}

struct Shape {
    contours: Vec<Vec<f32>>,
    current: Option<Vec<f32>>,
}

impl Default for PolygonTriangulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PolygonTriangulator {
    /// Create a triangulator with the default attribute stride.
    pub fn new() -> Self {
        Self::with_stride(FILL_VERTEX_STRIDE)
    }

    /// Create a triangulator for a caller-owned attribute schema.
    ///
    /// Panics if `stride` cannot hold a 3D position.
    pub fn with_stride(stride: usize) -> Self {
        assert!(stride >= 3, "vertex stride must include a 3D position");
        Self {
            tessellator: FillTessellator::new(),
            stride,
            tolerance: FillOptions::DEFAULT_TOLERANCE,
            shape: None,
        }
    }

    /// Scalars per vertex tuple.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Start a new shape. Errors if one is already in flight.
    pub fn begin_shape(&mut self) -> GeometryResult<()> {
        if self.shape.is_some() {
            return Err(GeometryError::ShapeInProgress);
        }
        self.shape = Some(Shape {
            contours: Vec::new(),
            current: None,
        });
        Ok(())
    }

    /// Open a contour of the current shape.
    pub fn begin_contour(&mut self) -> GeometryResult<()> {
        let shape = self.shape.as_mut().ok_or(GeometryError::NoShapeInProgress)?;
        if shape.current.is_some() {
            return Err(GeometryError::ContourInProgress);
        }
        shape.current = Some(Vec::new());
        Ok(())
    }

    /// Append one vertex tuple to the open contour.
    pub fn vertex(&mut self, attributes: &[f32]) -> GeometryResult<()> {
        if attributes.len() != self.stride {
            return Err(GeometryError::StrideMismatch {
                expected: self.stride,
                got: attributes.len(),
            });
        }
        let shape = self.shape.as_mut().ok_or(GeometryError::NoShapeInProgress)?;
        let contour = shape
            .current
            .as_mut()
            .ok_or(GeometryError::NoContourInProgress)?;
        contour.extend_from_slice(attributes);
        Ok(())
    }

    /// Close the open contour.
    pub fn end_contour(&mut self) -> GeometryResult<()> {
        let shape = self.shape.as_mut().ok_or(GeometryError::NoShapeInProgress)?;
        let contour = shape
            .current
            .take()
            .ok_or(GeometryError::NoContourInProgress)?;
        if !contour.is_empty() {
            shape.contours.push(contour);
        }
        Ok(())
    }

    /// Run the sweep and return a flat non-indexed triangle list: every 3
    /// consecutive tuples form one triangle, same stride as the input.
    pub fn end_shape(&mut self) -> GeometryResult<Vec<f32>> {
        let shape = self.shape.take().ok_or(GeometryError::NoShapeInProgress)?;
        if shape.current.is_some() {
            return Err(GeometryError::ContourInProgress);
        }
        self.sweep(&shape.contours)
    }

    /// Convenience wrapper running the whole begin/contour/end sequence.
    pub fn triangulate(&mut self, contours: &[&[f32]]) -> GeometryResult<Vec<f32>> {
        self.begin_shape()?;
        for contour in contours {
            self.begin_contour()?;
            for tuple in contour.chunks(self.stride) {
                self.vertex(tuple)?;
            }
            self.end_contour()?;
        }
        self.end_shape()
    }

    fn sweep(&mut self, contours: &[Vec<f32>]) -> GeometryResult<Vec<f32>> {
        let stride = self.stride;
        if contours.is_empty() {
            return Ok(Vec::new());
        }

        let normal = projection_normal(contours, stride);
        let (s_axis, t_axis) = plane_basis(normal);

        let mut builder = Path::builder_with_attributes(stride);
        for contour in contours {
            let mut tuples = contour.chunks_exact(stride);
            let Some(first) = tuples.next() else { continue };
            builder.begin(project(first, s_axis, t_axis), first);
            for tuple in tuples {
                builder.line_to(project(tuple, s_axis, t_axis), tuple);
            }
            builder.end(true);
        }
        let path = builder.build();

        let mut buffers: VertexBuffers<Vec<f32>, u32> = VertexBuffers::new();
        let options = FillOptions::default()
            .with_tolerance(self.tolerance)
            .with_fill_rule(FillRule::NonZero);
        self.tessellator
            .tessellate_path(
                &path,
                &options,
                &mut BuffersBuilder::new(&mut buffers, |mut vertex: FillVertex| {
                    vertex.interpolated_attributes().to_vec()
                }),
            )
            .map_err(|err| GeometryError::Triangulation(format!("{err:?}")))?;

        let mut triangles = Vec::with_capacity(buffers.indices.len() * stride);
        for &index in &buffers.indices {
            triangles.extend_from_slice(&buffers.vertices[index as usize]);
        }
        Ok(triangles)
    }
}

/// Plane normal used to flatten the contours for the 2D sweep.
///
/// When every vertex shares one z the normal is hinted as +Z directly;
/// otherwise a Newell-style best-fit over all contours decides it.
fn projection_normal(contours: &[Vec<f32>], stride: usize) -> Vec3 {
    let mut shared_z = None;
    let mut planar = true;
    'contours: for contour in contours {
        for tuple in contour.chunks_exact(stride) {
            match shared_z {
                None => shared_z = Some(tuple[2]),
                Some(z) if tuple[2] == z => {}
                Some(_) => {
                    planar = false;
                    break 'contours;
                }
            }
        }
    }
    if planar {
        return Vec3::Z;
    }

    let mut normal = Vec3::ZERO;
    for contour in contours {
        let positions: Vec<Vec3> = contour
            .chunks_exact(stride)
            .map(|tuple| Vec3::new(tuple[0], tuple[1], tuple[2]))
            .collect();
        for (k, a) in positions.iter().enumerate() {
            let b = positions[(k + 1) % positions.len()];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
    }
    if normal.length_squared() > 0.0 {
        normal.normalize()
    } else {
        Vec3::Z
    }
}

/// Orthonormal in-plane axes for a given projection normal.
fn plane_basis(normal: Vec3) -> (Vec3, Vec3) {
    if normal == Vec3::Z {
        // Keep the hinted case exact: sweep coordinates are plain (x, y).
        (Vec3::X, Vec3::Y)
    } else {
        normal.any_orthonormal_pair()
    }
}

fn project(tuple: &[f32], s_axis: Vec3, t_axis: Vec3) -> Point {
    let position = Vec3::new(tuple[0], tuple[1], tuple[2]);
    point(position.dot(s_axis), position.dot(t_axis))
}
