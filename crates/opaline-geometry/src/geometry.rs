//! The mesh buffer: raw vertex data plus the derived stroke buffers.

use glam::{Vec2, Vec3};
use opaline_core::Color;

use crate::{GeometryError, GeometryResult};

/// Scalars per fill vertex exchanged with the polygon triangulator:
/// position (3) + normal (3) + uv (2) + color (4).
pub const FILL_VERTEX_STRIDE: usize = 12;

/// A triangle mesh under construction.
///
/// Owns the raw fill data (positions, faces, normals, uvs, per-vertex
/// colors) and the stroke buffers derived from the edge list. A vertex's
/// index is its identity; `normals` and `uvs` run parallel to `vertices`
/// once computed. All arrays are rebuilt wholesale by the methods in
/// `faces`, `edges` and `stroke` — there is no incremental update path.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    /// Vertex positions.
    pub vertices: Vec<Vec3>,
    /// One normal per vertex, filled in by `compute_normals`.
    pub normals: Vec<Vec3>,
    /// Triangles as vertex index triples, counter-clockwise winding.
    pub faces: Vec<[usize; 3]>,
    /// One texture coordinate per vertex.
    pub uvs: Vec<Vec2>,
    /// Per-vertex fill colors.
    pub vertex_colors: Vec<Color>,
    /// Per-vertex stroke colors, read by `tessellate_edges`.
    pub vertex_stroke_colors: Vec<Color>,
    /// Directed edges driving stroke tessellation.
    pub edges: Vec<[usize; 2]>,

    pub(crate) detail_x: usize,
    pub(crate) detail_y: usize,

    /// Stroke mesh positions, one entry per emitted stroke vertex.
    pub line_vertices: Vec<Vec3>,
    /// Unit direction approaching each stroke vertex.
    pub line_tangents_in: Vec<Vec3>,
    /// Unit direction leaving each stroke vertex; zero at cap endpoints.
    pub line_tangents_out: Vec<Vec3>,
    /// Side code per stroke vertex, domain {-3..3}.
    pub line_sides: Vec<i32>,
    /// RGBA color per stroke vertex.
    pub line_colors: Vec<Color>,
}

impl Geometry {
    /// Create an empty geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty geometry with grid detail recorded for the seam and
    /// pole averaging passes.
    pub fn with_detail(detail_x: usize, detail_y: usize) -> Self {
        Self {
            detail_x,
            detail_y,
            ..Self::default()
        }
    }

    /// Create a geometry and populate it through a builder closure.
    pub fn build(detail_x: usize, detail_y: usize, builder: impl FnOnce(&mut Self)) -> Self {
        let mut geometry = Self::with_detail(detail_x, detail_y);
        builder(&mut geometry);
        geometry
    }

    /// Grid columns per row minus one, as recorded by `compute_faces`.
    pub fn detail_x(&self) -> usize {
        self.detail_x
    }

    /// Grid rows minus one, as recorded by `compute_faces`.
    pub fn detail_y(&self) -> usize {
        self.detail_y
    }

    /// Clear every array in place without changing identity.
    ///
    /// Any slices previously handed out over this geometry's buffers are
    /// invalidated; callers must not retain views across a reset.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.faces.clear();
        self.uvs.clear();
        self.vertex_colors.clear();
        self.vertex_stroke_colors.clear();
        self.edges.clear();
        self.clear_stroke_buffers();
    }

    /// Empty both per-vertex color arrays.
    pub fn clear_colors(&mut self) {
        self.vertex_colors.clear();
        self.vertex_stroke_colors.clear();
    }

    pub(crate) fn clear_stroke_buffers(&mut self) {
        self.line_vertices.clear();
        self.line_tangents_in.clear();
        self.line_tangents_out.clear();
        self.line_sides.clear();
        self.line_colors.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of vertices in the stroke mesh.
    pub fn stroke_vertex_count(&self) -> usize {
        self.line_vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append a flat triangle list produced by the polygon triangulator
    /// into the fill arrays, adding one face per 3 consecutive tuples.
    ///
    /// Expects `FILL_VERTEX_STRIDE` scalars per vertex.
    pub fn append_fill_triangles(&mut self, tuples: &[f32]) -> GeometryResult<()> {
        let stride = FILL_VERTEX_STRIDE;
        if tuples.len() % (stride * 3) != 0 {
            return Err(GeometryError::PartialTriangleList {
                len: tuples.len(),
                stride,
            });
        }
        for triangle in tuples.chunks_exact(stride * 3) {
            let base = self.vertices.len();
            for tuple in triangle.chunks_exact(stride) {
                self.vertices.push(Vec3::new(tuple[0], tuple[1], tuple[2]));
                self.normals.push(Vec3::new(tuple[3], tuple[4], tuple[5]));
                self.uvs.push(Vec2::new(tuple[6], tuple[7]));
                self.vertex_colors
                    .push(Color::rgba(tuple[8], tuple[9], tuple[10], tuple[11]));
            }
            self.faces.push([base, base + 1, base + 2]);
        }
        Ok(())
    }

    /// Flat `[x, y, z, ...]` view of the vertex positions.
    pub fn vertices_f32(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Flat view of the vertex normals.
    pub fn normals_f32(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Flat `[u, v, ...]` view of the texture coordinates.
    pub fn uvs_f32(&self) -> &[f32] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Flat `[r, g, b, a, ...]` view of the fill colors.
    pub fn vertex_colors_f32(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertex_colors)
    }

    /// Flat view of the stroke mesh positions.
    pub fn line_vertices_f32(&self) -> &[f32] {
        bytemuck::cast_slice(&self.line_vertices)
    }

    /// Flat view of the incoming stroke tangents.
    pub fn line_tangents_in_f32(&self) -> &[f32] {
        bytemuck::cast_slice(&self.line_tangents_in)
    }

    /// Flat view of the outgoing stroke tangents.
    pub fn line_tangents_out_f32(&self) -> &[f32] {
        bytemuck::cast_slice(&self.line_tangents_out)
    }

    /// Flat `[r, g, b, a, ...]` view of the stroke colors.
    pub fn line_colors_f32(&self) -> &[f32] {
        bytemuck::cast_slice(&self.line_colors)
    }
}
