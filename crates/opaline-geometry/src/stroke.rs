//! Thick-line tessellation.
//!
//! Converts the edge list into a triangulated stroke mesh with per-vertex
//! tangents and side codes. Line width and cap/join styles are not
//! resolved here: the shading stage offsets each vertex along its tangents
//! using the side code, so a single mesh serves every stroke style.

use ahash::AHashSet;
use glam::Vec3;
use indexmap::IndexMap;
use opaline_core::Color;

use crate::{Geometry, GeometryError, GeometryResult};

/// Segment corners: begin/end alternate, sign picks the centerline side.
const SEGMENT_SIDES: [i32; 6] = [1, 1, -1, 1, -1, -1];

/// Cap corners; |2| marks the pair the shader may push past the endpoint.
const CAP_SIDES: [i32; 6] = [-1, 2, -2, 1, 2, -1];

/// Two 6-vertex fans around a joint; the codes let the shader discard the
/// fan half falling in the elbow and keep the visible outer wedge.
const JOIN_SIDES: [i32; 12] = [-1, -3, -2, -1, 0, -3, 3, 1, 2, 3, 0, 1];

/// An endpoint that may still become a cap, kept until a later edge either
/// reconnects to it (join) or the pass ends (cap).
struct PotentialCap {
    point: Vec3,
    /// Outward tangent, pointing away from the line body.
    tangent: Vec3,
    color: Color,
}

impl Geometry {
    /// Tessellate the edge list into the stroke buffers.
    ///
    /// A single streaming pass reconciles the edges — possibly several
    /// disjoint polylines concatenated — into segments, joins and caps.
    /// Leftover caps are finalized in the order their endpoints were first
    /// seen, so the output layout is reproducible.
    pub fn tessellate_edges(&mut self) -> GeometryResult<()> {
        self.clear_stroke_buffers();

        let mut pending: IndexMap<usize, PotentialCap> = IndexMap::new();
        let mut connected: AHashSet<usize> = AHashSet::new();
        let mut last_valid_dir: Option<Vec3> = None;

        let vertex_count = self.vertices.len();
        for i in 0..self.edges.len() {
            let [begin_index, end_index] = self.edges[i];
            if begin_index >= vertex_count || end_index >= vertex_count {
                let index = if begin_index >= vertex_count {
                    begin_index
                } else {
                    end_index
                };
                return Err(GeometryError::EdgeIndexOutOfRange {
                    edge: i,
                    index,
                    vertex_count,
                });
            }
            let begin = self.vertices[begin_index];
            let end = self.vertices[end_index];
            let from_color = self.stroke_color(begin_index);
            let to_color = self.stroke_color(end_index);

            let delta = end - begin;
            let dir = if delta.length_squared() > 0.0 {
                Some(delta.normalize())
            } else {
                None
            };

            if let Some(dir) = dir {
                self.add_segment(begin, end, dir, from_color, to_color);
            }

            let prev_edge = if i > 0 { Some(self.edges[i - 1]) } else { None };
            if prev_edge.is_some_and(|prev| prev[1] == begin_index) {
                // The polyline continues through this vertex.
                if connected.insert(begin_index) {
                    pending.shift_remove(&begin_index);
                    if let (Some(last), Some(dir)) = (last_valid_dir, dir) {
                        if last.dot(dir) < 1.0 - 1e-8 {
                            self.add_join(begin, last, dir, from_color);
                        }
                    }
                }
            } else {
                // A new polyline starts here; resolve both loose ends.
                if let Some(dir) = dir {
                    if !connected.contains(&begin_index) {
                        if let Some(cap) = pending.shift_remove(&begin_index) {
                            self.add_join(begin, cap.tangent, dir, from_color);
                            connected.insert(begin_index);
                        } else {
                            pending.insert(
                                begin_index,
                                PotentialCap {
                                    point: begin,
                                    tangent: -dir,
                                    color: from_color,
                                },
                            );
                        }
                    }
                }
                if let (Some(prev), Some(last)) = (prev_edge, last_valid_dir) {
                    let prev_end_index = prev[1];
                    if !connected.contains(&prev_end_index) {
                        let prev_end = self.vertices[prev_end_index];
                        if let Some(cap) = pending.shift_remove(&prev_end_index) {
                            self.add_join(prev_end, last, -cap.tangent, cap.color);
                            connected.insert(prev_end_index);
                        } else {
                            let color = self.stroke_color(prev_end_index);
                            pending.insert(
                                prev_end_index,
                                PotentialCap {
                                    point: prev_end,
                                    tangent: last,
                                    color,
                                },
                            );
                        }
                    }
                    // The finished polyline's tangent must not leak into
                    // the next one.
                    last_valid_dir = None;
                }
            }

            if i + 1 == self.edges.len() && !connected.contains(&end_index) {
                if let Some(tangent) = dir.or(last_valid_dir) {
                    if let Some(cap) = pending.shift_remove(&end_index) {
                        self.add_join(end, tangent, -cap.tangent, to_color);
                        connected.insert(end_index);
                    } else {
                        pending.insert(
                            end_index,
                            PotentialCap {
                                point: end,
                                tangent,
                                color: to_color,
                            },
                        );
                    }
                }
            }

            if let Some(dir) = dir {
                last_valid_dir = Some(dir);
            }
        }

        for cap in pending.values() {
            self.add_cap(cap.point, cap.tangent, cap.color);
        }
        Ok(())
    }

    fn stroke_color(&self, index: usize) -> Color {
        self.vertex_stroke_colors
            .get(index)
            .copied()
            .unwrap_or(Color::TRANSPARENT)
    }

    fn push_line_vertex(
        &mut self,
        point: Vec3,
        tangent_in: Vec3,
        tangent_out: Vec3,
        side: i32,
        color: Color,
    ) {
        self.line_vertices.push(point);
        self.line_tangents_in.push(tangent_in);
        self.line_tangents_out.push(tangent_out);
        self.line_sides.push(side);
        self.line_colors.push(color);
    }

    /// A rectangle along the edge: 2 triangles, 6 vertices, both tangents
    /// equal to the segment direction.
    fn add_segment(&mut self, begin: Vec3, end: Vec3, dir: Vec3, from: Color, to: Color) {
        let points = [begin, end, begin, end, end, begin];
        let colors = [from, to, from, to, to, from];
        for k in 0..6 {
            self.push_line_vertex(points[k], dir, dir, SEGMENT_SIDES[k], colors[k]);
        }
    }

    /// Terminating geometry at an unjoined endpoint: the outward tangent
    /// rides in tangent-in, tangent-out is exactly zero.
    fn add_cap(&mut self, point: Vec3, tangent: Vec3, color: Color) {
        for &side in &CAP_SIDES {
            self.push_line_vertex(point, tangent, Vec3::ZERO, side, color);
        }
    }

    /// Two fans bridging adjacent segments at a shared point: 4 triangles,
    /// 12 vertices, tangent-in approaching and tangent-out leaving.
    fn add_join(&mut self, point: Vec3, tangent_in: Vec3, tangent_out: Vec3, color: Color) {
        for &side in &JOIN_SIDES {
            self.push_line_vertex(point, tangent_in, tangent_out, side, color);
        }
    }
}
