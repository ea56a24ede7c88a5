//! Grid topology and vertex-normal derivation.

use glam::Vec3;

use crate::{Geometry, GeometryError, GeometryResult};

/// Axis-aligned bounds of a geometry's vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
    /// Extent per axis (`max - min`).
    pub size: Vec3,
    /// Center of the box.
    pub offset: Vec3,
}

impl Geometry {
    /// Rebuild the face list by treating the vertices as a regular
    /// `(detail_x + 1) × (detail_y + 1)` row-major grid, two triangles per
    /// cell. Records the detail counts for the averaging passes.
    pub fn compute_faces(&mut self, detail_x: usize, detail_y: usize) -> GeometryResult<()> {
        let stride = detail_x + 1;
        let required = stride * (detail_y + 1);
        if required > self.vertices.len() {
            return Err(GeometryError::GridTooLarge {
                required,
                vertex_count: self.vertices.len(),
            });
        }
        self.detail_x = detail_x;
        self.detail_y = detail_y;
        self.faces.clear();
        for i in 0..detail_y {
            for j in 0..detail_x {
                let a = i * stride + j;
                let b = a + 1;
                let c = (i + 1) * stride + j + 1;
                let d = (i + 1) * stride + j;
                self.faces.push([a, b, d]);
                self.faces.push([d, b, c]);
            }
        }
        Ok(())
    }

    /// Recompute per-vertex normals from the faces.
    ///
    /// Each face contributes its plane normal scaled by the angle it spans
    /// at the shared corner, so long thin triangles do not dominate the
    /// average. Degenerate faces (colinear or repeated vertices) are
    /// reported at warn level and fall back to the raw cross product.
    pub fn compute_normals(&mut self) -> GeometryResult<()> {
        let vertex_count = self.vertices.len();
        for (fi, face) in self.faces.iter().enumerate() {
            for &index in face {
                if index >= vertex_count {
                    return Err(GeometryError::FaceIndexOutOfRange {
                        face: fi,
                        index,
                        vertex_count,
                    });
                }
            }
        }

        self.normals.clear();
        self.normals.resize(vertex_count, Vec3::ZERO);
        for (fi, face) in self.faces.iter().enumerate() {
            let [a, b, c] = *face;
            let ab = self.vertices[b] - self.vertices[a];
            let ac = self.vertices[c] - self.vertices[a];
            let n = ab.cross(ac);
            let mag = n.length();
            let sin_alpha = mag / (ab.length() * ac.length());
            let contribution = if sin_alpha == 0.0 || sin_alpha.is_nan() {
                tracing::warn!(face = fi, "degenerate face: colinear or repeated vertices");
                n
            } else {
                // Clamp guards asin against rounding just past 1.
                n * (sin_alpha.min(1.0).asin() / mag)
            };
            for &index in face {
                self.normals[index] += contribution;
            }
        }
        for normal in &mut self.normals {
            if *normal != Vec3::ZERO {
                *normal = normal.normalize();
            }
        }
        Ok(())
    }

    /// Make the first and last column of each grid row share one averaged
    /// normal, removing the seam where a surface wraps around (cylinders).
    pub fn average_normals(&mut self) {
        let stride = self.detail_x + 1;
        for i in 0..=self.detail_y {
            let left = i * stride;
            let right = left + self.detail_x;
            if right >= self.normals.len() {
                break;
            }
            let average = (self.normals[left] + self.normals[right]) * 0.5;
            self.normals[left] = average;
            self.normals[right] = average;
        }
    }

    /// Average the first `detail_x` normals into one shared value and the
    /// last `detail_x` into another, removing fan-seam artifacts at the
    /// poles of spherical caps.
    pub fn average_pole_normals(&mut self) {
        let count = self.detail_x;
        if count == 0 || self.normals.len() < count {
            return;
        }

        let mut sum = Vec3::ZERO;
        for normal in &self.normals[..count] {
            sum += *normal;
        }
        let north = sum / count as f32;
        for normal in &mut self.normals[..count] {
            *normal = north;
        }

        let tail = self.normals.len() - count;
        let mut sum = Vec3::ZERO;
        for normal in &self.normals[tail..] {
            sum += *normal;
        }
        let south = sum / count as f32;
        for normal in &mut self.normals[tail..] {
            *normal = south;
        }
    }

    /// Axis-aligned bounding box of the vertices, `None` when empty.
    pub fn calculate_bounding_box(&self) -> Option<BoundingBox> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for vertex in &self.vertices {
            min = min.min(*vertex);
            max = max.max(*vertex);
        }
        Some(BoundingBox {
            min,
            max,
            size: max - min,
            offset: (min + max) * 0.5,
        })
    }

    /// Center the vertices on the origin and uniformly scale them so the
    /// longest bounding-box dimension becomes exactly 200. No-op when the
    /// geometry has no vertices.
    pub fn normalize(&mut self) {
        let Some(bounds) = self.calculate_bounding_box() else {
            return;
        };
        let longest = bounds.size.x.max(bounds.size.y).max(bounds.size.z);
        let scale = if longest > 0.0 { 200.0 / longest } else { 1.0 };
        for vertex in &mut self.vertices {
            *vertex = (*vertex - bounds.offset) * scale;
        }
    }

    /// Mirror the texture coordinates horizontally.
    pub fn flip_u(&mut self) {
        for uv in &mut self.uvs {
            uv.x = 1.0 - uv.x;
        }
    }

    /// Mirror the texture coordinates vertically.
    pub fn flip_v(&mut self) {
        for uv in &mut self.uvs {
            uv.y = 1.0 - uv.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn grid(detail_x: usize, detail_y: usize) -> Geometry {
        let mut geom = Geometry::new();
        for i in 0..=detail_y {
            for j in 0..=detail_x {
                geom.vertices.push(Vec3::new(j as f32, i as f32, 0.0));
            }
        }
        geom
    }

    #[test]
    fn test_compute_faces_too_few_vertices() {
        let mut geom = Geometry::new();
        geom.vertices.push(Vec3::ZERO);
        let err = geom.compute_faces(2, 2).unwrap_err();
        assert!(matches!(err, GeometryError::GridTooLarge { required: 9, .. }));
    }

    #[test]
    fn test_compute_faces_cell_layout() {
        let mut geom = grid(2, 1);
        geom.compute_faces(2, 1).unwrap();
        assert_eq!(geom.faces[0], [0, 1, 3]);
        assert_eq!(geom.faces[1], [3, 1, 4]);
        assert_eq!(geom.faces[2], [1, 2, 4]);
        assert_eq!(geom.faces[3], [4, 2, 5]);
    }

    #[test]
    fn test_compute_normals_rejects_bad_index() {
        let mut geom = grid(1, 1);
        geom.faces.push([0, 1, 99]);
        let err = geom.compute_normals().unwrap_err();
        assert!(matches!(
            err,
            GeometryError::FaceIndexOutOfRange { index: 99, .. }
        ));
    }

    #[test]
    fn test_degenerate_face_is_not_fatal() {
        let mut geom = Geometry::new();
        geom.vertices
            .extend([Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::Y]);
        // Colinear triangle plus a valid one sharing vertex 0.
        geom.faces.push([0, 1, 2]);
        geom.faces.push([0, 1, 3]);
        geom.compute_normals().unwrap();
        assert_eq!(geom.normals.len(), 4);
        assert!((geom.normals[3] - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_average_normals_shares_row_ends() {
        let mut geom = grid(2, 1);
        geom.compute_faces(2, 1).unwrap();
        geom.normals = vec![
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::Z,
            Vec3::Y,
            Vec3::X,
        ];
        geom.average_normals();
        assert_eq!(geom.normals[0], geom.normals[2]);
        assert_eq!(geom.normals[3], geom.normals[5]);
        assert_eq!(geom.normals[0], (Vec3::X + Vec3::Z) * 0.5);
    }

    #[test]
    fn test_average_pole_normals() {
        let mut geom = grid(2, 2);
        geom.compute_faces(2, 2).unwrap();
        geom.normals = vec![Vec3::X; 9];
        geom.normals[0] = Vec3::Y;
        geom.normals[8] = Vec3::Z;
        geom.average_pole_normals();
        assert_eq!(geom.normals[0], geom.normals[1]);
        assert_eq!(geom.normals[7], geom.normals[8]);
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(Geometry::new().calculate_bounding_box().is_none());
    }

    #[test]
    fn test_normalize_empty_is_noop() {
        let mut geom = Geometry::new();
        geom.normalize();
        assert!(geom.is_empty());
    }

    #[test]
    fn test_flip_uvs() {
        let mut geom = Geometry::new();
        geom.uvs.push(Vec2::new(0.25, 0.75));
        geom.flip_u();
        assert_eq!(geom.uvs[0], Vec2::new(0.75, 0.75));
        geom.flip_v();
        assert_eq!(geom.uvs[0], Vec2::new(0.75, 0.25));
    }
}
