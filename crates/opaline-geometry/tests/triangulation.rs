//! Polygon triangulation tests: winding behavior, attribute interpolation
//! and the hand-off into a geometry's fill arrays.

use opaline_geometry::{FILL_VERTEX_STRIDE, Geometry, PolygonTriangulator};

/// Pack a fill vertex at z = 0 with uv tracking the position.
fn fill_vertex(x: f32, y: f32) -> [f32; FILL_VERTEX_STRIDE] {
    let mut tuple = [0.0; FILL_VERTEX_STRIDE];
    tuple[0] = x;
    tuple[1] = y;
    tuple[5] = 1.0; // normal +Z
    tuple[6] = x * 0.5; // u
    tuple[7] = y * 0.5; // v
    tuple[8] = 1.0; // opaque white color
    tuple[9] = 1.0;
    tuple[10] = 1.0;
    tuple[11] = 1.0;
    tuple
}

fn contour(points: &[(f32, f32)]) -> Vec<f32> {
    points
        .iter()
        .flat_map(|&(x, y)| fill_vertex(x, y))
        .collect()
}

/// Sum of unsigned triangle areas in the projected xy plane.
fn total_area(triangles: &[f32]) -> f32 {
    triangles
        .chunks_exact(FILL_VERTEX_STRIDE * 3)
        .map(|triangle| {
            let (ax, ay) = (triangle[0], triangle[1]);
            let (bx, by) = (
                triangle[FILL_VERTEX_STRIDE],
                triangle[FILL_VERTEX_STRIDE + 1],
            );
            let (cx, cy) = (
                triangle[FILL_VERTEX_STRIDE * 2],
                triangle[FILL_VERTEX_STRIDE * 2 + 1],
            );
            ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay)).abs() * 0.5
        })
        .sum()
}

#[test]
fn test_convex_quad_yields_two_triangles() {
    let mut tri = PolygonTriangulator::new();
    let quad = contour(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
    let triangles = tri.triangulate(&[&quad]).unwrap();

    assert_eq!(triangles.len(), 2 * 3 * FILL_VERTEX_STRIDE);
    assert!((total_area(&triangles) - 2.0).abs() < 1e-4);
}

#[test]
fn test_overlapping_contours_union_under_nonzero_winding() {
    let mut tri = PolygonTriangulator::new();
    let a = contour(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let b = contour(&[(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]);
    let triangles = tri.triangulate(&[&a, &b]).unwrap();

    // Union area, not zero (cancelled) and not 2.0 (double counted).
    assert!((total_area(&triangles) - 1.75).abs() < 1e-3);
}

#[test]
fn test_self_intersection_interpolates_attributes() {
    // A bowtie whose edges cross at (1, 1); the crossing vertex exists in
    // no input contour, so it must come back with attributes blended from
    // the contributing endpoints. uv tracks position * 0.5 on every input
    // vertex, so the blend is easy to predict.
    let mut tri = PolygonTriangulator::new();
    let bowtie = contour(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0), (2.0, 2.0)]);
    let triangles = tri.triangulate(&[&bowtie]).unwrap();

    let mut found_combined = false;
    for tuple in triangles.chunks_exact(FILL_VERTEX_STRIDE) {
        if (tuple[0] - 1.0).abs() < 1e-4 && (tuple[1] - 1.0).abs() < 1e-4 {
            found_combined = true;
            assert!((tuple[6] - 0.5).abs() < 1e-4, "u not interpolated");
            assert!((tuple[7] - 0.5).abs() < 1e-4, "v not interpolated");
            assert!((tuple[11] - 1.0).abs() < 1e-4, "alpha not interpolated");
        }
    }
    assert!(found_combined, "no vertex emitted at the crossing point");
}

#[test]
fn test_hole_contour_reduces_area() {
    // Outer 4x4 square with an inner 2x2 square wound the opposite way.
    let mut tri = PolygonTriangulator::new();
    let outer = contour(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
    let hole = contour(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]);
    let triangles = tri.triangulate(&[&outer, &hole]).unwrap();

    assert!((total_area(&triangles) - 12.0).abs() < 1e-3);
}

#[test]
fn test_triangulated_fill_feeds_geometry() {
    let mut tri = PolygonTriangulator::new();
    let quad = contour(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
    let triangles = tri.triangulate(&[&quad]).unwrap();

    let mut geom = Geometry::new();
    geom.append_fill_triangles(&triangles).unwrap();
    assert_eq!(geom.face_count(), 2);
    assert_eq!(geom.vertex_count(), 6);
    assert_eq!(geom.normals.len(), geom.vertex_count());
    assert_eq!(geom.uvs.len(), geom.vertex_count());
    assert_eq!(geom.vertex_colors.len(), geom.vertex_count());
}

#[test]
fn test_sequencing_violations_fail_fast() {
    let mut tri = PolygonTriangulator::new();
    assert!(tri.end_shape().is_err());
    tri.begin_shape().unwrap();
    assert!(tri.begin_shape().is_err());
    tri.begin_contour().unwrap();
    assert!(tri.begin_contour().is_err());
    assert!(tri.end_shape().is_err());
}
