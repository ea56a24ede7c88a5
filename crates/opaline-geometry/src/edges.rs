//! Edge list derivation from triangle faces.

use crate::Geometry;

impl Geometry {
    /// Rebuild the edge list from the current faces: every triangle
    /// contributes its three directed boundary edges in face order.
    ///
    /// Internal diagonals introduced by triangulating quad cells are
    /// emitted too, so stroking a grid-based geometry shows its
    /// tessellation seams; callers that want clean outlines supply their
    /// own edge list instead.
    pub fn make_triangle_edges(&mut self) {
        self.edges.clear();
        for face in &self.faces {
            let [a, b, c] = *face;
            self.edges.push([a, b]);
            self.edges.push([b, c]);
            self.edges.push([c, a]);
        }
    }
}
