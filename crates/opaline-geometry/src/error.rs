/// Errors that can occur while building or tessellating geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A face references a vertex index outside the vertex array.
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    /// An edge references a vertex index outside the vertex array.
    EdgeIndexOutOfRange {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },

    /// A grid detail asks for more vertices than the geometry holds.
    GridTooLarge {
        required: usize,
        vertex_count: usize,
    },

    /// `begin_shape` was called while another shape is still in flight.
    ShapeInProgress,

    /// The call requires an open shape but none was begun.
    NoShapeInProgress,

    /// `begin_contour` was called while another contour is still open.
    ContourInProgress,

    /// The call requires an open contour but none was begun.
    NoContourInProgress,

    /// A vertex tuple did not match the triangulator's attribute stride.
    StrideMismatch { expected: usize, got: usize },

    /// A flat triangle list is not a whole number of triangles.
    PartialTriangleList { len: usize, stride: usize },

    /// The sweep tessellator rejected the input.
    Triangulation(String),
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::FaceIndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {} references vertex {} but only {} vertices exist",
                face, index, vertex_count
            ),
            GeometryError::EdgeIndexOutOfRange {
                edge,
                index,
                vertex_count,
            } => write!(
                f,
                "edge {} references vertex {} but only {} vertices exist",
                edge, index, vertex_count
            ),
            GeometryError::GridTooLarge {
                required,
                vertex_count,
            } => write!(
                f,
                "grid requires {} vertices but only {} exist",
                required, vertex_count
            ),
            GeometryError::ShapeInProgress => {
                write!(f, "begin_shape called while a shape is already in flight")
            }
            GeometryError::NoShapeInProgress => {
                write!(f, "no shape in flight; call begin_shape first")
            }
            GeometryError::ContourInProgress => {
                write!(f, "begin_contour called while a contour is already open")
            }
            GeometryError::NoContourInProgress => {
                write!(f, "no contour open; call begin_contour first")
            }
            GeometryError::StrideMismatch { expected, got } => write!(
                f,
                "vertex tuple has {} scalars but the triangulator stride is {}",
                got, expected
            ),
            GeometryError::PartialTriangleList { len, stride } => write!(
                f,
                "triangle list of {} scalars is not a whole number of stride-{} triangles",
                len, stride
            ),
            GeometryError::Triangulation(msg) => write!(f, "triangulation failed: {}", msg),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
