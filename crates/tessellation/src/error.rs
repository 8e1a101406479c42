use thiserror::Error;

/// The fill tessellator's result type.
pub type TessellationResult = Result<(), TessellationError>;

/// The fill tessellator's error enumeration.
///
/// Geometric degeneracies are never errors: they are reported through
/// [`Diagnostics`](crate::Diagnostics) and the offending triangles or contours
/// are dropped. When an error is returned the shape is left untouched.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TessellationError {
    #[error("Point ({x}, {y}) is outside of the supported coordinate range.")]
    CoordinateOutOfRange { x: i32, y: i32 },
    #[error("Shape #{id} has already been tessellated.")]
    ShapeAlreadyTessellated { id: u32 },
}

#[cfg(test)]
use alloc::string::ToString;

#[test]
fn error_messages() {
    let e = TessellationError::CoordinateOutOfRange { x: 1 << 30, y: 0 };
    assert_eq!(
        e.to_string(),
        "Point (1073741824, 0) is outside of the supported coordinate range."
    );
    assert_eq!(
        TessellationError::ShapeAlreadyTessellated { id: 7 }.to_string(),
        "Shape #7 has already been tessellated."
    );
}
