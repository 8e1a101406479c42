//! Reporting of the degenerate cases met during tessellation.
//!
//! None of these are errors: the tessellator recovers from all of them by
//! dropping a triangle, an edge or a contour. They are reported to a
//! [`Diagnostics`] sink passed by the caller, which can log them, collect them
//! or ignore them.

use polytess_geom::Point;

use core::fmt;
use log::Level;

/// Something the tessellator had to work around.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A diagonal joining a vertex with itself or with a neighbor on the
    /// same contour. The diagonal is not inserted.
    DegenerateEdge { a: u32, b: u32, len: u32 },
    /// A zero-area triangle, not added to the shape.
    DegenerateTriangle { a: Point, b: Point, c: Point },
    /// A contour with fewer than three distinct points or with no area.
    DroppedContour { chain: u32, points: usize },
    /// Intersections were still being found after the maximum number of
    /// splitting passes.
    SplitPassLimit { passes: u32 },
    /// A polygon vertex closing an edge that the sweep line doesn't know of.
    UnmatchedEdge { at: Point },
    /// No active edge was found on the left of a split, merge or regular
    /// vertex.
    MissingLeftEdge { at: Point },
    /// A face of the monotone decomposition that isn't monotone. It is
    /// triangulated by ear clipping instead.
    NonMonotoneFace { vertices: usize },
    /// Ear clipping couldn't find an ear. The remaining vertices are dropped.
    EarClippingStalled { remaining: usize },
    /// Walking the boundary of a face didn't lead back to where it started.
    /// The face is dropped.
    OpenFace { at: Point },
}

impl Diagnostic {
    /// The log level the diagnostic is reported at by [`LogDiagnostics`].
    pub fn level(&self) -> Level {
        match *self {
            Diagnostic::DegenerateTriangle { .. } => Level::Trace,
            Diagnostic::DroppedContour { .. } | Diagnostic::NonMonotoneFace { .. } => Level::Debug,
            _ => Level::Warn,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Diagnostic::DegenerateEdge { a, b, len } => {
                write!(f, "Degenerate edge {a} -> {b} (length {len})")
            }
            Diagnostic::DegenerateTriangle { a, b, c } => write!(
                f,
                "Degenerate triangle ({}, {}) ({}, {}) ({}, {})",
                a.x(),
                a.y(),
                b.x(),
                b.y(),
                c.x(),
                c.y()
            ),
            Diagnostic::DroppedContour { chain, points } => {
                write!(f, "Dropped contour #{chain} ({points} points)")
            }
            Diagnostic::SplitPassLimit { passes } => {
                write!(f, "Intersections remain after {passes} splitting passes")
            }
            Diagnostic::UnmatchedEdge { at } => {
                write!(f, "No active edge ends at ({}, {})", at.x(), at.y())
            }
            Diagnostic::MissingLeftEdge { at } => {
                write!(f, "No active edge left of ({}, {})", at.x(), at.y())
            }
            Diagnostic::NonMonotoneFace { vertices } => {
                write!(f, "Face with {vertices} vertices is not monotone")
            }
            Diagnostic::EarClippingStalled { remaining } => {
                write!(f, "Ear clipping stalled with {remaining} vertices left")
            }
            Diagnostic::OpenFace { at } => {
                write!(f, "Face starting at ({}, {}) is not closed", at.x(), at.y())
            }
        }
    }
}

/// Receives the diagnostics of a tessellation.
pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` crate.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::log!(target: "polytess", diagnostic.level(), "{}", diagnostic);
    }
}

/// Collects diagnostics.
impl Diagnostics for alloc::vec::Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Ignores diagnostics.
impl Diagnostics for () {
    fn report(&mut self, _: Diagnostic) {}
}

#[test]
fn display() {
    use alloc::string::ToString;
    use polytess_geom::point;

    assert_eq!(
        Diagnostic::DegenerateEdge { a: 3, b: 4, len: 1 }.to_string(),
        "Degenerate edge 3 -> 4 (length 1)"
    );
    assert_eq!(
        Diagnostic::MissingLeftEdge { at: point(2, -1) }.to_string(),
        "No active edge left of (2, -1)"
    );
    assert_eq!(
        Diagnostic::DegenerateTriangle {
            a: point(0, 0),
            b: point(1, 1),
            c: point(2, 2)
        }
        .level(),
        Level::Trace
    );
}

#[test]
fn sinks() {
    let mut collected: alloc::vec::Vec<Diagnostic> = alloc::vec::Vec::new();
    collected.report(Diagnostic::SplitPassLimit { passes: 3 });
    assert_eq!(collected, [Diagnostic::SplitPassLimit { passes: 3 }]);

    ().report(Diagnostic::NonMonotoneFace { vertices: 5 });
    LogDiagnostics.report(Diagnostic::EarClippingStalled { remaining: 4 });
}
