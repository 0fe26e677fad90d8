//! Constraint-based layout records and a deterministic resolution pass.
//!
//! Layouts are declared as plain data: elements with intrinsic-size hints and
//! constraints relating element edges to other elements, to the enclosing
//! frame, or to the safe area. A layout pass resolves the graph into concrete
//! rects for a given frame. The graph is never consumed by solving, so a
//! screen can re-resolve every frame while mutating individual constraint
//! offsets in place (for example when the device orientation changes).

pub mod constraint;
pub mod error;
pub mod geometry;
pub mod solver;

pub use constraint::{
    Anchor, Constraint, ConstraintId, Edge, ElementId, ElementSpec, LayoutGraph, Priority,
};
pub use error::LayoutError;
pub use geometry::{Point, Rect, Size};
pub use solver::ResolvedLayout;
