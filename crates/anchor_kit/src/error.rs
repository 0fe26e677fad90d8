use thiserror::Error;

use crate::constraint::{ConstraintId, ElementId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("constraint references element {0:?} that was never added")]
    UnknownElement(ElementId),
    #[error("no constraint with id {0:?}")]
    UnknownConstraint(ConstraintId),
    #[error("layout pass made no progress; unresolved elements: {elements:?}")]
    Underconstrained { elements: Vec<ElementId> },
}
