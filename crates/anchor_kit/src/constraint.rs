use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);
    };
}

id_newtype!(ElementId);
id_newtype!(ConstraintId);

/// An edge or dimension of an element that a constraint can relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Bottom,
    Leading,
    Trailing,
    CenterX,
    CenterY,
    Width,
    Height,
}

impl Edge {
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            Edge::Leading | Edge::Trailing | Edge::CenterX | Edge::Width
        )
    }
}

/// What a constraint pins against: the enclosing frame, the safe area, or an
/// edge of another element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Frame(Edge),
    SafeArea(Edge),
    Element(ElementId, Edge),
    /// Anchors at zero, so the record's offset is an absolute value. Used for
    /// fixed dimensions.
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    High,
    Required,
}

/// One spatial relationship, kept as a plain data record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub element: ElementId,
    pub edge: Edge,
    pub anchor: Anchor,
    pub offset: f32,
    pub priority: Priority,
}

/// Declarative description of one laid-out element. Intrinsic sizes are not
/// stored here; they are measured from live content and supplied to each
/// layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub id: ElementId,
    /// Elements hugging at `High` or above keep their intrinsic width instead
    /// of stretching when a sub-required pin would stretch them.
    pub horizontal_hugging: Priority,
    /// When set, the layout pass reports a font scale in
    /// `[min_text_scale, 1.0]` for content that is wider than its slot.
    pub min_text_scale: Option<f32>,
}

impl ElementSpec {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            horizontal_hugging: Priority::Low,
            min_text_scale: None,
        }
    }

    pub fn hugging(mut self, priority: Priority) -> Self {
        self.horizontal_hugging = priority;
        self
    }

    pub fn min_text_scale(mut self, scale: f32) -> Self {
        self.min_text_scale = Some(scale);
        self
    }
}

/// Keyed element and constraint storage. Declarations are insert-or-replace
/// by id, so re-running a build step cannot duplicate records.
#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    elements: BTreeMap<ElementId, ElementSpec>,
    constraints: BTreeMap<ConstraintId, Constraint>,
}

impl LayoutGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, spec: ElementSpec) {
        self.elements.insert(spec.id, spec);
    }

    pub fn pin(
        &mut self,
        id: ConstraintId,
        element: ElementId,
        edge: Edge,
        anchor: Anchor,
        offset: f32,
        priority: Priority,
    ) {
        self.constraints.insert(
            id,
            Constraint {
                element,
                edge,
                anchor,
                offset,
                priority,
            },
        );
    }

    /// Mutates one constraint's offset in place, leaving the rest of the
    /// record untouched.
    pub fn set_offset(&mut self, id: ConstraintId, offset: f32) -> Result<(), LayoutError> {
        match self.constraints.get_mut(&id) {
            Some(constraint) => {
                constraint.offset = offset;
                Ok(())
            }
            None => Err(LayoutError::UnknownConstraint(id)),
        }
    }

    pub fn offset(&self, id: ConstraintId) -> Option<f32> {
        self.constraints.get(&id).map(|c| c.offset)
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementSpec> {
        self.elements.get(&id)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub(crate) fn elements(&self) -> impl Iterator<Item = &ElementSpec> {
        self.elements.values()
    }

    pub(crate) fn constraints_for(
        &self,
        element: ElementId,
    ) -> impl Iterator<Item = &Constraint> {
        self.constraints
            .values()
            .filter(move |c| c.element == element)
    }
}
