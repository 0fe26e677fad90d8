//! The layout pass: resolves a [`LayoutGraph`] into concrete rects.
//!
//! Resolution is per element and per axis. An axis resolves once every
//! constraint touching it can be evaluated; constraints referencing another
//! element wait until that element's axis has resolved, so the whole graph
//! settles by fixpoint iteration. The graphs declared by screens here are
//! acyclic and shallow, so this converges in a couple of passes.

use std::collections::BTreeMap;

use crate::constraint::{Anchor, Edge, ElementId, ElementSpec, LayoutGraph, Priority};
use crate::error::LayoutError;
use crate::geometry::{Rect, Size};

/// Output of one layout pass: a rect per element, plus the font scale for
/// elements that shrink text to fit their slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedLayout {
    rects: BTreeMap<ElementId, Rect>,
    text_scales: BTreeMap<ElementId, f32>,
}

impl ResolvedLayout {
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    /// Scale factor for the element's text, `1.0` when no shrink applies.
    pub fn text_scale(&self, id: ElementId) -> f32 {
        self.text_scales.get(&id).copied().unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn of(edge: Edge) -> Self {
        if edge.is_horizontal() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

/// One resolved axis of an element: position of the low edge plus extent.
#[derive(Debug, Clone, Copy, Default)]
struct AxisSpan {
    lo: f32,
    extent: f32,
}

impl AxisSpan {
    fn edge_value(self, edge: Edge) -> f32 {
        match edge {
            Edge::Leading | Edge::Top => self.lo,
            Edge::Trailing | Edge::Bottom => self.lo + self.extent,
            Edge::CenterX | Edge::CenterY => self.lo + self.extent / 2.0,
            Edge::Width | Edge::Height => self.extent,
        }
    }

    fn of_rect(rect: Rect, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self {
                lo: rect.min_x(),
                extent: rect.width(),
            },
            Axis::Vertical => Self {
                lo: rect.min_y(),
                extent: rect.height(),
            },
        }
    }
}

/// Constraint-derived facts about one axis before completion.
#[derive(Debug, Clone, Copy, Default)]
struct AxisKnowns {
    lo: Option<(f32, Priority)>,
    hi: Option<(f32, Priority)>,
    center: Option<f32>,
    extent: Option<f32>,
}

impl AxisKnowns {
    /// An axis with no edge or center pin can never be placed.
    fn is_positioned(&self) -> bool {
        self.lo.is_some() || self.hi.is_some() || self.center.is_some()
    }
}

impl LayoutGraph {
    /// Resolves the graph against `frame` and `safe_area`, using
    /// `intrinsic_sizes` for elements that are not fully pinned on an axis.
    /// The graph itself is left untouched; repeated calls with the same
    /// inputs produce identical output.
    pub fn solve(
        &self,
        frame: Rect,
        safe_area: Rect,
        intrinsic_sizes: &BTreeMap<ElementId, Size>,
    ) -> Result<ResolvedLayout, LayoutError> {
        let mut horizontal: BTreeMap<ElementId, AxisSpan> = BTreeMap::new();
        let mut vertical: BTreeMap<ElementId, AxisSpan> = BTreeMap::new();

        loop {
            let mut progressed = false;
            let mut pending = Vec::new();

            for spec in self.elements() {
                let intrinsic = intrinsic_sizes.get(&spec.id).copied().unwrap_or_default();

                if !horizontal.contains_key(&spec.id) {
                    match self.gather(
                        spec.id,
                        Axis::Horizontal,
                        frame,
                        safe_area,
                        &horizontal,
                        &vertical,
                    )? {
                        Some(knowns) if knowns.is_positioned() => {
                            let span =
                                complete_axis(knowns, intrinsic.width, hug_applies(spec));
                            horizontal.insert(spec.id, span);
                            progressed = true;
                        }
                        _ => pending.push(spec.id),
                    }
                }

                if !vertical.contains_key(&spec.id) {
                    match self.gather(
                        spec.id,
                        Axis::Vertical,
                        frame,
                        safe_area,
                        &horizontal,
                        &vertical,
                    )? {
                        Some(knowns) if knowns.is_positioned() => {
                            let span = complete_axis(knowns, intrinsic.height, false);
                            vertical.insert(spec.id, span);
                            progressed = true;
                        }
                        _ => pending.push(spec.id),
                    }
                }
            }

            if pending.is_empty() {
                break;
            }
            if !progressed {
                pending.dedup();
                return Err(LayoutError::Underconstrained { elements: pending });
            }
        }

        let mut resolved = ResolvedLayout::default();
        for spec in self.elements() {
            let h = horizontal.get(&spec.id).copied().unwrap_or_default();
            let v = vertical.get(&spec.id).copied().unwrap_or_default();
            resolved
                .rects
                .insert(spec.id, Rect::new(h.lo, v.lo, h.extent, v.extent));

            if let Some(min_scale) = spec.min_text_scale {
                let intrinsic = intrinsic_sizes.get(&spec.id).copied().unwrap_or_default();
                let scale = if intrinsic.width > h.extent && intrinsic.width > 0.0 {
                    (h.extent / intrinsic.width).clamp(min_scale, 1.0)
                } else {
                    1.0
                };
                resolved.text_scales.insert(spec.id, scale);
            }
        }
        Ok(resolved)
    }

    /// Evaluates every constraint on one axis of one element. Returns
    /// `Ok(None)` when a referenced element has not resolved yet.
    fn gather(
        &self,
        element: ElementId,
        axis: Axis,
        frame: Rect,
        safe_area: Rect,
        horizontal: &BTreeMap<ElementId, AxisSpan>,
        vertical: &BTreeMap<ElementId, AxisSpan>,
    ) -> Result<Option<AxisKnowns>, LayoutError> {
        let mut knowns = AxisKnowns::default();

        for constraint in self.constraints_for(element) {
            if !matches!(
                (Axis::of(constraint.edge), axis),
                (Axis::Horizontal, Axis::Horizontal) | (Axis::Vertical, Axis::Vertical)
            ) {
                continue;
            }

            let anchor_value = match constraint.anchor {
                Anchor::Constant => 0.0,
                Anchor::Frame(edge) => AxisSpan::of_rect(frame, Axis::of(edge)).edge_value(edge),
                Anchor::SafeArea(edge) => {
                    AxisSpan::of_rect(safe_area, Axis::of(edge)).edge_value(edge)
                }
                Anchor::Element(other, edge) => {
                    if self.element(other).is_none() {
                        return Err(LayoutError::UnknownElement(other));
                    }
                    let spans = match Axis::of(edge) {
                        Axis::Horizontal => horizontal,
                        Axis::Vertical => vertical,
                    };
                    match spans.get(&other) {
                        Some(span) => span.edge_value(edge),
                        None => return Ok(None),
                    }
                }
            };
            let value = anchor_value + constraint.offset;

            match constraint.edge {
                Edge::Leading | Edge::Top => knowns.lo = Some((value, constraint.priority)),
                Edge::Trailing | Edge::Bottom => knowns.hi = Some((value, constraint.priority)),
                Edge::CenterX | Edge::CenterY => knowns.center = Some(value),
                Edge::Width | Edge::Height => knowns.extent = Some(value),
            }
        }

        Ok(Some(knowns))
    }
}

fn hug_applies(spec: &ElementSpec) -> bool {
    spec.horizontal_hugging >= Priority::High
}

/// Turns constraint-derived knowns into a concrete span. Extent comes from an
/// explicit dimension constraint, from stretching between two edge pins, or
/// from the intrinsic size; a hugging element keeps its intrinsic extent when
/// one of its two pins is sub-required, anchored at the stronger pin.
fn complete_axis(knowns: AxisKnowns, intrinsic_extent: f32, hugs: bool) -> AxisSpan {
    if let Some(extent) = knowns.extent {
        let lo = position(knowns, extent);
        return AxisSpan { lo, extent };
    }

    if let (Some((lo, lo_priority)), Some((hi, hi_priority))) = (knowns.lo, knowns.hi) {
        let weakest = lo_priority.min(hi_priority);
        if hugs && weakest < Priority::Required {
            let extent = intrinsic_extent;
            let lo = if lo_priority >= hi_priority {
                lo
            } else {
                hi - extent
            };
            return AxisSpan { lo, extent };
        }
        return AxisSpan {
            lo,
            extent: hi - lo,
        };
    }

    let extent = intrinsic_extent;
    AxisSpan {
        lo: position(knowns, extent),
        extent,
    }
}

fn position(knowns: AxisKnowns, extent: f32) -> f32 {
    if let Some((lo, _)) = knowns.lo {
        lo
    } else if let Some((hi, _)) = knowns.hi {
        hi - extent
    } else if let Some(center) = knowns.center {
        center - extent / 2.0
    } else {
        0.0
    }
}
