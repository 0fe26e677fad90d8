//! The demo screen: a header row (back button, stretching label, add button,
//! segmented switch) and, in the extended variant, a titled container row
//! that responds to orientation changes.
//!
//! All spatial relationships live in an [`anchor_kit::LayoutGraph`] declared
//! once at construction; every frame the graph is resolved against the
//! current surface and each widget is placed into its resolved rect.

use std::collections::BTreeMap;

use anchor_kit::{
    Anchor, Edge, ElementId, ElementSpec, LayoutGraph, Priority, ResolvedLayout, Size,
};
use eframe::egui;

use crate::controller::events::{Orientation, ScreenEvent};
use crate::controller::reducer::{self, DisplayMode};
use crate::ui::widgets;

const BACK_TITLE: &str = "◀ Back to Profile";
const ADD_TITLE: &str = "+ Add new item";
const SEGMENT_ITEMS: [&str; 2] = ["◀", "▶"];

mod ids {
    use anchor_kit::{ConstraintId, ElementId};

    pub const BACK_BUTTON: ElementId = ElementId(1);
    pub const SEGMENT: ElementId = ElementId(2);
    pub const ADD_BUTTON: ElementId = ElementId(3);
    pub const MAIN_LABEL: ElementId = ElementId(4);
    pub const CONTAINER: ElementId = ElementId(5);
    pub const LEADING_TITLE: ElementId = ElementId(6);
    pub const TRAILING_TITLE: ElementId = ElementId(7);

    pub const BACK_TOP: ConstraintId = ConstraintId(1);
    pub const BACK_LEADING: ConstraintId = ConstraintId(2);
    pub const SEGMENT_TRAILING: ConstraintId = ConstraintId(3);
    pub const SEGMENT_CENTER_Y: ConstraintId = ConstraintId(4);
    pub const SEGMENT_HEIGHT: ConstraintId = ConstraintId(5);
    pub const ADD_TRAILING: ConstraintId = ConstraintId(6);
    pub const ADD_CENTER_Y: ConstraintId = ConstraintId(7);
    pub const LABEL_LEADING: ConstraintId = ConstraintId(8);
    pub const LABEL_TRAILING: ConstraintId = ConstraintId(9);
    pub const LABEL_CENTER_Y: ConstraintId = ConstraintId(10);
    pub const LABEL_HEIGHT: ConstraintId = ConstraintId(11);
    pub const CONTAINER_LEADING: ConstraintId = ConstraintId(12);
    pub const CONTAINER_TRAILING: ConstraintId = ConstraintId(13);
    pub const CONTAINER_TOP: ConstraintId = ConstraintId(14);
    pub const CONTAINER_HEIGHT: ConstraintId = ConstraintId(15);
    pub const LEADING_TITLE_LEADING: ConstraintId = ConstraintId(16);
    pub const LEADING_TITLE_CENTER_Y: ConstraintId = ConstraintId(17);
    pub const TRAILING_TITLE_TRAILING: ConstraintId = ConstraintId(18);
    pub const TRAILING_TITLE_CENTER_Y: ConstraintId = ConstraintId(19);
}

/// Fixed spacing and sizing values owned by the screen controller.
#[derive(Debug, Clone, Copy)]
pub struct LayoutMetrics {
    pub padding: f32,
    pub label_font_size: f32,
    pub min_text_scale: f32,
    pub container_top_offset: f32,
    pub container_height: f32,
    pub portrait_inset: f32,
    pub landscape_inset: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            padding: 12.0,
            label_font_size: 20.0,
            min_text_scale: 0.7,
            container_top_offset: 24.0,
            container_height: 56.0,
            portrait_inset: 0.0,
            landscape_inset: 50.0,
        }
    }
}

/// Immutable string set shown by the screen.
#[derive(Debug, Clone, Copy)]
pub struct ScreenText {
    pub placeholder: &'static str,
    pub short: &'static str,
    pub wide: &'static str,
    pub leading_title: &'static str,
    pub trailing_title: &'static str,
}

impl ScreenText {
    pub fn standard() -> Self {
        Self {
            placeholder: "Toggle right switch",
            short: "Short text",
            wide: "If you set a segmented control to have a momentary style, \
                   a segment doesn’t show itself as selected (blue background) \
                   when the user touches it. The disclosure button is always \
                   momentary and doesn’t affect the actual selection.",
            leading_title: "Leading title",
            trailing_title: "Trailing title",
        }
    }

    pub fn extended() -> Self {
        Self {
            placeholder: "Toggle the right switch to swap between the short and wide text",
            ..Self::standard()
        }
    }
}

/// Root content of the scene. Owns the display-mode state machine, the
/// constraint graph, and the widgets it places each frame.
pub struct ScreenApp {
    metrics: LayoutMetrics,
    text: ScreenText,
    extended: bool,
    mode: DisplayMode,
    selected_segment: Option<usize>,
    orientation: Orientation,
    graph: LayoutGraph,
    back_taps: u64,
}

impl ScreenApp {
    pub fn new(metrics: LayoutMetrics, text: ScreenText, extended: bool) -> Self {
        let mut app = Self {
            metrics,
            text,
            extended,
            mode: DisplayMode::Placeholder,
            selected_segment: None,
            orientation: Orientation::Portrait,
            graph: LayoutGraph::new(),
            back_taps: 0,
        };
        app.build_layout();
        app
    }

    /// Default configuration for the chosen variant.
    pub fn with_variant(extended: bool) -> Self {
        let text = if extended {
            ScreenText::extended()
        } else {
            ScreenText::standard()
        };
        Self::new(LayoutMetrics::default(), text, extended)
    }

    /// Declares every element and constraint record. Declarations are keyed,
    /// so running this again replaces records instead of duplicating them.
    fn build_layout(&mut self) {
        let padding = self.metrics.padding;
        let graph = &mut self.graph;

        graph.add_element(ElementSpec::new(ids::BACK_BUTTON).hugging(Priority::High));
        graph.pin(
            ids::BACK_TOP,
            ids::BACK_BUTTON,
            Edge::Top,
            Anchor::SafeArea(Edge::Top),
            padding,
            Priority::Required,
        );
        graph.pin(
            ids::BACK_LEADING,
            ids::BACK_BUTTON,
            Edge::Leading,
            Anchor::SafeArea(Edge::Leading),
            padding,
            Priority::Required,
        );

        graph.add_element(ElementSpec::new(ids::SEGMENT).hugging(Priority::High));
        graph.pin(
            ids::SEGMENT_TRAILING,
            ids::SEGMENT,
            Edge::Trailing,
            Anchor::Frame(Edge::Trailing),
            -padding,
            Priority::Required,
        );
        graph.pin(
            ids::SEGMENT_CENTER_Y,
            ids::SEGMENT,
            Edge::CenterY,
            Anchor::Element(ids::BACK_BUTTON, Edge::CenterY),
            0.0,
            Priority::Required,
        );
        graph.pin(
            ids::SEGMENT_HEIGHT,
            ids::SEGMENT,
            Edge::Height,
            Anchor::Element(ids::BACK_BUTTON, Edge::Height),
            0.0,
            Priority::Required,
        );

        graph.add_element(ElementSpec::new(ids::ADD_BUTTON).hugging(Priority::High));
        graph.pin(
            ids::ADD_TRAILING,
            ids::ADD_BUTTON,
            Edge::Trailing,
            Anchor::Element(ids::SEGMENT, Edge::Leading),
            -padding,
            Priority::Required,
        );
        graph.pin(
            ids::ADD_CENTER_Y,
            ids::ADD_BUTTON,
            Edge::CenterY,
            Anchor::Element(ids::BACK_BUTTON, Edge::CenterY),
            0.0,
            Priority::Required,
        );

        graph.add_element(
            ElementSpec::new(ids::MAIN_LABEL).min_text_scale(self.metrics.min_text_scale),
        );
        graph.pin(
            ids::LABEL_LEADING,
            ids::MAIN_LABEL,
            Edge::Leading,
            Anchor::Element(ids::BACK_BUTTON, Edge::Trailing),
            padding,
            Priority::Required,
        );
        graph.pin(
            ids::LABEL_TRAILING,
            ids::MAIN_LABEL,
            Edge::Trailing,
            Anchor::Element(ids::ADD_BUTTON, Edge::Leading),
            -padding,
            Priority::Required,
        );
        graph.pin(
            ids::LABEL_CENTER_Y,
            ids::MAIN_LABEL,
            Edge::CenterY,
            Anchor::Element(ids::BACK_BUTTON, Edge::CenterY),
            0.0,
            Priority::Required,
        );
        graph.pin(
            ids::LABEL_HEIGHT,
            ids::MAIN_LABEL,
            Edge::Height,
            Anchor::Element(ids::BACK_BUTTON, Edge::Height),
            0.0,
            Priority::Required,
        );

        if self.extended {
            let inset = if self.orientation.is_portrait() {
                self.metrics.portrait_inset
            } else {
                self.metrics.landscape_inset
            };

            graph.add_element(ElementSpec::new(ids::CONTAINER));
            graph.pin(
                ids::CONTAINER_LEADING,
                ids::CONTAINER,
                Edge::Leading,
                Anchor::Frame(Edge::Leading),
                inset,
                Priority::Required,
            );
            graph.pin(
                ids::CONTAINER_TRAILING,
                ids::CONTAINER,
                Edge::Trailing,
                Anchor::Frame(Edge::Trailing),
                -inset,
                Priority::Required,
            );
            graph.pin(
                ids::CONTAINER_TOP,
                ids::CONTAINER,
                Edge::Top,
                Anchor::Element(ids::BACK_BUTTON, Edge::Bottom),
                self.metrics.container_top_offset,
                Priority::Required,
            );
            graph.pin(
                ids::CONTAINER_HEIGHT,
                ids::CONTAINER,
                Edge::Height,
                Anchor::Constant,
                self.metrics.container_height,
                Priority::Required,
            );

            graph.add_element(ElementSpec::new(ids::LEADING_TITLE).hugging(Priority::High));
            graph.pin(
                ids::LEADING_TITLE_LEADING,
                ids::LEADING_TITLE,
                Edge::Leading,
                Anchor::Element(ids::CONTAINER, Edge::Leading),
                padding,
                Priority::Required,
            );
            graph.pin(
                ids::LEADING_TITLE_CENTER_Y,
                ids::LEADING_TITLE,
                Edge::CenterY,
                Anchor::Element(ids::CONTAINER, Edge::CenterY),
                0.0,
                Priority::Required,
            );

            graph.add_element(ElementSpec::new(ids::TRAILING_TITLE).hugging(Priority::High));
            graph.pin(
                ids::TRAILING_TITLE_TRAILING,
                ids::TRAILING_TITLE,
                Edge::Trailing,
                Anchor::Element(ids::CONTAINER, Edge::Trailing),
                -padding,
                Priority::Required,
            );
            graph.pin(
                ids::TRAILING_TITLE_CENTER_Y,
                ids::TRAILING_TITLE,
                Edge::CenterY,
                Anchor::Element(ids::CONTAINER, Edge::CenterY),
                0.0,
                Priority::Required,
            );
        }
    }

    pub fn handle_event(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::SegmentSelected { index } => {
                if index <= 1 {
                    self.selected_segment = Some(index);
                }
                self.mode = reducer::apply(self.mode, event);
            }
            ScreenEvent::BackActivated => {
                self.back_taps += 1;
                tracing::info!("tap tap");
                self.mode = reducer::apply(self.mode, event);
            }
            ScreenEvent::OrientationChanged { orientation } => {
                if self.extended {
                    self.apply_orientation(orientation);
                }
                self.orientation = orientation;
            }
        }
    }

    /// Updates the container's leading/trailing offsets in place; the graph
    /// is never re-declared for an orientation change.
    fn apply_orientation(&mut self, orientation: Orientation) {
        let inset = if orientation.is_portrait() {
            self.metrics.portrait_inset
        } else {
            self.metrics.landscape_inset
        };
        for (constraint, offset) in [
            (ids::CONTAINER_LEADING, inset),
            (ids::CONTAINER_TRAILING, -inset),
        ] {
            if let Err(err) = self.graph.set_offset(constraint, offset) {
                tracing::warn!(error = %err, "container inset update failed");
                return;
            }
        }
        tracing::debug!(?orientation, inset, "container insets updated");
    }

    fn display_text(&self) -> &'static str {
        match self.mode {
            DisplayMode::Placeholder => self.text.placeholder,
            DisplayMode::ShortText => self.text.short,
            DisplayMode::WideText => self.text.wide,
            DisplayMode::Cleared => "",
        }
    }

    fn measure_intrinsics(&self, ui: &mut egui::Ui) -> BTreeMap<ElementId, Size> {
        let body = egui::FontId::proportional(14.0);
        let label_font = egui::FontId::proportional(self.metrics.label_font_size);
        let mut measure = |text: &str, font: &egui::FontId| {
            let galley = ui.fonts_mut(|fonts| {
                fonts.layout_no_wrap(text.to_owned(), font.clone(), egui::Color32::WHITE)
            });
            Size::new(galley.size().x, galley.size().y)
        };
        // Button chrome around the title text.
        let padded = |size: Size| Size::new(size.width + 28.0, size.height + 14.0);

        let mut sizes = BTreeMap::new();
        sizes.insert(ids::BACK_BUTTON, padded(measure(BACK_TITLE, &body)));
        sizes.insert(ids::ADD_BUTTON, padded(measure(ADD_TITLE, &body)));

        let segment_width: f32 = SEGMENT_ITEMS
            .iter()
            .map(|item| measure(item, &body).width + 22.0)
            .sum();
        sizes.insert(ids::SEGMENT, Size::new(segment_width, 28.0));

        sizes.insert(ids::MAIN_LABEL, measure(self.display_text(), &label_font));
        if self.extended {
            sizes.insert(ids::LEADING_TITLE, measure(self.text.leading_title, &body));
            sizes.insert(
                ids::TRAILING_TITLE,
                measure(self.text.trailing_title, &body),
            );
        }
        sizes
    }

    fn render(&mut self, ui: &mut egui::Ui, layout: &ResolvedLayout) {
        if self.extended {
            if let Some(rect) = layout.rect(ids::CONTAINER) {
                ui.painter().rect_filled(
                    to_screen_rect(rect),
                    egui::CornerRadius::same(4),
                    egui::Color32::from_rgb(40, 42, 46),
                );
            }
            for (id, title) in [
                (ids::LEADING_TITLE, self.text.leading_title),
                (ids::TRAILING_TITLE, self.text.trailing_title),
            ] {
                if let Some(rect) = layout.rect(id) {
                    ui.put(
                        to_screen_rect(rect),
                        egui::Label::new(
                            egui::RichText::new(title)
                                .size(14.0)
                                .color(egui::Color32::from_rgb(205, 205, 210)),
                        ),
                    );
                }
            }
        }

        if let Some(rect) = layout.rect(ids::BACK_BUTTON) {
            let button = egui::Button::new(
                egui::RichText::new(BACK_TITLE)
                    .size(14.0)
                    .color(egui::Color32::from_rgb(90, 200, 245)),
            )
            .fill(egui::Color32::from_rgb(27, 60, 78))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 200, 245)))
            .corner_radius(egui::CornerRadius::same(4));
            if ui.put(to_screen_rect(rect), button).clicked() {
                self.handle_event(ScreenEvent::BackActivated);
            }
        }

        if let Some(rect) = layout.rect(ids::ADD_BUTTON) {
            let button = egui::Button::new(
                egui::RichText::new(ADD_TITLE)
                    .size(14.0)
                    .color(egui::Color32::from_rgb(240, 110, 110)),
            )
            .fill(egui::Color32::from_rgb(70, 36, 40))
            .stroke(egui::Stroke::new(
                1.0,
                egui::Color32::from_rgb(240, 110, 110),
            ))
            .corner_radius(egui::CornerRadius::same(4));
            // The add button has no action wired up; it only participates in
            // the layout.
            let _ = ui.put(to_screen_rect(rect), button);
        }

        if let Some(rect) = layout.rect(ids::SEGMENT) {
            if let Some(index) = widgets::segmented_switch(
                ui,
                to_screen_rect(rect),
                &SEGMENT_ITEMS,
                self.selected_segment,
            ) {
                self.handle_event(ScreenEvent::SegmentSelected { index });
            }
        }

        if let Some(rect) = layout.rect(ids::MAIN_LABEL) {
            let scale = layout.text_scale(ids::MAIN_LABEL);
            let rich = egui::RichText::new(self.display_text())
                .size(self.metrics.label_font_size * scale);
            let label = if self.extended {
                egui::Label::new(rich).wrap()
            } else {
                egui::Label::new(rich).truncate()
            };
            ui.put(to_screen_rect(rect), label);
        }
    }
}

impl eframe::App for ScreenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = ctx.screen_rect();
        let orientation = Orientation::of(screen.width(), screen.height());
        if orientation != self.orientation {
            self.handle_event(ScreenEvent::OrientationChanged { orientation });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let frame_rect = to_graph_rect(ctx.screen_rect());
            // The panel's inner rect plays the role of the safe area: the
            // surface minus window chrome margins.
            let safe_area = to_graph_rect(ui.max_rect());
            let intrinsics = self.measure_intrinsics(ui);
            match self.graph.solve(frame_rect, safe_area, &intrinsics) {
                Ok(layout) => self.render(ui, &layout),
                Err(err) => tracing::warn!(error = %err, "layout pass failed"),
            }
        });
    }
}

/// Installed when the windowing context lacks the expected capability;
/// renders nothing.
pub struct BlankScene;

impl eframe::App for BlankScene {
    fn update(&mut self, _ctx: &egui::Context, _frame: &mut eframe::Frame) {}
}

fn to_graph_rect(rect: egui::Rect) -> anchor_kit::Rect {
    anchor_kit::Rect::new(rect.min.x, rect.min.y, rect.width(), rect.height())
}

fn to_screen_rect(rect: anchor_kit::Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.min_x(), rect.min_y()),
        egui::vec2(rect.width(), rect.height()),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use anchor_kit::{Rect, Size};

    use super::{ids, LayoutMetrics, ScreenApp, ScreenText};
    use crate::controller::events::{Orientation, ScreenEvent};

    fn standard_app() -> ScreenApp {
        ScreenApp::new(LayoutMetrics::default(), ScreenText::standard(), false)
    }

    fn extended_app() -> ScreenApp {
        ScreenApp::new(LayoutMetrics::default(), ScreenText::extended(), true)
    }

    fn intrinsics() -> BTreeMap<anchor_kit::ElementId, Size> {
        BTreeMap::from([
            (ids::BACK_BUTTON, Size::new(130.0, 32.0)),
            (ids::SEGMENT, Size::new(64.0, 28.0)),
            (ids::ADD_BUTTON, Size::new(110.0, 32.0)),
            (ids::MAIN_LABEL, Size::new(180.0, 24.0)),
            (ids::LEADING_TITLE, Size::new(90.0, 18.0)),
            (ids::TRAILING_TITLE, Size::new(95.0, 18.0)),
        ])
    }

    #[test]
    fn initial_display_is_the_placeholder() {
        assert_eq!(standard_app().display_text(), "Toggle right switch");
    }

    #[test]
    fn segment_zero_shows_the_short_text_exactly() {
        let mut app = standard_app();
        app.handle_event(ScreenEvent::SegmentSelected { index: 0 });
        assert_eq!(app.display_text(), "Short text");
        assert_eq!(app.selected_segment, Some(0));
    }

    #[test]
    fn segment_one_shows_the_wide_text_exactly() {
        let mut app = standard_app();
        app.handle_event(ScreenEvent::SegmentSelected { index: 1 });
        assert_eq!(
            app.display_text(),
            "If you set a segmented control to have a momentary style, \
             a segment doesn’t show itself as selected (blue background) \
             when the user touches it. The disclosure button is always \
             momentary and doesn’t affect the actual selection."
        );
    }

    #[test]
    fn out_of_range_segment_index_leaves_the_text_unchanged() {
        let mut app = standard_app();
        app.handle_event(ScreenEvent::SegmentSelected { index: 1 });
        let before = app.display_text();
        app.handle_event(ScreenEvent::SegmentSelected { index: 5 });
        assert_eq!(app.display_text(), before);
        assert_eq!(app.selected_segment, Some(1));
    }

    #[test]
    fn back_button_clears_the_text_and_taps_once() {
        let mut app = standard_app();
        app.handle_event(ScreenEvent::SegmentSelected { index: 1 });
        app.handle_event(ScreenEvent::BackActivated);
        assert_eq!(app.display_text(), "");
        assert_eq!(app.back_taps, 1);
    }

    #[test]
    fn orientation_transitions_update_container_insets_in_place() {
        let mut app = extended_app();
        let declared = app.graph.constraint_count();
        assert_eq!(app.graph.offset(ids::CONTAINER_LEADING), Some(0.0));
        assert_eq!(app.graph.offset(ids::CONTAINER_TRAILING), Some(-0.0));

        app.handle_event(ScreenEvent::OrientationChanged {
            orientation: Orientation::Landscape,
        });
        assert_eq!(app.graph.offset(ids::CONTAINER_LEADING), Some(50.0));
        assert_eq!(app.graph.offset(ids::CONTAINER_TRAILING), Some(-50.0));

        app.handle_event(ScreenEvent::OrientationChanged {
            orientation: Orientation::Portrait,
        });
        assert_eq!(app.graph.offset(ids::CONTAINER_LEADING), Some(0.0));
        assert_eq!(app.graph.offset(ids::CONTAINER_TRAILING), Some(-0.0));
        assert_eq!(app.graph.constraint_count(), declared);
    }

    #[test]
    fn standard_variant_declares_no_container() {
        let mut app = standard_app();
        assert_eq!(app.graph.offset(ids::CONTAINER_LEADING), None);
        app.handle_event(ScreenEvent::OrientationChanged {
            orientation: Orientation::Landscape,
        });
        assert_eq!(app.graph.offset(ids::CONTAINER_LEADING), None);
        assert_eq!(app.orientation, Orientation::Landscape);
    }

    #[test]
    fn rebuilding_the_layout_does_not_duplicate_records() {
        let mut app = extended_app();
        let elements = app.graph.element_count();
        let constraints = app.graph.constraint_count();
        let frame = Rect::new(0.0, 0.0, 390.0, 844.0);
        let safe = Rect::new(0.0, 47.0, 390.0, 763.0);
        let before = app.graph.solve(frame, safe, &intrinsics()).expect("solve");

        app.build_layout();
        assert_eq!(app.graph.element_count(), elements);
        assert_eq!(app.graph.constraint_count(), constraints);
        let after = app.graph.solve(frame, safe, &intrinsics()).expect("solve");
        assert_eq!(after, before);
    }

    #[test]
    fn extended_variant_declares_container_and_titles() {
        assert_eq!(standard_app().graph.element_count(), 4);
        assert_eq!(standard_app().graph.constraint_count(), 11);
        assert_eq!(extended_app().graph.element_count(), 7);
        assert_eq!(extended_app().graph.constraint_count(), 19);
    }

    #[test]
    fn extended_layout_solves_to_declared_geometry() {
        let app = extended_app();
        let frame = Rect::new(0.0, 0.0, 390.0, 844.0);
        let safe = Rect::new(0.0, 47.0, 390.0, 763.0);
        let layout = app.graph.solve(frame, safe, &intrinsics()).expect("solve");

        let back = layout.rect(ids::BACK_BUTTON).expect("back");
        assert_eq!(back.min_x(), 12.0);
        assert_eq!(back.min_y(), 59.0);

        let container = layout.rect(ids::CONTAINER).expect("container");
        assert_eq!(container.min_x(), 0.0);
        assert_eq!(container.max_x(), 390.0);
        assert_eq!(container.min_y(), back.max_y() + 24.0);
        assert_eq!(container.height(), 56.0);

        let leading = layout.rect(ids::LEADING_TITLE).expect("leading title");
        let trailing = layout.rect(ids::TRAILING_TITLE).expect("trailing title");
        assert_eq!(leading.min_x(), container.min_x() + 12.0);
        assert_eq!(trailing.max_x(), container.max_x() - 12.0);
        assert_eq!(leading.mid_y(), container.mid_y());
        assert_eq!(trailing.mid_y(), container.mid_y());
    }
}
