//! Rect-scoped placement helper and the two-option segmented switch.

use eframe::egui;

/// Runs `add` inside a child ui confined and clipped to `rect`.
pub fn ui_in_rect(ui: &mut egui::Ui, rect: egui::Rect, add: impl FnOnce(&mut egui::Ui)) {
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect)
            .layout(egui::Layout::left_to_right(egui::Align::Center)),
    );
    child.set_clip_rect(rect);
    add(&mut child);
}

/// Multi-option toggle exposing a single selected index. Returns the index
/// that became selected this frame, if any; re-clicking the active segment
/// reports nothing, matching value-changed semantics.
pub fn segmented_switch(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    items: &[&str],
    selected: Option<usize>,
) -> Option<usize> {
    let mut picked = None;
    ui_in_rect(ui, rect, |ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        for (index, item) in items.iter().enumerate() {
            let active = selected == Some(index);
            if ui.selectable_label(active, *item).clicked() && !active {
                picked = Some(index);
            }
        }
    });
    picked
}
