//! Info popup for the selected pin.

use egui::{Align, Area, Frame, Id, Layout, Order, Pos2, RichText};

use placemap_core::Marker;

/// Offset of the popup from its pin, in screen points.
const POPUP_OFFSET: egui::Vec2 = egui::vec2(12.0, -12.0);

/// Link text for the place's map page.
const MAPS_LINK_TEXT: &str = "Open in Google Maps";

/// Show the popup for `marker` next to `anchor`. Returns `true` if the user
/// closed it.
pub fn show_popup(ctx: &egui::Context, anchor: Pos2, marker: &Marker) -> bool {
    let mut close = false;

    Area::new(Id::new("place_popup"))
        .order(Order::Foreground)
        .fixed_pos(anchor + POPUP_OFFSET)
        .show(ctx, |ui| {
            Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(280.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&marker.record.title).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            close = true;
                        }
                    });
                });
                ui.label(&marker.record.address);
                if !marker.record.maps_uri.is_empty() {
                    ui.hyperlink_to(MAPS_LINK_TEXT, &marker.record.maps_uri);
                }
            });
        });

    close
}
