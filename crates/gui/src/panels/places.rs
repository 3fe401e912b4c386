//! Places panel: the pinned places plus the ones that did not make it onto the map.

use egui::{Color32, RichText, ScrollArea, Ui};

use placemap_core::{Marker, RegionFilter, ResolvedPlace};

/// Why a search result has no pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiddenReason {
    NotLocated,
    OutsideRegion,
}

impl HiddenReason {
    fn label(self) -> &'static str {
        match self {
            Self::NotLocated => "address not found",
            Self::OutsideRegion => "outside region",
        }
    }
}

/// Results of the last cycle that the filter kept off the map, in search order.
pub fn hidden_places<'a>(
    resolved: &'a [ResolvedPlace],
    filter: &RegionFilter,
) -> Vec<(&'a ResolvedPlace, HiddenReason)> {
    resolved
        .iter()
        .filter(|p| !filter.accepts(p))
        .map(|p| {
            let reason = if p.is_resolved() {
                HiddenReason::OutsideRegion
            } else {
                HiddenReason::NotLocated
            };
            (p, reason)
        })
        .collect()
}

/// Show the places panel. Returns the marker index the user clicked.
pub fn show_places(
    ui: &mut Ui,
    markers: &[Marker],
    selected: Option<usize>,
    hidden: &[(&ResolvedPlace, HiddenReason)],
) -> Option<usize> {
    let mut clicked = None;

    ui.heading("Places");
    ui.label(format!("{} on the map", markers.len()));
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if markers.is_empty() {
                ui.label(RichText::new("No places to show").italics());
            }

            for (idx, marker) in markers.iter().enumerate() {
                let resp = ui.selectable_label(selected == Some(idx), &marker.record.title);
                if resp.on_hover_text(&marker.record.address).clicked() {
                    clicked = Some(idx);
                }
            }

            if !hidden.is_empty() {
                ui.add_space(8.0);
                ui.collapsing(format!("Not on the map ({})", hidden.len()), |ui| {
                    for (place, reason) in hidden {
                        ui.label(&place.record.title);
                        ui.label(
                            RichText::new(format!("  {}", reason.label()))
                                .color(Color32::GRAY)
                                .size(11.0),
                        );
                    }
                });
            }
        });

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;
    use placemap_core::{Coord, PlaceRecord};

    #[test]
    fn hidden_places_explains_each_omission() {
        let resolved = vec![
            ResolvedPlace::resolved(PlaceRecord::new("in", "a", "u"), Coord::new(42.37, -72.52)),
            ResolvedPlace::unresolved(PlaceRecord::new("lost", "b", "u")),
            ResolvedPlace::resolved(PlaceRecord::new("nyc", "c", "u"), Coord::new(40.71, -74.0)),
        ];

        let hidden = hidden_places(&resolved, &RegionFilter::default());
        let summary: Vec<_> = hidden.iter().map(|(p, r)| (p.title(), *r)).collect();
        assert_eq!(
            summary,
            [
                ("lost", HiddenReason::NotLocated),
                ("nyc", HiddenReason::OutsideRegion)
            ]
        );

        let hidden = hidden_places(&resolved, &RegionFilter::Disabled);
        assert_eq!(hidden.len(), 1);
    }
}
