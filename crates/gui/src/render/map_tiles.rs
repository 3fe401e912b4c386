//! Basemap rendering using walkers (OpenStreetMap slippy tiles) with place pins.

use egui::{Color32, CursorIcon, Pos2, Stroke, Ui};
use tracing::warn;
use walkers::sources::OpenStreetMap;
use walkers::{lon_lat, HttpTiles, Map, MapMemory, Plugin, Position, Projector};

use placemap_core::{Coord, MapView, Marker};

/// Pin radius in screen points.
pub const PIN_RADIUS: f32 = 7.0;

/// Clicks within this distance of a pin select it.
const HIT_RADIUS: f32 = PIN_RADIUS + 4.0;

const PIN_FILL: Color32 = Color32::from_rgb(219, 68, 55);
const PIN_SELECTED: Color32 = Color32::from_rgb(251, 188, 5);

/// Persistent basemap state (survives between frames).
pub struct BasemapState {
    pub tiles: HttpTiles,
    pub memory: MapMemory,
    /// Map center position (lon, lat).
    pub center: Position,
}

impl BasemapState {
    /// Create a basemap state showing `view`.
    pub fn new(ctx: &egui::Context, view: &MapView) -> Self {
        let mut memory = MapMemory::default();
        if memory.set_zoom(view.zoom).is_err() {
            warn!("zoom level {} rejected by the basemap", view.zoom);
        }
        Self {
            tiles: HttpTiles::new(OpenStreetMap, ctx.clone()),
            memory,
            center: to_position(view.center),
        }
    }
}

fn to_position(coord: Coord) -> Position {
    lon_lat(coord.lng, coord.lat)
}

/// What the user did on the map this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MapOutput {
    /// Index of the pin that was clicked.
    pub clicked: Option<usize>,
    /// Screen position of the selected pin, where its popup is anchored.
    pub popup_anchor: Option<Pos2>,
}

/// Index of the pin nearest to `pointer`, if any lies within `radius`.
pub fn hit_test(pins: &[Pos2], pointer: Pos2, radius: f32) -> Option<usize> {
    pins.iter()
        .enumerate()
        .map(|(i, p)| (i, p.distance(pointer)))
        .filter(|(_, d)| *d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Plugin that draws one pin per marker and reports clicks on them.
struct PlacePins<'a> {
    markers: &'a [Marker],
    selected: Option<usize>,
    output: &'a mut MapOutput,
}

impl<'a> Plugin for PlacePins<'a> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        response: &egui::Response,
        projector: &Projector,
    ) {
        let pins: Vec<Pos2> = self
            .markers
            .iter()
            .map(|m| {
                let v = projector.project(to_position(m.coord));
                egui::pos2(v.x, v.y)
            })
            .collect();

        let painter = ui.painter();
        for (i, pin) in pins.iter().enumerate() {
            let is_selected = self.selected == Some(i);
            let (fill, radius) = if is_selected {
                (PIN_SELECTED, PIN_RADIUS + 2.0)
            } else {
                (PIN_FILL, PIN_RADIUS)
            };
            painter.circle(*pin, radius, fill, Stroke::new(2.0, Color32::WHITE));
        }

        if let Some(hover) = response.hover_pos() {
            if hit_test(&pins, hover, HIT_RADIUS).is_some() {
                ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
            }
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.output.clicked = hit_test(&pins, pointer, HIT_RADIUS);
            }
        }

        self.output.popup_anchor = self.selected.and_then(|i| pins.get(i).copied());
    }
}

/// Render the basemap with a pin per marker.
pub fn show_basemap(
    ui: &mut Ui,
    state: &mut BasemapState,
    markers: &[Marker],
    selected: Option<usize>,
) -> MapOutput {
    let mut output = MapOutput::default();

    let map = Map::new(Some(&mut state.tiles), &mut state.memory, state.center).with_plugin(
        PlacePins {
            markers,
            selected,
            output: &mut output,
        },
    );
    ui.add(map);

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_picks_nearest_pin_in_range() {
        let pins = [egui::pos2(10.0, 10.0), egui::pos2(16.0, 10.0)];
        assert_eq!(hit_test(&pins, egui::pos2(15.0, 10.0), HIT_RADIUS), Some(1));
        assert_eq!(hit_test(&pins, egui::pos2(9.0, 11.0), HIT_RADIUS), Some(0));
    }

    #[test]
    fn hit_test_misses_outside_radius() {
        let pins = [egui::pos2(10.0, 10.0)];
        assert_eq!(hit_test(&pins, egui::pos2(40.0, 40.0), HIT_RADIUS), None);
        assert_eq!(hit_test(&[], egui::pos2(0.0, 0.0), HIT_RADIUS), None);
    }
}
