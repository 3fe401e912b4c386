//! Main application: PlaceMapApp implements eframe::App.

use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use egui_dock::{DockArea, DockState, Style, TabViewer};
use tracing::{debug, info};

use placemap_cloud::blocking::{http_pipeline, SearchPipelineBlocking};
use placemap_cloud::geocoder::API_KEY_ENV;
use placemap_cloud::{GeocoderOptions, PipelineOptions, SearchEndpoint, SearchOutcome};
use placemap_core::{AutoSearch, MapView, MapViewer, MarkerRenderer, ResolvedPlace, SearchQuery};

use crate::dock::{create_dock_state, PanelId};
use crate::panels::console::show_console;
use crate::panels::places::{hidden_places, show_places, HiddenReason};
use crate::panels::popup::show_popup;
use crate::render::map_tiles::{show_basemap, BasemapState, MapOutput};
use crate::state::{AppMessage, ChannelRenderer, LogEntry};

/// The main application state.
pub struct PlaceMapApp {
    /// Dock state for panel layout.
    dock_state: DockState<PanelId>,

    /// Message channels for the search worker thread.
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,

    /// Markers, popup and search state.
    viewer: MapViewer,

    query: SearchQuery,
    endpoint: SearchEndpoint,
    geocoder: GeocoderOptions,
    options: PipelineOptions,

    /// Fires the first search shortly after the first frame.
    auto_search: AutoSearch,
    first_frame: Option<Instant>,

    /// Outcome of the last successful cycle.
    last_outcome: Option<SearchOutcome>,

    /// Error notifications not yet dismissed.
    alerts: Vec<String>,

    /// Console log entries.
    logs: Vec<LogEntry>,

    basemap: BasemapState,
}

impl PlaceMapApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut visuals = egui::Visuals::dark();
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        cc.egui_ctx.set_visuals(visuals);

        let (tx, rx) = crossbeam_channel::unbounded();
        let view = MapView::default();

        let mut app = Self {
            dock_state: create_dock_state(),
            tx,
            rx,
            viewer: MapViewer::new(view),
            query: SearchQuery::default(),
            endpoint: SearchEndpoint::from_env(),
            geocoder: GeocoderOptions::from_env(),
            options: PipelineOptions::default(),
            auto_search: AutoSearch::default(),
            first_frame: None,
            last_outcome: None,
            alerts: Vec::new(),
            logs: Vec::new(),
            basemap: BasemapState::new(&cc.egui_ctx, &view),
        };

        app.logs.push(LogEntry::info("PlaceMap started"));
        app.logs.push(LogEntry::info(format!(
            "Search endpoint: {}",
            app.endpoint.search_url()
        )));
        if app.geocoder.api_key.is_none() {
            app.logs.push(LogEntry::warning(format!(
                "{} is not set; addresses cannot be located",
                API_KEY_ENV
            )));
        }

        app
    }

    /// Process pending messages from the search worker.
    fn process_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                AppMessage::MarkersReady { places } => {
                    self.viewer.render_markers(&places);
                }

                AppMessage::SearchFailed { message } => {
                    self.logs.push(LogEntry::error(message.clone()));
                    self.viewer.report_error(&message);
                }

                AppMessage::SearchFinished { outcome, elapsed } => {
                    self.viewer.finish_search();
                    if let Some(outcome) = outcome {
                        self.logs.push(LogEntry::success(format!(
                            "{} results, {} unresolved, {} on the map ({:.1?})",
                            outcome.resolved.len(),
                            outcome.unresolved_count(),
                            self.viewer.markers().len(),
                            elapsed
                        )));
                        self.last_outcome = Some(outcome);
                    }
                }

                AppMessage::Log(entry) => {
                    self.logs.push(entry);
                }
            }
        }

        self.alerts.extend(self.viewer.take_notifications());
    }

    /// Start a search cycle in a background thread.
    fn launch_search(&mut self) {
        if let Err(e) = self.viewer.begin_search() {
            debug!("search trigger ignored: {}", e);
            return;
        }

        info!("searching for '{}' in {}", self.query.category, self.query.location);
        self.logs.push(LogEntry::info(format!(
            "Searching for {} in {} ...",
            self.query.category, self.query.location
        )));

        let tx = self.tx.clone();
        let query = self.query.clone();
        let endpoint = self.endpoint.clone();
        let geocoder = self.geocoder.clone();
        let options = self.options.clone();

        std::thread::spawn(move || {
            let start = Instant::now();
            let mut renderer = ChannelRenderer::new(tx.clone());

            let outcome =
                match http_pipeline(endpoint, geocoder, options).and_then(SearchPipelineBlocking::new)
                {
                    Ok(pipeline) => pipeline.run_cycle(&query, &mut renderer).ok(),
                    Err(e) => {
                        let _ = tx.send(AppMessage::Log(LogEntry::error(format!(
                            "Failed to create search client: {}",
                            e
                        ))));
                        renderer.report_error(&format!("Search failed: {}", e));
                        None
                    }
                };

            let _ = tx.send(AppMessage::SearchFinished {
                outcome,
                elapsed: start.elapsed(),
            });
        });
    }

    /// Fire the delayed first search, or schedule a repaint for it.
    fn poll_auto_search(&mut self, ctx: &egui::Context) {
        let first = *self.first_frame.get_or_insert_with(Instant::now);
        let elapsed = first.elapsed();

        if self.auto_search.poll(elapsed) {
            self.launch_search();
        } else if let Some(remaining) = self.auto_search.remaining(elapsed) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) -> bool {
        let mut search_clicked = false;
        let is_searching = self.viewer.is_searching();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let label = if is_searching {
                    "Searching...".to_string()
                } else {
                    search_label(&self.query.category)
                };
                if ui
                    .add_enabled(!is_searching, egui::Button::new(label))
                    .clicked()
                {
                    search_clicked = true;
                }
                if is_searching {
                    ui.spinner();
                }

                ui.separator();
                ui.label(format!("{} markers", self.viewer.markers().len()));
                if let Some(region) = self.options.filter.region() {
                    ui.separator();
                    ui.label(format!(
                        "Region: {:.2}..{:.2} N, {:.2}..{:.2} E",
                        region.min_lat, region.max_lat, region.min_lng, region.max_lng
                    ));
                }
            });
        });

        search_clicked
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alerts.first() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.separator();
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.alerts.remove(0);
        }
    }
}

impl eframe::App for PlaceMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages();
        self.poll_auto_search(ctx);

        if self.viewer.is_searching() {
            ctx.request_repaint();
        }

        if self.show_toolbar(ctx) {
            self.launch_search();
        }

        self.show_alert(ctx);

        // Main dock area
        let hidden = self
            .last_outcome
            .as_ref()
            .map(|o| hidden_places(&o.resolved, &self.options.filter))
            .unwrap_or_default();

        let mut tab_viewer = PlaceMapTabViewer {
            viewer: &self.viewer,
            hidden: &hidden,
            logs: &self.logs,
            basemap: &mut self.basemap,
            map_output: MapOutput::default(),
            place_clicked: None,
        };

        DockArea::new(&mut self.dock_state)
            .style(Style::from_egui(ctx.style().as_ref()))
            .show(ctx, &mut tab_viewer);

        let map_output = tab_viewer.map_output;
        let place_clicked = tab_viewer.place_clicked;
        drop(tab_viewer);

        if let Some(idx) = map_output.clicked.or(place_clicked) {
            self.viewer.select(idx);
            // The pin anchors the popup on the next frame.
            ctx.request_repaint();
            return;
        }

        if let (Some(anchor), Some(marker)) = (map_output.popup_anchor, self.viewer.selected()) {
            if show_popup(ctx, anchor, marker) {
                self.viewer.close_popup();
            }
        }
    }
}

/// TabViewer implementation for egui_dock.
struct PlaceMapTabViewer<'a> {
    viewer: &'a MapViewer,
    hidden: &'a [(&'a ResolvedPlace, HiddenReason)],
    logs: &'a [LogEntry],
    basemap: &'a mut BasemapState,
    /// Clicks and popup anchor from the map tab.
    map_output: MapOutput,
    /// Marker picked in the places list.
    place_clicked: Option<usize>,
}

impl<'a> TabViewer for PlaceMapTabViewer<'a> {
    type Tab = PanelId;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        tab.to_string().into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            PanelId::Map => {
                self.map_output = show_basemap(
                    ui,
                    self.basemap,
                    self.viewer.markers(),
                    self.viewer.selected_index(),
                );
            }

            PanelId::Places => {
                if let Some(idx) = show_places(
                    ui,
                    self.viewer.markers(),
                    self.viewer.selected_index(),
                    self.hidden,
                ) {
                    self.place_clicked = Some(idx);
                }
            }

            PanelId::Console => {
                show_console(ui, self.logs);
            }
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }
}

/// Search button text, e.g. "Search Pediatricians".
fn search_label(category: &str) -> String {
    let mut chars = category.trim().chars();
    match chars.next() {
        Some(first) => {
            let plural = if category.trim().ends_with('s') { "" } else { "s" };
            format!("Search {}{}{}", first.to_uppercase(), chars.as_str(), plural)
        }
        None => "Search".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_label_pluralizes_category() {
        assert_eq!(search_label("pediatrician"), "Search Pediatricians");
        assert_eq!(search_label("dentists"), "Search Dentists");
        assert_eq!(search_label("  "), "Search");
    }
}
