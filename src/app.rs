// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The map window: a walkers slippy map acting as the session's display
//! surface, with the layer control, legend and popup on top.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use log::{debug, error, info, warn};
use quake_layers::{
    BaseMap, DataLoader, DatasetSource, DisplaySurface, Fetch, LayerGroup, Legend, LoadEvent, MapSession,
    Overlay,
};
use walkers::{lon_lat, Map, MapMemory, Tiles};

use crate::config::AppConfig;
use crate::map::{BaseTiles, OverlayPlugin, PopupTarget};
use crate::ui::{show_legend, show_popup, LayerControl};

/// What the window currently shows. Groups live in the session's registry;
/// the surface only remembers the order they arrived in, which is the
/// drawing order.
#[derive(Debug, Default)]
pub struct MapView {
    base: BaseMap,
    draw_order: Vec<Overlay>,
    legend: Option<Legend>,
}

impl MapView {
    pub fn base(&self) -> BaseMap {
        self.base
    }

    pub fn draw_order(&self) -> &[Overlay] {
        &self.draw_order
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }
}

impl DisplaySurface for MapView {
    fn set_base_map(&mut self, base: BaseMap) {
        debug!("Base map: {}", base.display_name());
        self.base = base;
    }

    fn attach_overlay(&mut self, overlay: Overlay, _group: &LayerGroup) {
        if !self.draw_order.contains(&overlay) {
            self.draw_order.push(overlay);
        }
    }

    fn attach_legend(&mut self, legend: &Legend) {
        self.legend = Some(legend.clone());
    }
}

/// Run the dataset loads on a background tokio runtime and forward each
/// outcome to the UI thread, waking it up as results arrive.
pub fn spawn_loader_thread<F: Fetch>(
    fetcher: Arc<F>,
    sources: Vec<DatasetSource>,
    ctx: egui::Context,
) -> mpsc::Receiver<LoadEvent> {
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to start loader runtime: {}", e);
                return;
            }
        };
        rt.block_on(async move {
            let mut loader = DataLoader::spawn(fetcher, sources);
            while let Some(event) = loader.recv().await {
                if tx.send(event).is_err() {
                    break; // Window closed
                }
                ctx.request_repaint();
            }
            debug!("All dataset loads finished");
        });
    });

    rx
}

pub struct QuakeMapApp {
    session: MapSession<MapView>,
    events: mpsc::Receiver<LoadEvent>,
    tiles: BaseTiles,
    map_memory: MapMemory,
    center: walkers::Position,
    popup: Option<PopupTarget>,
    layer_control: LayerControl,
    config: AppConfig,
}

impl QuakeMapApp {
    pub fn new(config: AppConfig, events: mpsc::Receiver<LoadEvent>) -> Self {
        let session = MapSession::new(MapView::default(), config.session_options());

        let mut map_memory = MapMemory::default();
        if let Err(e) = map_memory.set_zoom(config.zoom) {
            warn!("Invalid zoom {} in config: {:?}", config.zoom, e);
        }

        Self {
            session,
            events,
            tiles: BaseTiles::new(config.tile_cache),
            map_memory,
            center: lon_lat(config.center_lon, config.center_lat),
            popup: None,
            layer_control: LayerControl::new(config.layer_panel_expanded),
            config,
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.session.handle_event(event);
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            warn!("Failed to save config: {}", e);
        }
    }
}

impl eframe::App for QuakeMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let view = self.session.surface();
                let registry = self.session.registry();
                let groups: Vec<&LayerGroup> = view
                    .draw_order()
                    .iter()
                    .filter(|overlay| registry.is_visible(**overlay))
                    .filter_map(|overlay| registry.group(*overlay))
                    .collect();

                let tiles: &mut dyn Tiles = self.tiles.get_or_create(view.base(), ctx);
                let map = Map::new(Some(tiles), &mut self.map_memory, self.center)
                    .with_plugin(OverlayPlugin::new(groups, &mut self.popup));
                ui.add(map);
            });

        if self.layer_control.render(ctx, &mut self.session) {
            let base = self.session.registry().active_base();
            info!("Switched base map to {}", base.display_name());
            self.config.base_map = base.key().to_string();
            self.save_config();
        }
        if self.layer_control.expanded != self.config.layer_panel_expanded {
            self.config.layer_panel_expanded = self.layer_control.expanded;
            self.save_config();
        }

        let (attribution, url) = self.session.registry().active_base().attribution();
        egui::Area::new(egui::Id::new("attribution"))
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(6.0, -4.0))
            .show(ctx, |ui| {
                ui.hyperlink_to(egui::RichText::new(attribution).small(), url);
            });

        if let Some(legend) = self.session.surface().legend() {
            show_legend(ctx, legend);
        }

        if let Some(target) = &self.popup {
            if !show_popup(ctx, target) {
                self.popup = None;
            }
        }

        // Spinners in the layer control need frames while loads are running
        if self.session.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_layers::{Shape, Style, StyledLayer};

    fn group() -> LayerGroup {
        LayerGroup::from(vec![StyledLayer {
            shape: Shape::Marker {
                position: None,
                radius: 4.0,
            },
            style: Style::stroke(quake_layers::Color::BLACK, 1.0),
            popup: None,
        }])
    }

    #[test]
    fn test_map_view_keeps_arrival_order() {
        let mut view = MapView::default();
        view.attach_overlay(Overlay::Steps, &group());
        view.attach_overlay(Overlay::Earthquakes, &group());
        view.attach_overlay(Overlay::Steps, &group());
        assert_eq!(view.draw_order(), &[Overlay::Steps, Overlay::Earthquakes]);
    }

    #[test]
    fn test_map_view_follows_session_base_map() {
        let options = quake_layers::SessionOptions::new(BaseMap::Satellite, false);
        let mut session = MapSession::new(MapView::default(), options);
        assert_eq!(session.surface().base(), BaseMap::Satellite);
        session.select_base_map(BaseMap::Topographic);
        assert_eq!(session.surface().base(), BaseMap::Topographic);
        assert!(session.surface().legend().is_none());
    }
}
