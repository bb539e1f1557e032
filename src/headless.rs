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

//! Headless mode: load every dataset, log what would be drawn, and exit.

use std::sync::Arc;

use log::info;
use quake_layers::{
    BaseMap, DataLoader, DisplaySurface, Fetch, LayerGroup, Legend, MapSession, Overlay, Shape,
};

use crate::config::AppConfig;

/// Display surface that only logs what it is given
#[derive(Debug, Default)]
pub struct LogSurface {
    attached: Vec<(Overlay, usize)>,
    legend_shown: bool,
}

impl LogSurface {
    pub fn attached(&self) -> &[(Overlay, usize)] {
        &self.attached
    }
}

impl DisplaySurface for LogSurface {
    fn set_base_map(&mut self, base: BaseMap) {
        info!("Base map: {}", base.display_name());
    }

    fn attach_overlay(&mut self, overlay: Overlay, group: &LayerGroup) {
        let drawable = group.iter().filter(|layer| layer.shape.is_drawable()).count();
        let markers = group
            .iter()
            .filter(|layer| matches!(layer.shape, Shape::Marker { .. }))
            .count();
        info!(
            "{}: {} layers ({} drawable, {} markers)",
            overlay.display_name(),
            group.len(),
            drawable,
            markers
        );
        self.attached.push((overlay, group.len()));
    }

    fn attach_legend(&mut self, legend: &Legend) {
        info!("Legend: {}", legend.title);
        for entry in &legend.entries {
            info!("  {:>8}  {}", entry.label, entry.color);
        }
        self.legend_shown = true;
    }
}

/// Load all datasets on the given runtime and print a per-overlay summary.
pub fn run<F: Fetch>(runtime: &tokio::runtime::Runtime, config: &AppConfig, fetcher: Arc<F>) {
    let mut session = MapSession::new(LogSurface::default(), config.session_options());
    let overlays: Vec<Overlay> = session.registry().overlays().collect();
    let sources = config.dataset_sources(&overlays);

    runtime.block_on(async {
        let mut loader = DataLoader::spawn(fetcher, sources);
        while let Some(event) = loader.recv().await {
            session.handle_event(event);
        }
    });

    info!("{} overlay(s) attached", session.surface().attached().len());
    println!("{:<18} {:>8}  Status", "Overlay", "Layers");
    for overlay in overlays {
        let count = session.registry().group(overlay).map_or(0, LayerGroup::len);
        let status = match session.registry().state(overlay) {
            Some(quake_layers::OverlayState::Attached) => "loaded".to_string(),
            Some(quake_layers::OverlayState::Failed(reason)) => format!("failed: {reason}"),
            _ => "pending".to_string(),
        };
        println!("{:<18} {:>8}  {}", overlay.display_name(), count, status);
    }
    if session.surface().legend_shown {
        println!("Legend attached");
    }
}
