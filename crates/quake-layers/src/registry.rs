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

//! Named base maps and overlay groups exposed to the layer control.

use crate::dataset::Dataset;
use crate::layer::LayerGroup;
use crate::render::{
    EarthquakeRenderer, FeatureRenderer, OrogenRenderer, PlateRenderer, StepRenderer,
};

/// Background tile layer. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BaseMap {
    #[default]
    Street,
    Topographic,
    Satellite,
}

impl BaseMap {
    pub const ALL: [BaseMap; 3] = [BaseMap::Street, BaseMap::Topographic, BaseMap::Satellite];

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            BaseMap::Street => "Street Map",
            BaseMap::Topographic => "Topographic Map",
            BaseMap::Satellite => "Satellite",
        }
    }

    /// Short key used in config files and on the command line.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            BaseMap::Street => "street",
            BaseMap::Topographic => "topo",
            BaseMap::Satellite => "satellite",
        }
    }

    /// Accepts either the key or the display name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| {
            b.key().eq_ignore_ascii_case(name) || b.display_name().eq_ignore_ascii_case(name)
        })
    }

    /// URL of one map tile.
    #[must_use]
    pub fn tile_url(&self, zoom: u8, x: u32, y: u32) -> String {
        // Subdomain load balancing (a, b, c) based on tile coordinates
        let subdomain = ['a', 'b', 'c'][((x + y) % 3) as usize];
        match self {
            BaseMap::Street => {
                format!("https://{subdomain}.tile.openstreetmap.org/{zoom}/{x}/{y}.png")
            }
            BaseMap::Topographic => {
                format!("https://{subdomain}.tile.opentopomap.org/{zoom}/{x}/{y}.png")
            }
            BaseMap::Satellite => format!(
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{zoom}/{y}/{x}"
            ),
        }
    }

    #[must_use]
    pub fn attribution(&self) -> (&'static str, &'static str) {
        match self {
            BaseMap::Street => (
                "© OpenStreetMap contributors",
                "https://www.openstreetmap.org/copyright",
            ),
            BaseMap::Topographic => (
                "© OpenTopoMap contributors",
                "https://www.opentopomap.org",
            ),
            BaseMap::Satellite => (
                "Tiles © Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community",
                "https://www.esri.com",
            ),
        }
    }

    #[must_use]
    pub fn max_zoom(&self) -> u8 {
        match self {
            BaseMap::Street | BaseMap::Satellite => 19,
            BaseMap::Topographic => 17,
        }
    }
}

/// Toggleable layer drawn above the base map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Earthquakes,
    TectonicPlates,
    Orogens,
    Steps,
    /// Unfilled copy of the tectonic plates, fed from the same payload.
    Plates,
}

impl Overlay {
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Overlay::Earthquakes => "Earthquakes",
            Overlay::TectonicPlates => "Tectonic Plates",
            Overlay::Orogens => "Orogens",
            Overlay::Steps => "Steps",
            Overlay::Plates => "Plates",
        }
    }

    /// Dataset whose payload feeds this overlay.
    #[must_use]
    pub fn dataset(&self) -> Dataset {
        match self {
            Overlay::Earthquakes => Dataset::Earthquakes,
            Overlay::TectonicPlates | Overlay::Plates => Dataset::Plates,
            Overlay::Orogens => Dataset::Orogens,
            Overlay::Steps => Dataset::Steps,
        }
    }

    #[must_use]
    pub fn renderer(&self) -> Box<dyn FeatureRenderer + Send + Sync> {
        match self {
            Overlay::Earthquakes => Box::new(EarthquakeRenderer::new()),
            Overlay::TectonicPlates => Box::new(PlateRenderer::tectonic()),
            Overlay::Plates => Box::new(PlateRenderer::outline()),
            Overlay::Orogens => Box::new(OrogenRenderer),
            Overlay::Steps => Box::new(StepRenderer),
        }
    }

    /// Overlays shown in the layer control, in control order.
    #[must_use]
    pub fn registered(duplicate_plates: bool) -> Vec<Overlay> {
        let mut overlays = vec![
            Overlay::Earthquakes,
            Overlay::TectonicPlates,
            Overlay::Orogens,
            Overlay::Steps,
        ];
        if duplicate_plates {
            overlays.push(Overlay::Plates);
        }
        overlays
    }
}

/// Load state of one overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayState {
    Pending,
    Attached,
    Failed(String),
}

#[derive(Debug)]
struct OverlayEntry {
    overlay: Overlay,
    group: LayerGroup,
    state: OverlayState,
    visible: bool,
}

/// Base maps and overlay groups, keyed by display name.
#[derive(Debug)]
pub struct LayerRegistry {
    active_base: BaseMap,
    overlays: Vec<OverlayEntry>,
}

impl LayerRegistry {
    #[must_use]
    pub fn new(active_base: BaseMap, overlays: &[Overlay]) -> Self {
        Self {
            active_base,
            overlays: overlays
                .iter()
                .map(|&overlay| OverlayEntry {
                    overlay,
                    group: LayerGroup::new(),
                    state: OverlayState::Pending,
                    visible: false,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn base_maps(&self) -> &'static [BaseMap] {
        &BaseMap::ALL
    }

    #[must_use]
    pub fn active_base(&self) -> BaseMap {
        self.active_base
    }

    /// Switch base map. Returns `true` if the active base map changed.
    pub fn set_active_base(&mut self, base: BaseMap) -> bool {
        let changed = self.active_base != base;
        self.active_base = base;
        changed
    }

    /// Registered overlays in control order.
    pub fn overlays(&self) -> impl Iterator<Item = Overlay> + '_ {
        self.overlays.iter().map(|e| e.overlay)
    }

    /// Look up an overlay by its display name.
    #[must_use]
    pub fn overlay_named(&self, name: &str) -> Option<Overlay> {
        self.overlays().find(|o| o.display_name() == name)
    }

    fn entry(&self, overlay: Overlay) -> Option<&OverlayEntry> {
        self.overlays.iter().find(|e| e.overlay == overlay)
    }

    fn entry_mut(&mut self, overlay: Overlay) -> Option<&mut OverlayEntry> {
        self.overlays.iter_mut().find(|e| e.overlay == overlay)
    }

    #[must_use]
    pub fn group(&self, overlay: Overlay) -> Option<&LayerGroup> {
        self.entry(overlay).map(|e| &e.group)
    }

    #[must_use]
    pub fn state(&self, overlay: Overlay) -> Option<&OverlayState> {
        self.entry(overlay).map(|e| &e.state)
    }

    #[must_use]
    pub fn is_attached(&self, overlay: Overlay) -> bool {
        self.state(overlay) == Some(&OverlayState::Attached)
    }

    #[must_use]
    pub fn is_visible(&self, overlay: Overlay) -> bool {
        self.entry(overlay).is_some_and(|e| e.visible)
    }

    /// Populate and show an overlay.
    ///
    /// Returns `false` without touching the group if the overlay is not
    /// registered or was already attached.
    pub fn attach(&mut self, overlay: Overlay, group: LayerGroup) -> bool {
        let Some(entry) = self.entry_mut(overlay) else {
            return false;
        };
        if entry.state == OverlayState::Attached {
            return false;
        }
        entry.group = group;
        entry.state = OverlayState::Attached;
        entry.visible = true;
        true
    }

    /// Record a load failure. The group stays empty and hidden.
    pub fn mark_failed(&mut self, overlay: Overlay, reason: impl Into<String>) {
        if let Some(entry) = self.entry_mut(overlay) {
            if entry.state == OverlayState::Pending {
                entry.state = OverlayState::Failed(reason.into());
            }
        }
    }

    /// Toggle an attached overlay. Returns `false` if it cannot be toggled.
    pub fn set_visible(&mut self, overlay: Overlay, visible: bool) -> bool {
        match self.entry_mut(overlay) {
            Some(entry) if entry.state == OverlayState::Attached => {
                entry.visible = visible;
                true
            }
            _ => false,
        }
    }

    /// Number of overlays still waiting on their fetch.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.overlays
            .iter()
            .filter(|e| e.state == OverlayState::Pending)
            .count()
    }

    /// Attached, visible overlays with their groups, in control order.
    pub fn visible_groups(&self) -> impl Iterator<Item = (Overlay, &LayerGroup)> + '_ {
        self.overlays
            .iter()
            .filter(|e| e.visible && e.state == OverlayState::Attached)
            .map(|e| (e.overlay, &e.group))
    }
}
