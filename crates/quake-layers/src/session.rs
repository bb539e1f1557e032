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

//! Map session: the display surface together with the layer registry.

use log::{debug, info, warn};

use crate::layer::LayerGroup;
use crate::legend::Legend;
use crate::loader::LoadEvent;
use crate::registry::{BaseMap, LayerRegistry, Overlay};

/// The rendering side of the map: tiles, shapes, popups, controls.
///
/// The session calls each method at most once per overlay and at most once
/// for the legend.
pub trait DisplaySurface {
    fn set_base_map(&mut self, base: BaseMap);
    fn attach_overlay(&mut self, overlay: Overlay, group: &LayerGroup);
    fn attach_legend(&mut self, legend: &Legend);
}

/// When the legend is added to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendTiming {
    /// Once the earthquake overlay has loaded.
    #[default]
    AfterEarthquakes,
    /// Immediately, independent of any dataset.
    OnStartup,
}

/// Session construction options.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub base_map: BaseMap,
    pub overlays: Vec<Overlay>,
    pub legend_timing: LegendTiming,
}

impl SessionOptions {
    #[must_use]
    pub fn new(base_map: BaseMap, duplicate_plates: bool) -> Self {
        Self {
            base_map,
            overlays: Overlay::registered(duplicate_plates),
            legend_timing: LegendTiming::default(),
        }
    }

    #[must_use]
    pub fn with_legend_timing(mut self, timing: LegendTiming) -> Self {
        self.legend_timing = timing;
        self
    }
}

/// Owns the display surface, the layer registry and the legend for the
/// lifetime of the map.
#[derive(Debug)]
pub struct MapSession<S> {
    surface: S,
    registry: LayerRegistry,
    legend: Legend,
    legend_attached: bool,
    legend_timing: LegendTiming,
}

impl<S: DisplaySurface> MapSession<S> {
    #[must_use]
    pub fn new(mut surface: S, options: SessionOptions) -> Self {
        surface.set_base_map(options.base_map);
        let mut session = Self {
            surface,
            registry: LayerRegistry::new(options.base_map, &options.overlays),
            legend: Legend::depth(),
            legend_attached: false,
            legend_timing: options.legend_timing,
        };
        if session.legend_timing == LegendTiming::OnStartup {
            session.attach_legend();
        }
        session
    }

    /// Apply one loader outcome.
    pub fn handle_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Loaded { overlay, group } => self.attach_overlay(overlay, group),
            LoadEvent::Failed {
                dataset,
                overlays,
                error,
            } => {
                warn!(
                    "{} unavailable, {} overlay(s) left empty",
                    dataset.as_str(),
                    overlays.len()
                );
                for overlay in overlays {
                    self.registry.mark_failed(overlay, error.to_string());
                }
            }
        }
    }

    /// Register a rendered group and put it on the surface. A group that is
    /// already attached is left alone.
    pub fn attach_overlay(&mut self, overlay: Overlay, group: LayerGroup) {
        let count = group.len();
        if !self.registry.attach(overlay, group) {
            debug!("Ignoring repeated attach of {}", overlay.display_name());
            return;
        }
        if let Some(group) = self.registry.group(overlay) {
            self.surface.attach_overlay(overlay, group);
        }
        info!("{} layer added ({} features)", overlay.display_name(), count);

        if overlay == Overlay::Earthquakes && self.legend_timing == LegendTiming::AfterEarthquakes {
            self.attach_legend();
        }
    }

    /// Add the legend to the surface if it is not there yet.
    pub fn attach_legend(&mut self) {
        if self.legend_attached {
            return;
        }
        self.surface.attach_legend(&self.legend);
        self.legend_attached = true;
    }

    pub fn select_base_map(&mut self, base: BaseMap) {
        if self.registry.set_active_base(base) {
            self.surface.set_base_map(base);
        }
    }

    /// Toggle an overlay. Only loaded overlays can be toggled.
    pub fn set_overlay_visible(&mut self, overlay: Overlay, visible: bool) -> bool {
        self.registry.set_visible(overlay, visible)
    }

    #[must_use]
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    #[must_use]
    pub fn legend(&self) -> Option<&Legend> {
        self.legend_attached.then_some(&self.legend)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Whether any overlay is still waiting on its fetch.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.registry.pending_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::loader::tests::{collect, StubFetcher};
    use crate::loader::{DataLoader, DatasetSource};
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct RecordingSurface {
        base_maps: Vec<BaseMap>,
        overlays: Vec<(Overlay, usize)>,
        legends: usize,
    }

    impl DisplaySurface for RecordingSurface {
        fn set_base_map(&mut self, base: BaseMap) {
            self.base_maps.push(base);
        }

        fn attach_overlay(&mut self, overlay: Overlay, group: &LayerGroup) {
            self.overlays.push((overlay, group.len()));
        }

        fn attach_legend(&mut self, _legend: &Legend) {
            self.legends += 1;
        }
    }

    async fn loaded_session(missing: Option<Dataset>) -> MapSession<RecordingSurface> {
        let options = SessionOptions::new(BaseMap::Street, false);
        let loader = DataLoader::spawn(
            Arc::new(StubFetcher::with_all_except(missing)),
            DatasetSource::for_overlays(&options.overlays),
        );
        let mut session = MapSession::new(RecordingSurface::default(), options);
        for event in collect(loader).await {
            session.handle_event(event);
        }
        session
    }

    #[tokio::test]
    async fn test_plates_failure_leaves_group_detached() {
        let session = loaded_session(Some(Dataset::Plates)).await;
        let registry = session.registry();

        assert!(registry.group(Overlay::TectonicPlates).unwrap().is_empty());
        assert!(!registry.is_attached(Overlay::TectonicPlates));
        assert!(!session
            .surface()
            .overlays
            .iter()
            .any(|(o, _)| *o == Overlay::TectonicPlates));

        for overlay in [Overlay::Earthquakes, Overlay::Orogens, Overlay::Steps] {
            assert!(registry.is_attached(overlay));
            assert!(registry.is_visible(overlay));
        }
        assert_eq!(session.surface().overlays.len(), 3);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_everything_fails_map_still_usable() {
        struct Offline;
        impl crate::loader::Fetch for Offline {
            async fn fetch(&self, _url: &str) -> Result<Vec<u8>, crate::DatasetError> {
                Err(crate::DatasetError::Transport("offline".to_string()))
            }
        }

        let options = SessionOptions::new(BaseMap::Topographic, false);
        let loader = DataLoader::spawn(Arc::new(Offline), DatasetSource::for_overlays(&options.overlays));
        let mut session = MapSession::new(RecordingSurface::default(), options);
        for event in collect(loader).await {
            session.handle_event(event);
        }

        assert!(session.surface().overlays.is_empty());
        assert_eq!(session.surface().base_maps, vec![BaseMap::Topographic]);
        assert_eq!(session.surface().legends, 0);
        assert!(session.legend().is_none());
        assert_eq!(session.registry().visible_groups().count(), 0);
    }

    #[tokio::test]
    async fn test_legend_attached_once_after_earthquakes() {
        let mut session = loaded_session(None).await;
        assert_eq!(session.surface().legends, 1);

        session.attach_legend();
        session.attach_overlay(Overlay::Earthquakes, LayerGroup::new());
        assert_eq!(session.surface().legends, 1);
        assert_eq!(session.legend().unwrap().entries.len(), 6);
    }

    #[test]
    fn test_legend_on_startup() {
        let options = SessionOptions::new(BaseMap::Street, false)
            .with_legend_timing(LegendTiming::OnStartup);
        let session = MapSession::new(RecordingSurface::default(), options);
        assert_eq!(session.surface().legends, 1);
        assert!(session.is_loading());
    }

    #[tokio::test]
    async fn test_repeated_attach_does_not_duplicate() {
        let mut session = loaded_session(None).await;
        let before = session.surface().overlays.len();
        let earthquakes = session.registry().group(Overlay::Earthquakes).unwrap().clone();

        session.attach_overlay(Overlay::Earthquakes, earthquakes);
        assert_eq!(session.surface().overlays.len(), before);
        assert_eq!(session.registry().group(Overlay::Earthquakes).unwrap().len(), 2);
    }

    #[test]
    fn test_base_map_switch() {
        let mut session = MapSession::new(
            RecordingSurface::default(),
            SessionOptions::new(BaseMap::Street, false),
        );
        session.select_base_map(BaseMap::Street);
        session.select_base_map(BaseMap::Satellite);
        assert_eq!(session.surface().base_maps, vec![BaseMap::Street, BaseMap::Satellite]);
        assert_eq!(session.registry().active_base(), BaseMap::Satellite);
    }
}
