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

//! Application configuration management.
//!
//! Persistent settings stored in TOML format via confy: the initial view,
//! the active base map, the dataset feed URLs, and layer/legend options.

use quake_layers::dataset::{EARTHQUAKES_URL, OROGENS_URL, PLATES_URL, STEPS_URL};
use quake_layers::{BaseMap, Dataset, DatasetSource, LegendTiming, Overlay, SessionOptions};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "quakemap-desktop";
const CONFIG_NAME: &str = "config";

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Base map shown at startup: "street", "topo" or "satellite"
    #[serde(default = "default_base_map")]
    pub base_map: String,

    /// Initial map center latitude
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    /// Initial map center longitude
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: f64,

    /// Weekly earthquake feed
    #[serde(default = "default_earthquakes_url")]
    pub earthquakes_url: String,

    /// Tectonic plate polygons
    #[serde(default = "default_plates_url")]
    pub plates_url: String,

    /// Orogen polygons
    #[serde(default = "default_orogens_url")]
    pub orogens_url: String,

    /// Plate-boundary steps
    #[serde(default = "default_steps_url")]
    pub steps_url: String,

    /// Also offer the unfilled "Plates" overlay (same data as Tectonic Plates)
    #[serde(default)]
    pub duplicate_plates_overlay: bool,

    /// Show the depth legend before the earthquake feed arrives
    #[serde(default)]
    pub legend_on_startup: bool,

    /// Cache base map tiles on disk
    #[serde(default = "default_true")]
    pub tile_cache: bool,

    /// Layer control panel expanded state
    #[serde(default = "default_true")]
    pub layer_panel_expanded: bool,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1
}

fn default_base_map() -> String {
    BaseMap::Street.key().to_string()
}

fn default_center_lat() -> f64 {
    37.8
}

fn default_center_lon() -> f64 {
    -96.0
}

fn default_zoom() -> f64 {
    4.0
}

fn default_earthquakes_url() -> String {
    EARTHQUAKES_URL.to_string()
}

fn default_plates_url() -> String {
    PLATES_URL.to_string()
}

fn default_orogens_url() -> String {
    OROGENS_URL.to_string()
}

fn default_steps_url() -> String {
    STEPS_URL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            base_map: default_base_map(),
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
            earthquakes_url: default_earthquakes_url(),
            plates_url: default_plates_url(),
            orogens_url: default_orogens_url(),
            steps_url: default_steps_url(),
            duplicate_plates_overlay: false,
            legend_on_startup: false,
            tile_cache: true,
            layer_panel_expanded: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Configured base map, falling back to the street map for unknown names
    pub fn base_map(&self) -> BaseMap {
        BaseMap::from_name(&self.base_map).unwrap_or_else(|| {
            log::warn!("Unknown base map '{}', using street map", self.base_map);
            BaseMap::Street
        })
    }

    pub fn session_options(&self) -> SessionOptions {
        let timing = if self.legend_on_startup {
            LegendTiming::OnStartup
        } else {
            LegendTiming::AfterEarthquakes
        };
        SessionOptions::new(self.base_map(), self.duplicate_plates_overlay).with_legend_timing(timing)
    }

    /// One source per dataset feeding the given overlays, at the configured URLs
    pub fn dataset_sources(&self, overlays: &[Overlay]) -> Vec<DatasetSource> {
        let mut sources = DatasetSource::for_overlays(overlays);
        for (dataset, url) in [
            (Dataset::Earthquakes, &self.earthquakes_url),
            (Dataset::Plates, &self.plates_url),
            (Dataset::Orogens, &self.orogens_url),
            (Dataset::Steps, &self.steps_url),
        ] {
            sources = DatasetSource::with_url(sources, dataset, url);
        }
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_map(), BaseMap::Street);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"base_map": "satellite", "duplicate_plates_overlay": true}"#)
                .unwrap();
        assert_eq!(config.base_map(), BaseMap::Satellite);
        assert!(config.duplicate_plates_overlay);
        assert!((config.zoom - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.session_options().overlays.len(), 5);
    }

    #[test]
    fn test_unknown_base_map_falls_back() {
        let config = AppConfig {
            base_map: "watercolor".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.base_map(), BaseMap::Street);
    }

    #[test]
    fn test_dataset_sources_use_configured_urls() {
        let config = AppConfig {
            orogens_url: "http://localhost:8080/orogens.json".to_string(),
            ..AppConfig::default()
        };
        let sources = config.dataset_sources(&Overlay::registered(false));
        let orogens = sources.iter().find(|s| s.dataset == Dataset::Orogens).unwrap();
        assert_eq!(orogens.url, "http://localhost:8080/orogens.json");
        let quakes = sources.iter().find(|s| s.dataset == Dataset::Earthquakes).unwrap();
        assert_eq!(quakes.url, EARTHQUAKES_URL);
    }
}
