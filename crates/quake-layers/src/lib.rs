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

//! Styled map layers for earthquake and plate-tectonics GeoJSON feeds.
//!
//! The crate turns remote feature collections into display-ready layers and
//! keeps track of which of them are on the map:
//!
//! - **Style**: magnitude to marker radius, depth to fill color
//! - **Renderers**: one [`StyledLayer`] per feature, with popup content
//! - **Registry**: base maps and toggleable overlay groups
//! - **Loader**: one concurrent fetch per dataset, failures isolated
//! - **Legend**: fixed depth key
//!
//! Drawing is left to a [`DisplaySurface`] implementation.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use quake_layers::{
//!     BaseMap, DataLoader, DatasetSource, DisplaySurface, HttpFetcher, LayerGroup, Legend,
//!     MapSession, Overlay, SessionOptions,
//! };
//!
//! struct Console;
//!
//! impl DisplaySurface for Console {
//!     fn set_base_map(&mut self, base: BaseMap) {
//!         println!("base map: {}", base.display_name());
//!     }
//!     fn attach_overlay(&mut self, overlay: Overlay, group: &LayerGroup) {
//!         println!("{}: {} features", overlay.display_name(), group.len());
//!     }
//!     fn attach_legend(&mut self, legend: &Legend) {
//!         println!("legend: {} entries", legend.entries.len());
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let options = SessionOptions::new(BaseMap::Street, false);
//!     let mut loader = DataLoader::spawn(
//!         Arc::new(HttpFetcher::default()),
//!         DatasetSource::for_overlays(&options.overlays),
//!     );
//!     let mut session = MapSession::new(Console, options);
//!     while let Some(event) = loader.recv().await {
//!         session.handle_event(event);
//!     }
//! }
//! ```

pub mod dataset;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod legend;
pub mod loader;
pub mod popup;
pub mod registry;
pub mod render;
pub mod session;
pub mod style;

pub use dataset::Dataset;
pub use error::DatasetError;
pub use geometry::{LonLat, PathGeometry, PathPart};
pub use layer::{Fill, LayerGroup, Shape, Style, StyledLayer};
pub use legend::{Legend, LegendEntry};
pub use loader::{DataLoader, DatasetSource, Fetch, HttpFetcher, LoadEvent};
pub use popup::{Popup, PopupLine};
pub use registry::{BaseMap, LayerRegistry, Overlay, OverlayState};
pub use render::FeatureRenderer;
pub use session::{DisplaySurface, LegendTiming, MapSession, SessionOptions};
pub use style::{depth_color, marker_radius, Color};
