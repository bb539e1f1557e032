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

//! Feature renderers.
//!
//! Each renderer turns a decoded feature collection into one [`StyledLayer`]
//! per feature, in input order. A feature with missing properties still
//! produces a layer; the gap is logged and shown as an empty value.

mod earthquake;
mod orogen;
mod plate;
mod step;

pub use earthquake::EarthquakeRenderer;
pub use orogen::OrogenRenderer;
pub use plate::PlateRenderer;
pub use step::StepRenderer;

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection};

use crate::layer::{LayerGroup, StyledLayer};

/// Trait for per-dataset renderers.
pub trait FeatureRenderer {
    fn render_feature(&self, feature: &Feature) -> StyledLayer;

    fn render(&self, collection: &FeatureCollection) -> LayerGroup {
        collection
            .features
            .iter()
            .map(|feature| self.render_feature(feature))
            .collect::<Vec<_>>()
            .into()
    }
}

/// Short identifier for log messages.
pub(crate) fn feature_label(feature: &Feature) -> String {
    match &feature.id {
        Some(Id::String(id)) => id.clone(),
        Some(Id::Number(id)) => id.to_string(),
        None => "<unnamed>".to_string(),
    }
}

/// Display form of a number, empty when absent.
pub(crate) fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
