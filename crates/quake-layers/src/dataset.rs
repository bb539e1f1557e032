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

//! Remote datasets and GeoJSON decoding.
//!
//! Data sources:
//! - Earthquakes: USGS summary feed, all events of the past seven days
//! - Plates, orogens, steps: Bird (2003) PB2002 model, GeoJSON conversion by fraxen

use geojson::{Feature, FeatureCollection, GeoJson};
use serde_json::Value as JsonValue;

use crate::error::DatasetError;

pub const EARTHQUAKES_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
pub const PLATES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_plates.json";
pub const OROGENS_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_orogens.json";
pub const STEPS_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_steps.json";

/// A remote feature collection fetched once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Earthquakes,
    Plates,
    Orogens,
    Steps,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Earthquakes,
        Dataset::Plates,
        Dataset::Orogens,
        Dataset::Steps,
    ];

    #[must_use]
    pub fn default_url(&self) -> &'static str {
        match self {
            Dataset::Earthquakes => EARTHQUAKES_URL,
            Dataset::Plates => PLATES_URL,
            Dataset::Orogens => OROGENS_URL,
            Dataset::Steps => STEPS_URL,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Earthquakes => "earthquakes",
            Dataset::Plates => "plates",
            Dataset::Orogens => "orogens",
            Dataset::Steps => "steps",
        }
    }
}

/// Decode a response body as a GeoJSON feature collection.
pub fn decode_collection(body: &[u8]) -> Result<FeatureCollection, DatasetError> {
    match GeoJson::from_reader(body).map_err(geojson::Error::from)? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) => Err(DatasetError::NotFeatureCollection("Feature")),
        GeoJson::Geometry(_) => Err(DatasetError::NotFeatureCollection("Geometry")),
    }
}

/// String form of a property: strings verbatim, numbers and booleans
/// formatted, `null` and absent as `None`.
#[must_use]
pub fn property_text(feature: &Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

#[must_use]
pub fn property_f64(feature: &Feature, key: &str) -> Option<f64> {
    feature.property(key).and_then(JsonValue::as_f64)
}

#[must_use]
pub fn property_i64(feature: &Feature, key: &str) -> Option<i64> {
    let value = feature.property(key)?;
    #[allow(clippy::cast_possible_truncation, reason = "epoch milliseconds published as floats")]
    value.as_i64().or_else(|| value.as_f64().map(|v| v as i64))
}
