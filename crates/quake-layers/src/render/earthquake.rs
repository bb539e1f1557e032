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

use geojson::{Feature, Value};
use log::warn;

use super::{feature_label, number_text, FeatureRenderer};
use crate::dataset::{property_f64, property_i64, property_text};
use crate::geometry::LonLat;
use crate::layer::{Fill, Shape, Style, StyledLayer};
use crate::popup::{local_event_time, Popup, PopupLine};
use crate::style::{depth_color, marker_radius, Color};

const FILL_OPACITY: f32 = 0.8;

/// Circle markers sized by magnitude and colored by depth.
#[derive(Debug, Clone, Copy)]
pub struct EarthquakeRenderer {
    format_time: fn(i64) -> Option<String>,
}

impl EarthquakeRenderer {
    /// Renderer showing event times in the local time zone.
    #[must_use]
    pub fn new() -> Self {
        Self::with_time_format(local_event_time)
    }

    #[must_use]
    pub fn with_time_format(format_time: fn(i64) -> Option<String>) -> Self {
        Self { format_time }
    }
}

impl Default for EarthquakeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureRenderer for EarthquakeRenderer {
    fn render_feature(&self, feature: &Feature) -> StyledLayer {
        let point = feature.geometry.as_ref().and_then(|g| match &g.value {
            Value::Point(position) => Some(position),
            _ => None,
        });
        let position = point.and_then(|p| LonLat::from_position(p));
        let depth = point.and_then(|p| p.get(2).copied());
        let magnitude = property_f64(feature, "mag");

        if magnitude.is_none() {
            warn!("Earthquake {} has no magnitude", feature_label(feature));
        }
        if position.is_none() {
            warn!("Earthquake {} has no point geometry", feature_label(feature));
        } else if depth.is_none() {
            warn!("Earthquake {} has no depth coordinate", feature_label(feature));
        }

        let style = Style::stroke(Color::BLACK, 1.0).with_fill(Fill::Solid {
            color: depth_color(depth.unwrap_or(f64::NAN)),
            opacity: FILL_OPACITY,
        });

        let time = property_i64(feature, "time")
            .and_then(self.format_time)
            .unwrap_or_default();

        let popup = Popup::new(PopupLine::plain(
            property_text(feature, "place").unwrap_or_default(),
        ))
        .with_rule()
        .with_line(PopupLine::labeled("Magnitude", number_text(magnitude)))
        .with_line(PopupLine::labeled("Depth", number_text(depth)).with_suffix("km"))
        .with_line(PopupLine::labeled("Time", time));

        StyledLayer {
            shape: Shape::Marker {
                position,
                radius: marker_radius(magnitude.unwrap_or(0.0)),
            },
            style,
            popup: Some(popup),
        }
    }
}
