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

use geojson::Feature;
use log::warn;

use super::{feature_label, FeatureRenderer};
use crate::dataset::property_text;
use crate::geometry::{geometry_type_name, PathGeometry};
use crate::layer::{Fill, Shape, Style, StyledLayer};
use crate::popup::{Popup, PopupLine};
use crate::style::Color;

const FILL_OPACITY: f32 = 0.3;

/// Translucent purple orogen polygons.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrogenRenderer;

impl FeatureRenderer for OrogenRenderer {
    fn render_feature(&self, feature: &Feature) -> StyledLayer {
        let name = property_text(feature, "Name");
        if name.is_none() {
            warn!("Orogen {} has no Name", feature_label(feature));
        }
        let geometry = feature.geometry.as_ref().map(|g| &g.value);
        let kind = geometry.map(geometry_type_name).unwrap_or_default();

        let popup = Popup::new(PopupLine::labeled("Orogen", name.unwrap_or_default()))
            .with_line(PopupLine::labeled("Type", kind));

        StyledLayer {
            shape: Shape::Path {
                geometry: geometry.map(PathGeometry::from_value),
            },
            style: Style::stroke(Color::PURPLE, 2.0).with_fill(Fill::Solid {
                color: Color::PURPLE,
                opacity: FILL_OPACITY,
            }),
            popup: Some(popup),
        }
    }
}
