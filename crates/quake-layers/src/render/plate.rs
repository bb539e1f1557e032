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
use crate::geometry::PathGeometry;
use crate::layer::{Fill, Shape, Style, StyledLayer};
use crate::popup::{Popup, PopupLine};
use crate::style::Color;

/// Orange plate boundaries with a name and code popup.
#[derive(Debug, Clone, Copy)]
pub struct PlateRenderer {
    fill: Fill,
}

impl PlateRenderer {
    /// Style of the "Tectonic Plates" overlay: fill on, transparent.
    #[must_use]
    pub fn tectonic() -> Self {
        Self {
            fill: Fill::Transparent,
        }
    }

    /// Style of the "Plates" overlay: fill switched off.
    #[must_use]
    pub fn outline() -> Self {
        Self {
            fill: Fill::Disabled,
        }
    }
}

impl FeatureRenderer for PlateRenderer {
    fn render_feature(&self, feature: &Feature) -> StyledLayer {
        let name = property_text(feature, "PlateName");
        let code = property_text(feature, "Code");
        if name.is_none() || code.is_none() {
            warn!("Plate {} is missing PlateName or Code", feature_label(feature));
        }

        let popup = Popup::new(PopupLine::labeled("Plate", name.unwrap_or_default()))
            .with_line(PopupLine::labeled("Code", code.unwrap_or_default()));

        StyledLayer {
            shape: Shape::Path {
                geometry: feature
                    .geometry
                    .as_ref()
                    .map(|g| PathGeometry::from_value(&g.value)),
            },
            style: Style::stroke(Color::ORANGE, 2.0).with_fill(self.fill),
            popup: Some(popup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::decode_collection;

    const PLATES: &[u8] = br#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"LAYER":"plate","Code":"PA","PlateName":"Pacific"},
         "geometry":{"type":"Polygon","coordinates":[[[-180,-65],[-150,-60],[-120,-30],[-180,-65]]]}},
        {"type":"Feature","properties":{"Code":"NA"},
         "geometry":{"type":"Polygon","coordinates":[[[-130,50],[-60,50],[-60,20],[-130,50]]]}}
    ]}"#;

    #[test]
    fn test_popup_contains_name_and_code() {
        let collection = decode_collection(PLATES).unwrap();
        let group = PlateRenderer::tectonic().render(&collection);
        let text = group.layers()[0].popup.as_ref().unwrap().text();
        assert!(text.contains("Pacific"));
        assert!(text.contains("PA"));
        assert_eq!(
            group.layers()[0].popup.as_ref().unwrap().to_html(),
            "<h3>Plate: Pacific</h3><p>Code: PA</p>"
        );
    }

    #[test]
    fn test_styles() {
        let collection = decode_collection(PLATES).unwrap();

        let tectonic = PlateRenderer::tectonic().render(&collection);
        let style = tectonic.layers()[0].style;
        assert_eq!(style.stroke, Color::ORANGE);
        assert!((style.weight - 2.0).abs() < f32::EPSILON);
        assert_eq!(style.fill, Fill::Transparent);

        let outline = PlateRenderer::outline().render(&collection);
        assert_eq!(outline.layers()[0].style.fill, Fill::Disabled);
        assert_eq!(outline.layers()[0].shape, tectonic.layers()[0].shape);
    }

    #[test]
    fn test_missing_name_keeps_feature() {
        let collection = decode_collection(PLATES).unwrap();
        let group = PlateRenderer::tectonic().render(&collection);
        assert_eq!(group.len(), 2);
        let text = group.layers()[1].popup.as_ref().unwrap().text();
        assert_eq!(text, "Plate: \nCode: NA");
        assert!(group.layers()[1].shape.is_drawable());
    }
}
