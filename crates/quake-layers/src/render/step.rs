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

use super::FeatureRenderer;
use crate::geometry::PathGeometry;
use crate::layer::{Shape, Style, StyledLayer};
use crate::style::Color;

/// Thin blue plate-boundary steps, no popup.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepRenderer;

impl FeatureRenderer for StepRenderer {
    fn render_feature(&self, feature: &Feature) -> StyledLayer {
        StyledLayer {
            shape: Shape::Path {
                geometry: feature
                    .geometry
                    .as_ref()
                    .map(|g| PathGeometry::from_value(&g.value)),
            },
            style: Style::stroke(Color::BLUE, 1.0),
            popup: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::decode_collection;
    use crate::layer::Fill;

    #[test]
    fn test_step_layers() {
        let body = br#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"LAYER":"step","STEPCLASS":"SUB"},
             "geometry":{"type":"LineString","coordinates":[[142.1,11.2],[142.5,11.9]]}},
            {"type":"Feature","properties":{},
             "geometry":{"type":"LineString","coordinates":[[-70.1,-33.0],[-70.4,-32.1]]}}
        ]}"#;
        let collection = decode_collection(body).unwrap();
        let group = StepRenderer.render(&collection);
        assert_eq!(group.len(), 2);
        for layer in &group {
            assert!(layer.popup.is_none());
            assert_eq!(layer.style.stroke, Color::BLUE);
            assert!((layer.style.weight - 1.0).abs() < f32::EPSILON);
            assert_eq!(layer.style.fill, Fill::Disabled);
            assert!(layer.shape.is_drawable());
        }
    }
}
