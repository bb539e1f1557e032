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

//! Styled layers and the groups that hold them.

use crate::geometry::{LonLat, PathGeometry};
use crate::popup::Popup;
use crate::style::Color;

/// How the interior of a shape is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// Fill switched off entirely.
    Disabled,
    /// Fill enabled with a fully transparent color.
    Transparent,
    Solid { color: Color, opacity: f32 },
}

impl Fill {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Fill::Solid { opacity, .. } if *opacity > 0.0)
    }
}

/// Stroke and fill attributes of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub stroke: Color,
    pub weight: f32,
    pub opacity: f32,
    pub fill: Fill,
}

impl Style {
    /// Outline-only style with full stroke opacity.
    #[must_use]
    pub const fn stroke(stroke: Color, weight: f32) -> Self {
        Self {
            stroke,
            weight,
            opacity: 1.0,
            fill: Fill::Disabled,
        }
    }

    #[must_use]
    pub const fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }
}

/// What gets drawn for a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Circle marker with a radius in screen pixels. `position` is `None`
    /// when the feature had no usable point geometry.
    Marker {
        position: Option<LonLat>,
        radius: f64,
    },
    Path { geometry: Option<PathGeometry> },
}

impl Shape {
    /// Whether the shape can be placed on the map at all.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        match self {
            Shape::Marker { position, radius } => position.is_some() && *radius > 0.0,
            Shape::Path { geometry } => geometry.as_ref().is_some_and(|g| g.vertex_count() > 1),
        }
    }
}

/// A feature paired with its computed appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLayer {
    pub shape: Shape,
    pub style: Style,
    pub popup: Option<Popup>,
}

/// Set of styled layers attached to and detached from the map as one unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerGroup {
    layers: Vec<StyledLayer>,
}

impl LayerGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn layers(&self) -> &[StyledLayer] {
        &self.layers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyledLayer> {
        self.layers.iter()
    }
}

impl From<Vec<StyledLayer>> for LayerGroup {
    fn from(layers: Vec<StyledLayer>) -> Self {
        Self { layers }
    }
}

impl<'a> IntoIterator for &'a LayerGroup {
    type Item = &'a StyledLayer;
    type IntoIter = std::slice::Iter<'a, StyledLayer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_drawable() {
        let marker = Shape::Marker {
            position: Some(LonLat::new(-120.0, 36.0)),
            radius: 6.0,
        };
        assert!(marker.is_drawable());

        let zero = Shape::Marker {
            position: Some(LonLat::new(-120.0, 36.0)),
            radius: 0.0,
        };
        assert!(!zero.is_drawable());

        let unplaced = Shape::Marker {
            position: None,
            radius: 6.0,
        };
        assert!(!unplaced.is_drawable());
    }

    #[test]
    fn test_fill_visibility() {
        assert!(!Fill::Disabled.is_visible());
        assert!(!Fill::Transparent.is_visible());
        assert!(Fill::Solid {
            color: Color::PURPLE,
            opacity: 0.3
        }
        .is_visible());
    }
}
