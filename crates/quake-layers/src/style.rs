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

//! Style functions mapping earthquake attributes to marker appearance.

use std::fmt;

/// Marker radius in pixels per unit of magnitude.
pub const MAGNITUDE_SCALE: f64 = 4.0;

/// Depth thresholds in kilometres, highest first.
pub const DEPTH_THRESHOLDS: [f64; 5] = [90.0, 70.0, 50.0, 30.0, 10.0];

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const ORANGE_RED: Color = Color::rgb(0xFF, 0x45, 0x00);
    pub const ORANGE: Color = Color::rgb(0xFF, 0xA5, 0x00);
    pub const GOLD: Color = Color::rgb(0xFF, 0xD7, 0x00);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);
    pub const LIGHT_GREEN: Color = Color::rgb(0x90, 0xEE, 0x90);
    pub const PURPLE: Color = Color::rgb(0x80, 0x00, 0x80);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB` form.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Marker radius for an earthquake of the given magnitude.
///
/// Linear in magnitude with no clamping: zero or negative magnitudes give a
/// zero or negative radius, which the display surface does not draw.
#[must_use]
pub fn marker_radius(magnitude: f64) -> f64 {
    magnitude * MAGNITUDE_SCALE
}

/// Fill color for an earthquake at the given depth in kilometres.
///
/// Six buckets evaluated from the deepest threshold down; a depth equal to a
/// threshold belongs to the shallower bucket. NaN compares false everywhere
/// and lands in the shallowest bucket.
#[must_use]
pub fn depth_color(depth: f64) -> Color {
    if depth > 90.0 {
        Color::RED
    } else if depth > 70.0 {
        Color::ORANGE_RED
    } else if depth > 50.0 {
        Color::ORANGE
    } else if depth > 30.0 {
        Color::GOLD
    } else if depth > 10.0 {
        Color::YELLOW
    } else {
        Color::LIGHT_GREEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [Color; 6] = [
        Color::RED,
        Color::ORANGE_RED,
        Color::ORANGE,
        Color::GOLD,
        Color::YELLOW,
        Color::LIGHT_GREEN,
    ];

    #[test]
    fn test_depth_color_boundaries() {
        assert_eq!(depth_color(90.0), Color::ORANGE_RED);
        assert_eq!(depth_color(90.1), Color::RED);
        assert_eq!(depth_color(70.0), Color::ORANGE);
        assert_eq!(depth_color(70.5), Color::ORANGE_RED);
        assert_eq!(depth_color(50.0), Color::GOLD);
        assert_eq!(depth_color(30.0), Color::YELLOW);
        assert_eq!(depth_color(10.0), Color::LIGHT_GREEN);
        assert_eq!(depth_color(-3.2), Color::LIGHT_GREEN);
        assert_eq!(depth_color(f64::NAN), Color::LIGHT_GREEN);
    }

    #[test]
    fn test_depth_color_picks_highest_exceeded_threshold() {
        let mut depth = -20.0;
        while depth < 700.0 {
            let color = depth_color(depth);
            let expected = DEPTH_THRESHOLDS
                .iter()
                .position(|t| depth > *t)
                .map_or(Color::LIGHT_GREEN, |i| PALETTE[i]);
            assert_eq!(color, expected, "depth {depth}");
            assert!(PALETTE.contains(&color));
            depth += 0.25;
        }
    }

    #[test]
    fn test_marker_radius_linear() {
        assert!((marker_radius(0.0)).abs() < f64::EPSILON);
        assert!((marker_radius(2.5) - 10.0).abs() < f64::EPSILON);
        assert!(marker_radius(-1.0) < 0.0);

        let mut previous = marker_radius(0.0);
        for step in 1..=100 {
            let magnitude = f64::from(step) * 0.1;
            let radius = marker_radius(magnitude);
            assert!((radius - 4.0 * magnitude).abs() < 1e-9);
            assert!(radius >= previous);
            previous = radius;
        }
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::ORANGE_RED.hex(), "#FF4500");
        assert_eq!(Color::LIGHT_GREEN.to_string(), "#90EE90");
    }
}
