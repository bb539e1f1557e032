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

//! Static depth legend.

use crate::popup::escape_html;
use crate::style::{depth_color, Color};

/// Lower bound of each depth bucket in kilometres, shallowest first.
pub const LEGEND_DEPTHS: [i32; 6] = [-10, 10, 30, 50, 70, 90];

/// One swatch of the legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Fixed key explaining the earthquake depth colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    pub title: &'static str,
    /// Deepest bucket first.
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Build the depth legend.
    ///
    /// Each swatch samples [`depth_color`] one kilometre above the bucket's
    /// lower bound so no sample sits on a threshold.
    #[must_use]
    pub fn depth() -> Self {
        let mut entries: Vec<LegendEntry> = LEGEND_DEPTHS
            .iter()
            .enumerate()
            .map(|(i, &low)| {
                let label = match LEGEND_DEPTHS.get(i + 1) {
                    Some(high) => format!("{low}\u{2013}{high}"),
                    None => format!("{low}+"),
                };
                LegendEntry {
                    label,
                    color: depth_color(f64::from(low + 1)),
                }
            })
            .collect();
        entries.reverse();

        Self {
            title: "Depth (km)",
            entries,
        }
    }

    /// Rich-text form for HTML surfaces.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = format!("<h4>{}</h4>", escape_html(self.title));
        for entry in &self.entries {
            html.push_str(&format!(
                "<i style=\"background:{}\"></i> {}<br>",
                entry.color.hex(),
                escape_html(&entry.label)
            ));
        }
        html
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::depth()
    }
}
