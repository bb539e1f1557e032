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

//! Map controls: layer switcher, legend and feature popups.

pub mod layer_control;
pub mod legend;
pub mod popup;

pub use layer_control::LayerControl;
pub use legend::show_legend;
pub use popup::show_popup;

use eframe::egui;

/// Translucent panel frame shared by the map controls
pub(crate) fn control_frame(ctx: &egui::Context) -> egui::Frame {
    egui::Frame::window(&ctx.style())
        .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 230))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(170, 170, 170)))
        .corner_radius(5.0)
}
