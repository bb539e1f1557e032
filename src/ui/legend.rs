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

use eframe::egui;
use quake_layers::Legend;

use crate::map::overlay::to_color32;

const SWATCH_SIZE: f32 = 18.0;

/// Depth legend, bottom right of the map
pub fn show_legend(ctx: &egui::Context, legend: &Legend) {
    egui::Window::new("legend")
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -24.0))
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(super::control_frame(ctx))
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(legend.title).strong());
            for entry in &legend.entries {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(SWATCH_SIZE, SWATCH_SIZE),
                        egui::Sense::hover(),
                    );
                    ui.painter().rect_filled(rect, 0.0, to_color32(entry.color, 0.8));
                    ui.label(&entry.label);
                });
            }
        });
}
