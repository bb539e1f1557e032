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

use crate::map::PopupTarget;

/// Popup bubble above the clicked feature. Returns `false` once closed.
pub fn show_popup(ctx: &egui::Context, target: &PopupTarget) -> bool {
    let Some(pos) = target.screen_pos else {
        return true;
    };
    let mut open = true;

    egui::Window::new("feature_popup")
        .id(egui::Id::new("feature_popup"))
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .pivot(egui::Align2::CENTER_BOTTOM)
        .current_pos(pos - egui::vec2(0.0, 10.0))
        .frame(super::control_frame(ctx))
        .show(ctx, |ui| {
            ui.set_max_width(280.0);
            ui.horizontal(|ui| {
                ui.heading(target.popup.heading.to_string());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.small_button("✕").clicked() {
                        open = false;
                    }
                });
            });
            if target.popup.rule {
                ui.separator();
            }
            for line in &target.popup.lines {
                ui.label(line.to_string());
            }
        });

    open
}
