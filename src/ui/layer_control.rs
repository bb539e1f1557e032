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
use quake_layers::{MapSession, OverlayState};

use crate::app::MapView;

/// Base map radio buttons and overlay checkboxes, top right of the map
#[derive(Debug)]
pub struct LayerControl {
    pub expanded: bool,
}

impl LayerControl {
    pub fn new(expanded: bool) -> Self {
        Self { expanded }
    }

    /// Render the control. Returns `true` when the base map was changed.
    pub fn render(&mut self, ctx: &egui::Context, session: &mut MapSession<MapView>) -> bool {
        let mut base_changed = false;

        egui::Window::new("Layers")
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
            .resizable(false)
            .collapsible(false)
            .title_bar(false)
            .frame(super::control_frame(ctx))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Layers").strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let icon = if self.expanded { "▲" } else { "▼" };
                        if ui.small_button(icon).clicked() {
                            self.expanded = !self.expanded;
                        }
                    });
                });

                if !self.expanded {
                    return;
                }

                ui.separator();

                let mut selected = session.registry().active_base();
                for base in session.registry().base_maps() {
                    ui.radio_value(&mut selected, *base, base.display_name());
                }
                if selected != session.registry().active_base() {
                    session.select_base_map(selected);
                    base_changed = true;
                }

                ui.separator();

                let overlays: Vec<_> = session.registry().overlays().collect();
                for overlay in overlays {
                    let state = session.registry().state(overlay).cloned();
                    let mut visible = session.registry().is_visible(overlay);
                    match state {
                        Some(OverlayState::Attached) => {
                            if ui.checkbox(&mut visible, overlay.display_name()).changed() {
                                session.set_overlay_visible(overlay, visible);
                            }
                        }
                        Some(OverlayState::Failed(reason)) => {
                            ui.add_enabled(false, egui::Checkbox::new(&mut visible, overlay.display_name()))
                                .on_disabled_hover_text(format!("Unavailable: {reason}"));
                        }
                        Some(OverlayState::Pending) | None => {
                            ui.horizontal(|ui| {
                                ui.add_enabled(false, egui::Checkbox::new(&mut visible, overlay.display_name()));
                                ui.spinner();
                            });
                        }
                    }
                }
            });

        base_changed
    }
}
