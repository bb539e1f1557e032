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

//! Walkers plugin drawing the attached overlay groups and picking the
//! feature under a click.

use eframe::egui;
use egui::{Color32, Pos2, Stroke};
use quake_layers::{Fill, LayerGroup, LonLat, PathPart, Popup, Shape, StyledLayer};
use walkers::{lon_lat, MapMemory, Plugin, Projector};

/// Extra pixels around a line or marker that still count as a hit
const HIT_SLOP: f32 = 3.0;

/// Popup opened by clicking a feature
#[derive(Debug, Clone)]
pub struct PopupTarget {
    pub popup: Popup,
    /// Geographic anchor of the popup
    pub anchor: LonLat,
    /// Anchor projected for the current frame
    pub screen_pos: Option<Pos2>,
}

/// Draws overlay groups bottom to top in the given order
pub struct OverlayPlugin<'a> {
    groups: Vec<&'a LayerGroup>,
    selection: &'a mut Option<PopupTarget>,
}

impl<'a> OverlayPlugin<'a> {
    pub fn new(groups: Vec<&'a LayerGroup>, selection: &'a mut Option<PopupTarget>) -> Self {
        Self { groups, selection }
    }
}

impl Plugin for OverlayPlugin<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let painter = ui.painter().with_clip_rect(response.rect);
        let project = |p: LonLat| projector.project(lon_lat(p.lon, p.lat)).to_pos2();

        for group in &self.groups {
            for layer in group.iter() {
                paint_layer(&painter, layer, &project);
            }
        }

        if response.clicked() {
            if let Some(click) = response.interact_pointer_pos() {
                // Topmost feature wins
                let hit = self
                    .groups
                    .iter()
                    .rev()
                    .flat_map(|g| g.layers().iter().rev())
                    .find(|layer| hit_test(layer, click, &project));

                *self.selection =
                    hit.and_then(|layer| popup_target(layer, projector.unproject(click.to_vec2())));
            }
        }

        if let Some(target) = self.selection.as_mut() {
            target.screen_pos = Some(project(target.anchor));
        }
    }
}

/// Popup for a clicked layer. Markers anchor at their own position, paths
/// at the clicked point.
fn popup_target(layer: &StyledLayer, clicked: walkers::Position) -> Option<PopupTarget> {
    let popup = layer.popup.clone()?;
    let anchor = match &layer.shape {
        Shape::Marker {
            position: Some(position),
            ..
        } => *position,
        _ => LonLat::new(clicked.x(), clicked.y()),
    };
    Some(PopupTarget {
        popup,
        anchor,
        screen_pos: None,
    })
}

/// Color with a 0.0 - 1.0 opacity
pub fn to_color32(color: quake_layers::Color, opacity: f32) -> Color32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "clamped to 0..=255")]
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

fn fill_color(fill: Fill) -> Option<Color32> {
    match fill {
        Fill::Solid { color, opacity } if opacity > 0.0 => Some(to_color32(color, opacity)),
        _ => None,
    }
}

fn paint_layer(painter: &egui::Painter, layer: &StyledLayer, project: &impl Fn(LonLat) -> Pos2) {
    if !layer.shape.is_drawable() {
        return;
    }
    let stroke = Stroke::new(layer.style.weight, to_color32(layer.style.stroke, layer.style.opacity));

    match &layer.shape {
        Shape::Marker {
            position: Some(position),
            radius,
        } => {
            #[allow(clippy::cast_possible_truncation, reason = "screen pixels")]
            let radius = *radius as f32;
            painter.circle(
                project(*position),
                radius,
                fill_color(layer.style.fill).unwrap_or(Color32::TRANSPARENT),
                stroke,
            );
        }
        Shape::Path {
            geometry: Some(geometry),
        } => {
            if let Some(fill) = fill_color(layer.style.fill) {
                for (outer, holes) in geometry.polygons() {
                    let outer: Vec<Pos2> = outer.points.iter().map(|p| project(*p)).collect();
                    let holes: Vec<Vec<Pos2>> = holes
                        .iter()
                        .map(|hole| hole.points.iter().map(|p| project(*p)).collect())
                        .collect();
                    if let Some(mesh) = fill_mesh(&outer, &holes, fill) {
                        painter.add(egui::Shape::mesh(mesh));
                    }
                }
            }
            for part in &geometry.parts {
                let points: Vec<Pos2> = part.points.iter().map(|p| project(*p)).collect();
                if points.len() < 2 {
                    continue;
                }
                if part.closed {
                    painter.add(egui::Shape::closed_line(points, stroke));
                } else {
                    painter.add(egui::Shape::line(points, stroke));
                }
            }
        }
        _ => {}
    }
}

fn hit_test(layer: &StyledLayer, click: Pos2, project: &impl Fn(LonLat) -> Pos2) -> bool {
    if layer.popup.is_none() || !layer.shape.is_drawable() {
        return false;
    }
    match &layer.shape {
        Shape::Marker {
            position: Some(position),
            radius,
        } => {
            #[allow(clippy::cast_possible_truncation, reason = "screen pixels")]
            let radius = *radius as f32;
            project(*position).distance(click) <= radius + HIT_SLOP
        }
        Shape::Path {
            geometry: Some(geometry),
        } => {
            let tolerance = layer.style.weight / 2.0 + HIT_SLOP;
            let on_edge = geometry.parts.iter().any(|part| {
                let points: Vec<Pos2> = part.points.iter().map(|p| project(*p)).collect();
                points
                    .windows(2)
                    .any(|w| distance_to_segment(click, w[0], w[1]) <= tolerance)
            });
            let ring_contains = |ring: &PathPart| {
                let points: Vec<Pos2> = ring.points.iter().map(|p| project(*p)).collect();
                point_in_ring(click, &points)
            };
            on_edge
                || (layer.style.fill != Fill::Disabled
                    && geometry.polygons().into_iter().any(|(outer, holes)| {
                        ring_contains(outer) && !holes.into_iter().any(ring_contains)
                    }))
        }
        _ => false,
    }
}

/// Triangulated fill for a polygon with holes. GeoJSON rings repeat their
/// first vertex at the end; the duplicate is dropped before triangulation.
pub fn fill_mesh(outer: &[Pos2], holes: &[Vec<Pos2>], color: Color32) -> Option<egui::Mesh> {
    fn open_ring(ring: &[Pos2]) -> &[Pos2] {
        match ring {
            [first, rest @ .., last] if first == last && !rest.is_empty() => &ring[..ring.len() - 1],
            _ => ring,
        }
    }

    let outer = open_ring(outer);
    if outer.len() < 3 {
        return None;
    }

    let mut vertices: Vec<Pos2> = outer.to_vec();
    let mut hole_indices = Vec::with_capacity(holes.len());
    for hole in holes {
        let hole = open_ring(hole);
        if hole.len() < 3 {
            continue;
        }
        hole_indices.push(vertices.len());
        vertices.extend_from_slice(hole);
    }

    let data: Vec<f32> = vertices.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = match earcutr::earcut(&data, &hole_indices, 2) {
        Ok(indices) if !indices.is_empty() => indices,
        Ok(_) => return None,
        Err(e) => {
            log::debug!("Polygon fill skipped: {:?}", e);
            return None;
        }
    };

    let mut mesh = egui::Mesh::default();
    for p in &vertices {
        mesh.colored_vertex(*p, color);
    }
    for triangle in indices.chunks_exact(3) {
        #[allow(clippy::cast_possible_truncation, reason = "vertex count of a single ring")]
        mesh.add_triangle(triangle[0] as u32, triangle[1] as u32, triangle[2] as u32);
    }
    Some(mesh)
}

/// Shortest distance from `p` to the segment `a`-`b`
pub fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Even-odd ray casting test
pub fn point_in_ring(p: Pos2, ring: &[Pos2]) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
