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

//! Conversion from GeoJSON geometries to drawable shapes.

use geojson::Value;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// First two elements of a GeoJSON position; `None` if there are fewer.
    #[must_use]
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(Self::new(*lon, *lat)),
            _ => None,
        }
    }
}

/// One connected run of vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPart {
    pub points: Vec<LonLat>,
    /// Polygon rings are closed and may be filled; line strings are open.
    pub closed: bool,
    /// Inner ring cutting a hole in the closed part before it.
    pub hole: bool,
}

/// Line or polygon geometry flattened into parts.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGeometry {
    /// GeoJSON type tag of the source geometry (e.g. `"Polygon"`).
    pub kind: &'static str,
    pub parts: Vec<PathPart>,
}

impl PathGeometry {
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut parts = Vec::new();
        collect_parts(value, &mut parts);
        Self {
            kind: geometry_type_name(value),
            parts,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.points.len()).sum()
    }

    /// Polygons as (outer ring, holes). Open parts are skipped.
    #[must_use]
    pub fn polygons(&self) -> Vec<(&PathPart, Vec<&PathPart>)> {
        let mut polygons: Vec<(&PathPart, Vec<&PathPart>)> = Vec::new();
        for part in self.parts.iter().filter(|p| p.closed) {
            if !part.hole {
                polygons.push((part, Vec::new()));
            } else if let Some((_, holes)) = polygons.last_mut() {
                holes.push(part);
            }
        }
        polygons
    }
}

/// GeoJSON `type` member for a geometry value.
#[must_use]
pub fn geometry_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn to_part(positions: &[Vec<f64>], closed: bool, hole: bool) -> PathPart {
    PathPart {
        points: positions
            .iter()
            .filter_map(|p| LonLat::from_position(p))
            .collect(),
        closed,
        hole,
    }
}

fn push_rings(rings: &[Vec<Vec<f64>>], parts: &mut Vec<PathPart>) {
    parts.extend(
        rings
            .iter()
            .enumerate()
            .map(|(i, ring)| to_part(ring, true, i > 0)),
    );
}

fn collect_parts(value: &Value, parts: &mut Vec<PathPart>) {
    match value {
        // Points have no path representation
        Value::Point(_) | Value::MultiPoint(_) => {}
        Value::LineString(line) => parts.push(to_part(line, false, false)),
        Value::MultiLineString(lines) => {
            parts.extend(lines.iter().map(|line| to_part(line, false, false)));
        }
        Value::Polygon(rings) => push_rings(rings, parts),
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                push_rings(rings, parts);
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_parts(&geometry.value, parts);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position() {
        assert_eq!(
            LonLat::from_position(&[-155.27, 19.41, 2.3]),
            Some(LonLat::new(-155.27, 19.41))
        );
        assert_eq!(LonLat::from_position(&[12.0]), None);
    }

    #[test]
    fn test_polygon_parts_closed() {
        let value = Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![10.0, 10.0],
            vec![0.0, 0.0],
        ]]);
        let geometry = PathGeometry::from_value(&value);
        assert_eq!(geometry.kind, "Polygon");
        assert_eq!(geometry.parts.len(), 1);
        assert!(geometry.parts[0].closed);
        assert_eq!(geometry.vertex_count(), 4);
    }

    #[test]
    fn test_multipolygon_groups_holes_with_their_outer_ring() {
        let square = |x: f64, size: f64| {
            vec![
                vec![x, 0.0],
                vec![x + size, 0.0],
                vec![x + size, size],
                vec![x, size],
                vec![x, 0.0],
            ]
        };
        let value = Value::MultiPolygon(vec![
            vec![square(0.0, 10.0), square(2.0, 2.0)],
            vec![square(20.0, 5.0)],
        ]);
        let geometry = PathGeometry::from_value(&value);
        assert_eq!(geometry.parts.len(), 3);
        assert!(geometry.parts[1].hole);
        assert!(!geometry.parts[2].hole);

        let polygons = geometry.polygons();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].1.len(), 1);
        assert_eq!(polygons[0].1[0].points[0], LonLat::new(2.0, 0.0));
        assert!(polygons[1].1.is_empty());
    }

    #[test]
    fn test_line_geometry_has_no_polygons() {
        let value = Value::LineString(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(PathGeometry::from_value(&value).polygons().is_empty());
    }

    #[test]
    fn test_multilinestring_parts_open() {
        let value = Value::MultiLineString(vec![
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![vec![5.0, 6.0], vec![7.0]],
        ]);
        let geometry = PathGeometry::from_value(&value);
        assert_eq!(geometry.kind, "MultiLineString");
        assert_eq!(geometry.parts.len(), 2);
        assert!(geometry.parts.iter().all(|p| !p.closed));
        // Malformed position dropped
        assert_eq!(geometry.parts[1].points, vec![LonLat::new(5.0, 6.0)]);
    }
}
