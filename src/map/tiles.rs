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

//! Base map tile sources and their HTTP tile managers.

use std::collections::HashMap;

use eframe::egui;
use quake_layers::BaseMap;
use walkers::sources::{Attribution, TileSource};
use walkers::{HttpOptions, HttpTiles, TileId};

/// Tile source for one of the selectable base maps
#[derive(Debug)]
pub struct BaseMapSource {
    base: BaseMap,
}

impl BaseMapSource {
    pub fn new(base: BaseMap) -> Self {
        Self { base }
    }
}

impl TileSource for BaseMapSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        self.base.tile_url(tile_id.zoom, tile_id.x, tile_id.y)
    }

    fn attribution(&self) -> Attribution {
        let (text, url) = self.base.attribution();
        Attribution {
            text,
            url,
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        self.base.max_zoom()
    }
}

/// Lazily created tile managers, one per base map
pub struct BaseTiles {
    tiles: HashMap<BaseMap, HttpTiles>,
    disk_cache: bool,
}

impl BaseTiles {
    pub fn new(disk_cache: bool) -> Self {
        Self {
            tiles: HashMap::new(),
            disk_cache,
        }
    }

    /// Get or create HttpTiles for a base map
    pub fn get_or_create(&mut self, base: BaseMap, ctx: &egui::Context) -> &mut HttpTiles {
        let disk_cache = self.disk_cache;
        self.tiles.entry(base).or_insert_with(|| {
            let cache = disk_cache.then(|| {
                dirs::cache_dir()
                    .unwrap_or_else(|| std::path::PathBuf::from(".cache"))
                    .join("quakemap-desktop")
                    .join("tiles")
                    .join(base.key())
            });

            let http_options = HttpOptions {
                cache,
                ..Default::default()
            };

            HttpTiles::with_options(BaseMapSource::new(base), http_options, ctx.clone())
        })
    }
}
