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

mod app;
mod config;
mod headless;
mod map;
mod ui;

use std::sync::Arc;

use clap::Parser;
use eframe::egui;
use log::{info, warn};
use mimalloc::MiMalloc;
use quake_layers::{BaseMap, HttpFetcher, Overlay};

use app::{spawn_loader_thread, QuakeMapApp};
use config::AppConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USER_AGENT: &str = concat!("quakemap-desktop/", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(name = "quakemap-desktop", version, about = "Earthquakes and plate tectonics on a world map")]
struct Args {
    /// Base map to start with: street, topo or satellite
    #[arg(long, value_name = "NAME")]
    base_map: Option<String>,

    /// Load every dataset, log a summary and exit without opening a window
    #[arg(long)]
    headless: bool,

    /// Print the configuration file location and exit
    #[arg(long)]
    config_path: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.config_path {
        println!("{}", AppConfig::get_config_path()?.display());
        return Ok(());
    }

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    if let Some(name) = args.base_map {
        match BaseMap::from_name(&name) {
            Some(base) => config.base_map = base.key().to_string(),
            None => warn!("Unknown base map '{}', keeping '{}'", name, config.base_map),
        }
    }

    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let fetcher = Arc::new(HttpFetcher::new(client));

    if args.headless {
        let runtime = tokio::runtime::Runtime::new()?;
        headless::run(&runtime, &config, fetcher);
        return Ok(());
    }

    info!("Starting Quake Map...");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_title("Quake Map"),
        ..Default::default()
    };

    eframe::run_native(
        "Quake Map",
        options,
        Box::new(move |cc| {
            let overlays = Overlay::registered(config.duplicate_plates_overlay);
            let sources = config.dataset_sources(&overlays);
            let events = spawn_loader_thread(fetcher, sources, cc.egui_ctx.clone());
            Ok(Box::new(QuakeMapApp::new(config, events)))
        }),
    )?;

    Ok(())
}
