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

//! Concurrent dataset loading.
//!
//! Every dataset is fetched by its own task. Tasks are independent: there is
//! no ordering between them, no barrier, no retry and no cancellation. Each
//! outcome is delivered as a [`LoadEvent`] on an unbounded channel; the
//! channel closes once every task has finished.

use std::future::Future;
use std::sync::Arc;

use log::{error, info};
use tokio::sync::mpsc;

use crate::dataset::{decode_collection, Dataset};
use crate::error::DatasetError;
use crate::layer::LayerGroup;
use crate::registry::Overlay;

/// Source of raw dataset bytes.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, DatasetError>> + Send;
}

/// [`Fetch`] over HTTP(S). Relies on the transport's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DatasetError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DatasetError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Where a dataset comes from and which overlays it feeds.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    pub dataset: Dataset,
    pub url: String,
    pub overlays: Vec<Overlay>,
}

impl DatasetSource {
    /// Sources for the given overlays, one per dataset, at the default URLs.
    #[must_use]
    pub fn for_overlays(overlays: &[Overlay]) -> Vec<DatasetSource> {
        let mut sources: Vec<DatasetSource> = Vec::new();
        for &overlay in overlays {
            let dataset = overlay.dataset();
            if let Some(source) = sources.iter_mut().find(|s| s.dataset == dataset) {
                source.overlays.push(overlay);
            } else {
                sources.push(DatasetSource {
                    dataset,
                    url: dataset.default_url().to_string(),
                    overlays: vec![overlay],
                });
            }
        }
        sources
    }

    /// Replace the URL for one dataset.
    #[must_use]
    pub fn with_url(mut sources: Vec<DatasetSource>, dataset: Dataset, url: &str) -> Vec<DatasetSource> {
        if let Some(source) = sources.iter_mut().find(|s| s.dataset == dataset) {
            source.url = url.to_string();
        }
        sources
    }
}

/// Outcome of one dataset load.
#[derive(Debug)]
pub enum LoadEvent {
    /// An overlay's group was rendered from a successful fetch.
    Loaded { overlay: Overlay, group: LayerGroup },
    /// The dataset could not be fetched or decoded; its overlays stay empty.
    Failed {
        dataset: Dataset,
        overlays: Vec<Overlay>,
        error: DatasetError,
    },
}

/// Handle to the running dataset loads.
#[derive(Debug)]
pub struct DataLoader {
    event_rx: mpsc::UnboundedReceiver<LoadEvent>,
}

impl DataLoader {
    /// Issue one fetch task per source on the current tokio runtime.
    #[must_use]
    pub fn spawn<F: Fetch>(fetcher: Arc<F>, sources: Vec<DatasetSource>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        for source in sources {
            let fetcher = Arc::clone(&fetcher);
            let event_tx = event_tx.clone();
            tokio::spawn(async move {
                load_dataset(fetcher.as_ref(), source, &event_tx).await;
            });
        }

        Self { event_rx }
    }

    /// Wait for the next event. `None` once every load has finished.
    pub async fn recv(&mut self) -> Option<LoadEvent> {
        self.event_rx.recv().await
    }

    /// Non-blocking poll for UI loops.
    pub fn try_recv(&mut self) -> Option<LoadEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn load_dataset<F: Fetch>(
    fetcher: &F,
    source: DatasetSource,
    event_tx: &mpsc::UnboundedSender<LoadEvent>,
) {
    info!("Fetching {} from {}", source.dataset.as_str(), source.url);

    let collection = match fetcher.fetch(&source.url).await {
        Ok(body) => decode_collection(&body),
        Err(e) => Err(e),
    };

    match collection {
        Ok(collection) => {
            info!(
                "Loaded {} {} features",
                collection.features.len(),
                source.dataset.as_str()
            );
            for overlay in source.overlays {
                let group = overlay.renderer().render(&collection);
                if event_tx.send(LoadEvent::Loaded { overlay, group }).is_err() {
                    return; // Receiver dropped
                }
            }
        }
        Err(e) => {
            error!("Error loading {} data: {}", source.dataset.as_str(), e);
            let _ = event_tx.send(LoadEvent::Failed {
                dataset: source.dataset,
                overlays: source.overlays,
                error: e,
            });
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    pub(crate) const QUAKES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"mag":3.1,"place":"Ridgecrest, CA","time":1710451613000},
         "geometry":{"type":"Point","coordinates":[-117.6,35.7,8.2]}},
        {"type":"Feature","properties":{"mag":5.4,"place":"Kuril Islands","time":1710450000000},
         "geometry":{"type":"Point","coordinates":[153.2,47.1,120.0]}}
    ]}"#;
    pub(crate) const PLATES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"PlateName":"Pacific","Code":"PA"},
         "geometry":{"type":"Polygon","coordinates":[[[-180,-65],[-150,-60],[-120,-30],[-180,-65]]]}}
    ]}"#;
    pub(crate) const OROGENS: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"Name":"Alps"},
         "geometry":{"type":"Polygon","coordinates":[[[5,44],[16,44],[16,48],[5,44]]]}}
    ]}"#;
    pub(crate) const STEPS: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[1,2],[3,4]]}},
        {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[5,6],[7,8]]}}
    ]}"#;

    /// Serves canned bodies; unknown URLs fail like a network error.
    pub(crate) struct StubFetcher {
        bodies: HashMap<String, Vec<u8>>,
    }

    impl StubFetcher {
        pub(crate) fn with_all_except(missing: Option<Dataset>) -> Self {
            let mut bodies = HashMap::new();
            for (dataset, body) in [
                (Dataset::Earthquakes, QUAKES),
                (Dataset::Plates, PLATES),
                (Dataset::Orogens, OROGENS),
                (Dataset::Steps, STEPS),
            ] {
                if Some(dataset) != missing {
                    bodies.insert(dataset.default_url().to_string(), body.as_bytes().to_vec());
                }
            }
            Self { bodies }
        }
    }

    impl Fetch for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, DatasetError> {
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| DatasetError::Transport(format!("connection refused: {url}")))
        }
    }

    pub(crate) async fn collect(mut loader: DataLoader) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while let Some(event) = loader.recv().await {
            events.push(event);
        }
        events
    }

    fn loaded_len(events: &[LoadEvent], wanted: Overlay) -> Option<usize> {
        events.iter().find_map(|e| match e {
            LoadEvent::Loaded { overlay, group } if *overlay == wanted => Some(group.len()),
            _ => None,
        })
    }

    #[test]
    fn test_sources_share_plates_fetch() {
        let sources = DatasetSource::for_overlays(&Overlay::registered(true));
        assert_eq!(sources.len(), 4);
        let plates = sources.iter().find(|s| s.dataset == Dataset::Plates).unwrap();
        assert_eq!(plates.overlays, vec![Overlay::TectonicPlates, Overlay::Plates]);
    }

    #[test]
    fn test_url_override() {
        let sources = DatasetSource::with_url(
            DatasetSource::for_overlays(&Overlay::registered(false)),
            Dataset::Steps,
            "http://localhost:8000/steps.json",
        );
        let steps = sources.iter().find(|s| s.dataset == Dataset::Steps).unwrap();
        assert_eq!(steps.url, "http://localhost:8000/steps.json");
    }

    #[tokio::test]
    async fn test_all_datasets_load() {
        let loader = DataLoader::spawn(
            Arc::new(StubFetcher::with_all_except(None)),
            DatasetSource::for_overlays(&Overlay::registered(true)),
        );
        let events = collect(loader).await;

        assert_eq!(events.len(), 5);
        assert_eq!(loaded_len(&events, Overlay::Earthquakes), Some(2));
        assert_eq!(loaded_len(&events, Overlay::TectonicPlates), Some(1));
        assert_eq!(loaded_len(&events, Overlay::Plates), Some(1));
        assert_eq!(loaded_len(&events, Overlay::Orogens), Some(1));
        assert_eq!(loaded_len(&events, Overlay::Steps), Some(2));
    }

    #[tokio::test]
    async fn test_failure_is_isolated() {
        let loader = DataLoader::spawn(
            Arc::new(StubFetcher::with_all_except(Some(Dataset::Plates))),
            DatasetSource::for_overlays(&Overlay::registered(false)),
        );
        let events = collect(loader).await;

        assert_eq!(events.len(), 4);
        assert_eq!(loaded_len(&events, Overlay::TectonicPlates), None);
        assert_eq!(loaded_len(&events, Overlay::Earthquakes), Some(2));
        assert_eq!(loaded_len(&events, Overlay::Orogens), Some(1));
        assert_eq!(loaded_len(&events, Overlay::Steps), Some(2));
        assert!(events.iter().any(|e| matches!(
            e,
            LoadEvent::Failed { dataset: Dataset::Plates, error: DatasetError::Transport(_), .. }
        )));
    }

    #[tokio::test]
    async fn test_stalled_fetch_does_not_hold_back_others() {
        /// Never answers for the plates URL.
        struct StalledPlates(StubFetcher);
        impl Fetch for StalledPlates {
            async fn fetch(&self, url: &str) -> Result<Vec<u8>, DatasetError> {
                if url == Dataset::Plates.default_url() {
                    std::future::pending::<()>().await;
                }
                self.0.fetch(url).await
            }
        }

        let mut loader = DataLoader::spawn(
            Arc::new(StalledPlates(StubFetcher::with_all_except(None))),
            DatasetSource::for_overlays(&Overlay::registered(false)),
        );

        let mut arrived = Vec::new();
        for _ in 0..3 {
            let event = tokio::time::timeout(Duration::from_secs(5), loader.recv())
                .await
                .expect("loaded datasets should not wait for plates")
                .expect("channel open while plates is pending");
            match event {
                LoadEvent::Loaded { overlay, .. } => arrived.push(overlay),
                LoadEvent::Failed { dataset, .. } => panic!("unexpected failure for {dataset:?}"),
            }
        }
        arrived.sort_by_key(|o| o.display_name());
        assert_eq!(arrived, vec![Overlay::Earthquakes, Overlay::Orogens, Overlay::Steps]);

        // Plates is still outstanding
        assert!(tokio::time::timeout(Duration::from_millis(50), loader.recv())
            .await
            .is_err());
        assert!(loader.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_body_fails() {
        struct HtmlFetcher;
        impl Fetch for HtmlFetcher {
            async fn fetch(&self, _url: &str) -> Result<Vec<u8>, DatasetError> {
                Ok(b"<html>504 Gateway Timeout</html>".to_vec())
            }
        }

        let loader = DataLoader::spawn(
            Arc::new(HtmlFetcher),
            DatasetSource::for_overlays(&[Overlay::Orogens]),
        );
        let events = collect(loader).await;
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            LoadEvent::Failed { overlays, error: DatasetError::Decode(_), .. }
                if overlays == &vec![Overlay::Orogens]
        ));
    }
}
