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

//! Errors raised while fetching and decoding a dataset.

use thiserror::Error;

/// Failure to obtain a usable feature collection for one dataset.
///
/// This is the only error kind in the crate. It is raised at the fetch
/// boundary, logged, and never retried.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("invalid GeoJSON: {0}")]
    Decode(#[from] geojson::Error),

    #[error("expected a FeatureCollection, got {0}")]
    NotFeatureCollection(&'static str),

    /// Transport failure reported by a non-HTTP fetcher.
    #[error("{0}")]
    Transport(String),
}
