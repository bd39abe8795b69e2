// Copyright 2025 bakri (tidynest@proton.me)
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

//! src/core/types.rs
//!
//! Catalog records consumed by the carousel
//!
//! These are read-only inputs: the carousel wraps them in nodes but never
//! mutates them. A `BeatmapSetInfo` is the family record, each
//! `BeatmapInfo` one member (difficulty) of the family.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The user who mapped a beatmap set
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Author {
    pub username: String,
}

/// Family-level metadata shared by every difficulty of a set
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BeatmapMetadata {
    pub title: String,
    pub artist: String,
    pub author: Author,

    /// Where the song comes from (game, anime, album)
    #[serde(default)]
    pub source: String,

    /// Space separated user tags
    #[serde(default)]
    pub tags: String,
}

impl BeatmapMetadata {
    /// Every term a free-text search is allowed to hit
    ///
    /// Tags are split on whitespace so that each one matches on its own.
    pub fn searchable_terms(&self) -> impl Iterator<Item = &str> {
        [
            self.artist.as_str(),
            self.title.as_str(),
            self.author.username.as_str(),
            self.source.as_str(),
        ]
        .into_iter()
        .chain(self.tags.split_whitespace())
        .filter(|term| !term.is_empty())
    }
}

impl fmt::Display for BeatmapMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.artist, self.title, self.author.username)
    }
}

/// One playable difficulty inside a set
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BeatmapInfo {
    pub id: u64,

    /// Difficulty name as chosen by the mapper (e.g. "Insane")
    pub version: String,

    pub star_difficulty: f64,
    pub bpm: f64,

    /// Drain length in milliseconds
    pub length: f64,

    /// Hidden difficulties never enter the carousel
    #[serde(default)]
    pub hidden: bool,
}

impl fmt::Display for BeatmapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:.2}*", self.version, self.star_difficulty)
    }
}

/// A complete beatmap set: metadata plus every member difficulty
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BeatmapSetInfo {
    pub id: u64,
    pub metadata: BeatmapMetadata,
    pub date_added: DateTime<Utc>,
    pub beatmaps: Vec<BeatmapInfo>,
}

impl fmt::Display for BeatmapSetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.metadata)
    }
}
