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

//! src/catalog/mod.rs
//!
//! Read-only catalog of beatmap set records
//!
//! The catalog is the external collaborator the carousel is built from.
//! On disk it is a JSON array of [`BeatmapSetInfo`] records:
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "metadata": { "title": "Blue Zenith", "artist": "xi", "author": { "username": "Asphyxia" } },
//!     "date_added": "2021-01-01T00:00:00Z",
//!     "beatmaps": [
//!       { "id": 10, "version": "FOUR DIMENSIONS", "star_difficulty": 7.1, "bpm": 200.0, "length": 240000.0 }
//!     ]
//!   }
//! ]
//! ```
//!
//! # Example
//!
//! ```no_run
//! use beatmap_carousel::catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load(Path::new("catalog.json"))?;
//! println!("Loaded {} beatmap sets", catalog.len());
//! # Ok::<(), beatmap_carousel::catalog::CatalogError>(())
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::types::BeatmapSetInfo;

pub mod error;

pub use error::CatalogError;

/// Beatmap set records indexed by set id
#[derive(Debug, Default)]
pub struct Catalog {
    /// Records in file order
    sets: Vec<BeatmapSetInfo>,
    /// Maps set id to its position in `sets`
    index: HashMap<u64, usize>,
}

impl Catalog {
    /// Builds a catalog from records already in memory
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateSet` if two records share an id.
    pub fn from_sets(sets: Vec<BeatmapSetInfo>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(sets.len());

        for (position, set) in sets.iter().enumerate() {
            if index.insert(set.id, position).is_some() {
                return Err(CatalogError::DuplicateSet(set.id));
            }
        }

        Ok(Self { sets, index })
    }

    /// Reads and parses a JSON catalog file
    ///
    /// # Errors
    ///
    /// * `CatalogError::NotFound` - no file at `path`
    /// * `CatalogError::Io` - file exists but could not be read
    /// * `CatalogError::Json` - content is not a list of set records
    /// * `CatalogError::DuplicateSet` - two records share an id
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let sets: Vec<BeatmapSetInfo> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %path.display(), sets = sets.len(), "catalog loaded");
        Self::from_sets(sets)
    }

    /// Looks up a family record by set id
    pub fn get(&self, set_id: u64) -> Option<&BeatmapSetInfo> {
        self.index.get(&set_id).and_then(|&position| self.sets.get(position))
    }

    /// All records in file order
    pub fn sets(&self) -> &[BeatmapSetInfo] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests;
