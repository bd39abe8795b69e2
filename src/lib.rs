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

//! Beatmap Carousel
//!
//! The selection, filtering and sorting core of a song-select carousel:
//! beatmap sets hang under a root group, each set groups its difficulties,
//! and navigation always resolves to exactly one selected difficulty.
//!
//! # Features
//!
//! - **Eager Selection:** Selecting a set picks a difficulty on its own,
//!   closest to a shared recommended star difficulty
//! - **Filtering:** Free-text queries with `stars>4 bpm<200 length<3m` style conditions
//! - **Sorting:** By artist, title, author, source, date added, BPM, length or difficulty
//! - **Stable Selection:** Filtering never takes the selection away
//!
//! # Architecture
//!
//! - **`core`:** Node tree (items, groups, eager groups, beatmap sets) and filter criteria
//! - **`catalog`:** Loading beatmap set records from JSON
//! - **`carousel`:** The controller that owns the root and routes navigation
//!
//! # Examples
//!
//! ## Selecting from a catalog
//!
//! ```no_run
//! use beatmap_carousel::carousel::BeatmapCarousel;
//! use beatmap_carousel::catalog::Catalog;
//! use beatmap_carousel::core::{FilterCriteria, Observable, SortMode};
//! use std::path::Path;
//!
//! let catalog = Catalog::load(Path::new("/tmp/catalog.json"))?;
//!
//! let mut carousel = BeatmapCarousel::new(Observable::new(4.0));
//! carousel.load(catalog.sets().iter().cloned())?;
//! carousel.filter(FilterCriteria::parse("stars>3", SortMode::Difficulty));
//!
//! let first_set_id = carousel.visible_sets().next().map(|set| set.info().id);
//! if let Some(set_id) = first_set_id {
//!     carousel.select_set(set_id);
//! }
//!
//! if let Some(beatmap) = carousel.selected_beatmap() {
//!     println!("Selected {}", beatmap);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod carousel;
pub mod catalog;
pub mod core;

// Re-export commonly used types for convenience
pub use carousel::BeatmapCarousel;
pub use catalog::Catalog;
pub use core::{BeatmapInfo, BeatmapSetInfo, CarouselItem, FilterCriteria, Observable, SortMode};
