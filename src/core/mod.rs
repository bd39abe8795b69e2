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

//! src/core/mod.rs
//!
//! Core carousel logic
//!
//! This module contains the selection/filter/sort tree:
//! - Catalog record types and the observable value primitive
//! - The node protocol (`CarouselItem`) and the difficulty leaf
//! - Generic and eager-select groups
//! - The beatmap set node with its comparator and first-pick heuristic
//! - Filter criteria and the search query parser
//!
//! Nothing here performs I/O, so the whole tree is unit-testable without a
//! catalog on disk or a display.

pub mod beatmap_set;
pub mod criteria;
pub mod eager;
pub mod error;
pub mod group;
pub mod item;
pub mod observable;
pub mod types;

pub use beatmap_set::{difficulty_distance, CarouselBeatmapSet, RecommendedDifficulty};
pub use criteria::{FilterCriteria, GroupMode, OptionalRange, QueryParser, SortMode};
pub use eager::{EagerSelectGroup, FirstAvailable, SelectionStrategy};
pub use error::CarouselError;
pub use group::CarouselGroup;
pub use item::{CarouselBeatmap, CarouselItem, CarouselItemState, ChildId};
pub use observable::{Observable, SubscriptionId};
pub use types::*;

#[cfg(test)]
pub(crate) mod tests;
