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

//! src/core/item.rs
//!
//! Carousel node protocol and the leaf node
//!
//! Every node in the tree, leaf or group, implements [`CarouselItem`]. The
//! trait carries the two observable flags (`filtered`, `state`) and the
//! three overridable operations: filtering, comparison and selection.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::core::criteria::FilterCriteria;
use crate::core::observable::Observable;
use crate::core::types::{BeatmapInfo, BeatmapSetInfo};

/// Selection state of a node
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CarouselItemState {
    #[default]
    NotSelected,
    Selected,
}

/// Identifier a group hands out to each child it adopts
///
/// Ids are unique within one group and never reused, so a stale id simply
/// fails to resolve after its child is removed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChildId(u64);

impl ChildId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capabilities shared by every carousel node
///
/// Groups provide default behaviour through [`CarouselGroup`]; concrete node
/// types override `filter`, `compare_to` or selection and delegate back to
/// the group explicitly where they want the default.
///
/// [`CarouselGroup`]: crate::core::group::CarouselGroup
pub trait CarouselItem {
    /// Id assigned by the owning group (zero until adopted)
    fn id(&self) -> ChildId;

    /// Called once by the owning group on insertion
    fn assign_id(&mut self, id: ChildId);

    fn filtered(&self) -> &Observable<bool>;

    fn state(&self) -> &Observable<CarouselItemState>;

    /// Re-evaluates this node (and its subtree) against `criteria`
    fn filter(&mut self, criteria: &FilterCriteria);

    /// Orders two siblings under the active sort mode
    ///
    /// The default is insertion order.
    fn compare_to(&self, _criteria: &FilterCriteria, other: &Self) -> Ordering {
        self.id().cmp(&other.id())
    }

    /// Moves this node into `state`, returning whether anything changed
    ///
    /// Writing the current state is a no-op and triggers no cascade.
    fn set_state(&mut self, state: CarouselItemState) -> bool {
        self.state().set(state)
    }

    /// Selects the descendant addressed by `path` (child ids, outermost
    /// first). An empty path selects this node itself.
    fn select_path(&mut self, path: &[ChildId]) -> bool {
        if !path.is_empty() {
            return false;
        }

        self.set_state(CarouselItemState::Selected);
        true
    }

    fn is_filtered(&self) -> bool {
        self.filtered().get()
    }

    fn is_selected(&self) -> bool {
        self.state().get() == CarouselItemState::Selected
    }

    /// Filtered nodes stay visible while they hold the selection
    fn visible(&self) -> bool {
        !self.is_filtered() || self.is_selected()
    }
}

/// A single difficulty shown under its set
pub struct CarouselBeatmap {
    id: ChildId,
    set: Rc<BeatmapSetInfo>,
    beatmap: BeatmapInfo,
    filtered: Observable<bool>,
    state: Observable<CarouselItemState>,
}

impl CarouselBeatmap {
    pub fn new(set: Rc<BeatmapSetInfo>, beatmap: BeatmapInfo) -> Self {
        Self {
            id: ChildId::default(),
            set,
            beatmap,
            filtered: Observable::new(false),
            state: Observable::new(CarouselItemState::NotSelected),
        }
    }

    pub fn beatmap(&self) -> &BeatmapInfo {
        &self.beatmap
    }

    /// The family record this difficulty belongs to
    pub fn set_info(&self) -> &BeatmapSetInfo {
        &self.set
    }
}

impl CarouselItem for CarouselBeatmap {
    fn id(&self) -> ChildId {
        self.id
    }

    fn assign_id(&mut self, id: ChildId) {
        self.id = id;
    }

    fn filtered(&self) -> &Observable<bool> {
        &self.filtered
    }

    fn state(&self) -> &Observable<CarouselItemState> {
        &self.state
    }

    fn filter(&mut self, criteria: &FilterCriteria) {
        let matched = criteria.matches(&self.beatmap, &self.set.metadata);
        self.filtered.set(!matched);
    }

    /// Difficulties inside a set always read easiest first
    fn compare_to(&self, _criteria: &FilterCriteria, other: &Self) -> Ordering {
        self.beatmap
            .star_difficulty
            .total_cmp(&other.beatmap.star_difficulty)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for CarouselBeatmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.beatmap)
    }
}
