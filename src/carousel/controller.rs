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

//! src/carousel/controller.rs
//!
//! Carousel controller - mediates between the catalog and the node tree
//!
//! # Responsibilities
//!
//! - Build set nodes from catalog records
//! - Run filter passes with the current criteria
//! - Route navigation (select a set, select a difficulty) through the root
//! - Expose the resolved selection and the visible sets in display order
//!
//! The controller holds no presentation state. Callers render whatever
//! [`BeatmapCarousel::visible_sets`] yields.

use crate::catalog::Catalog;
use crate::core::{
    BeatmapInfo, BeatmapSetInfo, CarouselBeatmapSet, CarouselError, CarouselGroup, CarouselItem,
    ChildId, EagerSelectGroup, FilterCriteria, FirstAvailable, Observable,
};

/// Root of the carousel tree
///
/// Sets hang off an eager root group, so removing the selected set moves
/// the selection to the next available one instead of leaving nothing
/// selected.
pub struct BeatmapCarousel {
    root: EagerSelectGroup<CarouselBeatmapSet, FirstAvailable>,
    /// Shared with every set's first-pick strategy
    recommended_difficulty: Observable<f64>,
    criteria: FilterCriteria,
}

impl BeatmapCarousel {
    /// Creates an empty carousel bound to `recommended_difficulty`
    ///
    /// # Example
    ///
    /// ```
    /// use beatmap_carousel::carousel::BeatmapCarousel;
    /// use beatmap_carousel::core::Observable;
    ///
    /// let recommended = Observable::new(3.5);
    /// let carousel = BeatmapCarousel::new(recommended.clone());
    /// assert!(carousel.is_empty());
    ///
    /// // Later writes are seen by the next first-pick
    /// recommended.set(4.0);
    /// assert_eq!(carousel.recommended_difficulty().get(), 4.0);
    /// ```
    pub fn new(recommended_difficulty: Observable<f64>) -> Self {
        Self {
            root: EagerSelectGroup::new(FirstAvailable),
            recommended_difficulty,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn recommended_difficulty(&self) -> &Observable<f64> {
        &self.recommended_difficulty
    }

    /// Criteria of the last filter pass
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The root group, for read-only inspection
    pub fn root(&self) -> &CarouselGroup<CarouselBeatmapSet> {
        self.root.group()
    }

    pub fn len(&self) -> usize {
        self.root.group().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.group().is_empty()
    }

    /// Adds every set in `sets`, returning how many were added
    ///
    /// Stops at the first duplicate id.
    pub fn load<I>(&mut self, sets: I) -> Result<usize, CarouselError>
    where
        I: IntoIterator<Item = BeatmapSetInfo>,
    {
        let mut added = 0;
        for info in sets {
            if self.add_set(info)?.is_some() {
                added += 1;
            }
        }

        tracing::debug!(added, total = self.len(), "loaded beatmap sets");
        Ok(added)
    }

    /// Adds a set node for `info`
    ///
    /// The new set is filtered with the current criteria before it joins
    /// the tree. Sets without a single non-hidden difficulty are skipped.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(id))` - The set's id under the root
    /// * `Ok(None)` - Every difficulty is hidden, nothing was added
    /// * `Err(CarouselError::DuplicateBeatmapSet)` - A set with this id is already present
    pub fn add_set(&mut self, info: BeatmapSetInfo) -> Result<Option<ChildId>, CarouselError> {
        if self.find_set(info.id).is_some() {
            return Err(CarouselError::DuplicateBeatmapSet(info.id));
        }

        let set_id = info.id;
        let mut set = CarouselBeatmapSet::new(info, &self.recommended_difficulty);
        if set.group().is_empty() {
            tracing::debug!(set_id, "skipping set with no visible difficulties");
            return Ok(None);
        }

        set.filter(&self.criteria);
        let id = self.root.add_child(set);
        self.root.sort(&self.criteria);
        self.root.group().update_filtered();

        tracing::trace!(set_id, child = %id, "added beatmap set");
        Ok(Some(id))
    }

    /// Adds the set with id `set_id` from `catalog`
    pub fn add_from_catalog(
        &mut self,
        catalog: &Catalog,
        set_id: u64,
    ) -> Result<Option<ChildId>, CarouselError> {
        let info = catalog
            .get(set_id)
            .ok_or(CarouselError::UnknownBeatmapSet(set_id))?;

        self.add_set(info.clone())
    }

    /// Replaces the set sharing `info`'s id (or adds it when absent)
    ///
    /// If one of the old set's difficulties was selected and the new record
    /// still has it, it is selected again. If only the set itself survives,
    /// the set is reselected and picks a difficulty on its own.
    pub fn update_set(&mut self, info: BeatmapSetInfo) -> Result<Option<ChildId>, CarouselError> {
        let set_id = info.id;
        let previous = self
            .find_set(set_id)
            .and_then(|id| self.root.group().child(id))
            .filter(|set| set.is_selected())
            .map(|set| set.selected_beatmap().map(|beatmap| beatmap.id));

        self.remove_set(set_id);
        let id = self.add_set(info)?;

        // The replaced difficulty was selected before this pass, so it keeps
        // the selection even when the current criteria filter it out
        let restored = match previous {
            Some(Some(beatmap_id)) => self
                .find_beatmap_path(beatmap_id)
                .is_some_and(|(path, _)| self.root.select_path(&path)),
            _ => false,
        };

        if previous.is_some() && !restored {
            self.select_set(set_id);
        }

        Ok(id)
    }

    /// Removes the set with id `set_id`, returning its node
    pub fn remove_set(&mut self, set_id: u64) -> Option<CarouselBeatmapSet> {
        let id = self.find_set(set_id)?;
        let removed = self.root.remove_child(id);
        self.root.group().update_filtered();

        tracing::trace!(set_id, "removed beatmap set");
        removed
    }

    /// Runs a filter pass over the whole tree and keeps `criteria`
    pub fn filter(&mut self, criteria: FilterCriteria) {
        self.root.filter(&criteria);
        self.criteria = criteria;

        tracing::debug!(
            visible = self.visible_sets().count(),
            total = self.len(),
            sort = %self.criteria.sort,
            "filter pass complete"
        );
    }

    /// Selects the set with id `set_id`; the set then picks a difficulty
    ///
    /// Returns `false` when no such set exists or every difficulty in it is
    /// filtered out. The current selection is left untouched in that case.
    pub fn select_set(&mut self, set_id: u64) -> bool {
        let Some(set) = self.sets().find(|set| set.info().id == set_id) else {
            tracing::debug!(set_id, "cannot select unknown set");
            return false;
        };

        if !is_selectable(set) {
            tracing::debug!(set_id, "cannot select filtered set");
            return false;
        }

        let id = set.id();
        self.root.select_path(&[id])
    }

    /// Selects the difficulty with catalog id `beatmap_id` and its set
    ///
    /// Returns `false` when no set contains it or it is filtered out.
    pub fn select_beatmap(&mut self, beatmap_id: u64) -> bool {
        let Some((path, selectable)) = self.find_beatmap_path(beatmap_id) else {
            tracing::debug!(beatmap_id, "cannot select unknown beatmap");
            return false;
        };

        if !selectable {
            tracing::debug!(beatmap_id, "cannot select filtered beatmap");
            return false;
        }

        self.root.select_path(&path)
    }

    pub fn selected_set(&self) -> Option<&CarouselBeatmapSet> {
        self.root.group().selected_child()
    }

    pub fn selected_beatmap(&self) -> Option<&BeatmapInfo> {
        self.selected_set()?.selected_beatmap()
    }

    /// All set nodes in structural (insertion) order
    pub fn sets(&self) -> impl Iterator<Item = &CarouselBeatmapSet> + '_ {
        self.root.group().children().iter()
    }

    /// Sets to display, in display order
    ///
    /// A filtered set is still listed while it holds the selection.
    pub fn visible_sets(&self) -> impl Iterator<Item = &CarouselBeatmapSet> + '_ {
        self.root.group().iter_display().filter(|set| set.visible())
    }

    /// Path from the root to a difficulty, and whether navigation may select it
    fn find_beatmap_path(&self, beatmap_id: u64) -> Option<([ChildId; 2], bool)> {
        self.sets().find_map(|set| {
            let id = set.find_beatmap(beatmap_id)?;
            let beatmap = set.group().child(id)?;
            Some(([set.id(), id], is_selectable(beatmap)))
        })
    }

    fn find_set(&self, set_id: u64) -> Option<ChildId> {
        self.sets()
            .find(|set| set.info().id == set_id)
            .map(|set| set.id())
    }
}

impl Default for BeatmapCarousel {
    fn default() -> Self {
        Self::new(Observable::default())
    }
}

/// Filtered nodes can only be navigated to while they already hold the selection
fn is_selectable<T: CarouselItem>(item: &T) -> bool {
    !item.is_filtered() || item.is_selected()
}
