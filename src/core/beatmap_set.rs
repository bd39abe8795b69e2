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

//! src/core/beatmap_set.rs
//!
//! Beatmap set node
//!
//! A `CarouselBeatmapSet` is an eager-select group whose children are the
//! set's visible difficulties. It supplies:
//! - the set-level comparator for every [`SortMode`]
//! - the first-pick heuristic: closest to the recommended star difficulty,
//!   preferring easier difficulties over harder ones
//!
//! # Aggregate Sorting
//! BPM, length and difficulty sorts compare the maximum over each set's
//! *valid* difficulties (unfiltered, or currently selected). A set with no
//! valid difficulty sorts after any set that has one.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::core::criteria::{FilterCriteria, SortMode};
use crate::core::eager::{EagerSelectGroup, SelectionStrategy};
use crate::core::group::CarouselGroup;
use crate::core::item::{CarouselBeatmap, CarouselItem, CarouselItemState, ChildId};
use crate::core::observable::Observable;
use crate::core::types::{BeatmapInfo, BeatmapSetInfo};

/// Scores how far a difficulty is from the recommendation (lower is better)
///
/// Being harder than recommended costs twice as much per star as being
/// easier, so near-ties resolve towards the easier difficulty.
pub fn difficulty_distance(star_difficulty: f64, recommended: f64) -> f64 {
    let difference = star_difficulty - recommended;

    if difference >= 0.0 {
        difference * 2.0
    } else {
        -difference
    }
}

/// First-pick strategy driven by a shared recommended star difficulty
///
/// Only governs the very first pick. Once the set has a selection history,
/// the group default (last selected, else first unfiltered) takes over.
pub struct RecommendedDifficulty {
    recommended: Observable<f64>,
}

impl RecommendedDifficulty {
    pub fn new(recommended: Observable<f64>) -> Self {
        Self { recommended }
    }

    /// Current recommendation, read at use
    pub fn value(&self) -> f64 {
        self.recommended.get()
    }
}

impl SelectionStrategy<CarouselBeatmap> for RecommendedDifficulty {
    fn next_to_select(&self, group: &CarouselGroup<CarouselBeatmap>) -> Option<ChildId> {
        if group.last_selected().is_none() {
            let recommended = self.value();

            // min_by keeps the first of equal elements: ties go to structural order
            let closest = group
                .children()
                .iter()
                .filter(|beatmap| !beatmap.is_filtered())
                .min_by(|a, b| {
                    let a = difficulty_distance(a.beatmap().star_difficulty, recommended);
                    let b = difficulty_distance(b.beatmap().star_difficulty, recommended);
                    a.total_cmp(&b)
                });

            if let Some(beatmap) = closest {
                return Some(beatmap.id());
            }
        }

        group.get_next_to_select()
    }
}

type SetComparator = fn(&CarouselBeatmapSet, &CarouselBeatmapSet) -> Ordering;

/// Maps a sort mode to the set-level comparator, if sets can order by it
fn set_comparator(sort: SortMode) -> Option<SetComparator> {
    let compare: SetComparator = match sort {
        SortMode::Artist => |a, b| compare_ignore_case(&a.info.metadata.artist, &b.info.metadata.artist),
        SortMode::Title => |a, b| compare_ignore_case(&a.info.metadata.title, &b.info.metadata.title),
        SortMode::Author => |a, b| {
            compare_ignore_case(&a.info.metadata.author.username, &b.info.metadata.author.username)
        },
        SortMode::Source => |a, b| compare_ignore_case(&a.info.metadata.source, &b.info.metadata.source),
        // Most recent first
        SortMode::DateAdded => |a, b| b.info.date_added.cmp(&a.info.date_added),
        SortMode::BPM => |a, b| a.compare_using_aggregate_max(b, |beatmap| beatmap.bpm),
        SortMode::Length => |a, b| a.compare_using_aggregate_max(b, |beatmap| beatmap.length),
        SortMode::Difficulty => {
            |a, b| a.compare_using_aggregate_max(b, |beatmap| beatmap.star_difficulty)
        }
        SortMode::RankAchieved => return None,
    };

    Some(compare)
}

/// Ordinal comparison after lower-casing both sides
fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

pub struct CarouselBeatmapSet {
    info: Rc<BeatmapSetInfo>,
    beatmaps: EagerSelectGroup<CarouselBeatmap, RecommendedDifficulty>,
}

impl CarouselBeatmapSet {
    /// Wraps a set record, adding one child per non-hidden difficulty
    ///
    /// `recommended` is bound, not copied: later writes to it are seen by the
    /// next first-pick.
    pub fn new(info: impl Into<Rc<BeatmapSetInfo>>, recommended: &Observable<f64>) -> Self {
        let info = info.into();
        let mut beatmaps = EagerSelectGroup::new(RecommendedDifficulty::new(recommended.clone()));

        for beatmap in info.beatmaps.iter().filter(|beatmap| !beatmap.hidden) {
            beatmaps.add_child(CarouselBeatmap::new(Rc::clone(&info), beatmap.clone()));
        }

        Self { info, beatmaps }
    }

    pub fn info(&self) -> &BeatmapSetInfo {
        &self.info
    }

    pub fn group(&self) -> &CarouselGroup<CarouselBeatmap> {
        self.beatmaps.group()
    }

    /// Difficulty nodes in structural order
    pub fn beatmaps(&self) -> impl Iterator<Item = &CarouselBeatmap> + '_ {
        self.beatmaps.group().children().iter()
    }

    /// Difficulties that count for aggregate sorting
    ///
    /// A selected difficulty stays valid even when filtered, so the selected
    /// set does not jump around while the user types a query.
    pub fn valid_beatmaps(&self) -> impl Iterator<Item = &BeatmapInfo> + '_ {
        self.beatmaps()
            .filter(|beatmap| !beatmap.is_filtered() || beatmap.is_selected())
            .map(CarouselBeatmap::beatmap)
    }

    pub fn selected_beatmap(&self) -> Option<&BeatmapInfo> {
        self.beatmaps
            .group()
            .selected_child()
            .map(CarouselBeatmap::beatmap)
    }

    /// Child id of the difficulty with catalog id `beatmap_id`
    pub fn find_beatmap(&self, beatmap_id: u64) -> Option<ChildId> {
        self.beatmaps()
            .find(|beatmap| beatmap.beatmap().id == beatmap_id)
            .map(|beatmap| beatmap.id())
    }

    fn compare_using_aggregate_max(&self, other: &Self, field: fn(&BeatmapInfo) -> f64) -> Ordering {
        let ours = self.valid_beatmaps().map(field).reduce(f64::max);
        let theirs = other.valid_beatmaps().map(field).reduce(f64::max);

        match (ours, theirs) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(ours), Some(theirs)) => ours.total_cmp(&theirs),
        }
    }
}

impl CarouselItem for CarouselBeatmapSet {
    fn id(&self) -> ChildId {
        self.beatmaps.id()
    }

    fn assign_id(&mut self, id: ChildId) {
        self.beatmaps.assign_id(id);
    }

    fn filtered(&self) -> &Observable<bool> {
        self.beatmaps.filtered()
    }

    fn state(&self) -> &Observable<CarouselItemState> {
        self.beatmaps.state()
    }

    fn filter(&mut self, criteria: &FilterCriteria) {
        self.beatmaps.filter(criteria);
        self.beatmaps.group().update_filtered();
    }

    fn compare_to(&self, criteria: &FilterCriteria, other: &Self) -> Ordering {
        match set_comparator(criteria.sort) {
            Some(compare) => compare(self, other),
            None => self.beatmaps.compare_to(criteria, &other.beatmaps),
        }
    }

    fn set_state(&mut self, state: CarouselItemState) -> bool {
        self.beatmaps.set_state(state)
    }

    fn select_path(&mut self, path: &[ChildId]) -> bool {
        self.beatmaps.select_path(path)
    }
}

impl fmt::Display for CarouselBeatmapSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info)
    }
}
