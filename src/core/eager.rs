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

//! src/core/eager.rs
//!
//! Groups that always resolve to a selected child
//!
//! An `EagerSelectGroup` wraps a [`CarouselGroup`] and, whenever it is
//! selected while none of its children is, asks its [`SelectionStrategy`]
//! for a child and selects it. The check runs when the group becomes
//! selected and after every structural change or filter pass, so the UI
//! always has a concrete leaf to highlight.

use std::cmp::Ordering;

use crate::core::criteria::FilterCriteria;
use crate::core::group::CarouselGroup;
use crate::core::item::{CarouselItem, CarouselItemState, ChildId};
use crate::core::observable::Observable;

/// Decides which child an eager group selects on its own
pub trait SelectionStrategy<T> {
    fn next_to_select(&self, group: &CarouselGroup<T>) -> Option<ChildId>;
}

/// Uses the group's default pick: last selected, else first unfiltered
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstAvailable;

impl<T: CarouselItem> SelectionStrategy<T> for FirstAvailable {
    fn next_to_select(&self, group: &CarouselGroup<T>) -> Option<ChildId> {
        group.get_next_to_select()
    }
}

pub struct EagerSelectGroup<T, S> {
    group: CarouselGroup<T>,
    strategy: S,
}

impl<T: CarouselItem, S: SelectionStrategy<T>> EagerSelectGroup<T, S> {
    pub fn new(strategy: S) -> Self {
        Self {
            group: CarouselGroup::new(),
            strategy,
        }
    }

    /// Read access to the underlying group
    pub fn group(&self) -> &CarouselGroup<T> {
        &self.group
    }

    pub fn add_child(&mut self, child: T) -> ChildId {
        let id = self.group.add_child(child);
        self.attempt_selection();
        id
    }

    pub fn remove_child(&mut self, id: ChildId) -> Option<T> {
        let removed = self.group.remove_child(id);
        if removed.is_some() {
            self.attempt_selection();
        }
        removed
    }

    pub fn select_child(&mut self, id: ChildId) -> bool {
        self.group.select_child(id)
    }

    pub fn sort(&mut self, criteria: &FilterCriteria) {
        self.group.sort(criteria);
    }

    /// Selects a child if the group is selected and no child is
    pub fn attempt_selection(&mut self) {
        if !self.group.is_selected() || self.group.selected_child().is_some() {
            return;
        }

        self.perform_selection();
    }

    fn perform_selection(&mut self) {
        match self.strategy.next_to_select(&self.group) {
            Some(id) => {
                tracing::debug!(child = %id, "eager selection picked child");
                self.group.select_child(id);
            }
            None => tracing::debug!("eager selection found no eligible child"),
        }
    }
}

impl<T: CarouselItem, S: SelectionStrategy<T>> CarouselItem for EagerSelectGroup<T, S> {
    fn id(&self) -> ChildId {
        self.group.id()
    }

    fn assign_id(&mut self, id: ChildId) {
        self.group.assign_id(id);
    }

    fn filtered(&self) -> &Observable<bool> {
        self.group.filtered()
    }

    fn state(&self) -> &Observable<CarouselItemState> {
        self.group.state()
    }

    fn filter(&mut self, criteria: &FilterCriteria) {
        self.group.filter(criteria);
        self.attempt_selection();
    }

    fn compare_to(&self, criteria: &FilterCriteria, other: &Self) -> Ordering {
        self.group.compare_to(criteria, &other.group)
    }

    fn set_state(&mut self, state: CarouselItemState) -> bool {
        let changed = self.group.set_state(state);
        if changed && state == CarouselItemState::Selected {
            self.attempt_selection();
        }
        changed
    }

    fn select_path(&mut self, path: &[ChildId]) -> bool {
        if path.is_empty() {
            self.set_state(CarouselItemState::Selected);
            return true;
        }

        self.group.select_path(path)
    }
}
