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

//! src/core/group.rs
//!
//! Generic composite node
//!
//! A `CarouselGroup<T>` owns its children in insertion (structural) order
//! and never reorders them. Sorting only produces a cached display order,
//! rebuilt on every filter pass. The group's `filtered` flag is always
//! derived from its children: it is set when every child is filtered.
//!
//! The "last selected" hint is stored as a [`ChildId`]; once the child is
//! removed the id no longer resolves and the hint reads as absent.

use std::cmp::Ordering;

use crate::core::criteria::FilterCriteria;
use crate::core::item::{CarouselItem, CarouselItemState, ChildId};
use crate::core::observable::Observable;

pub struct CarouselGroup<T> {
    id: ChildId,
    children: Vec<T>,
    /// Indices into `children`, in display order
    display_order: Vec<usize>,
    next_child_id: u64,
    last_selected: Option<ChildId>,
    filtered: Observable<bool>,
    state: Observable<CarouselItemState>,
}

impl<T: CarouselItem> CarouselGroup<T> {
    pub fn new() -> Self {
        Self {
            id: ChildId::default(),
            children: Vec::new(),
            display_order: Vec::new(),
            next_child_id: 0,
            last_selected: None,
            filtered: Observable::new(false),
            state: Observable::new(CarouselItemState::NotSelected),
        }
    }

    /// Appends a child after all existing siblings
    pub fn add_child(&mut self, mut child: T) -> ChildId {
        self.next_child_id += 1;
        let id = ChildId::new(self.next_child_id);
        child.assign_id(id);

        self.display_order.push(self.children.len());
        self.children.push(child);
        id
    }

    /// Detaches a child and resets it to `NotSelected`
    pub fn remove_child(&mut self, id: ChildId) -> Option<T> {
        let index = self.index_of(id)?;
        let mut child = self.children.remove(index);

        self.display_order.retain(|&i| i != index);
        for i in &mut self.display_order {
            if *i > index {
                *i -= 1;
            }
        }

        // After removal, so nothing reacting to the state change still sees it
        child.set_state(CarouselItemState::NotSelected);
        Some(child)
    }

    /// Children in structural (insertion) order
    pub fn children(&self) -> &[T] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, id: ChildId) -> Option<&T> {
        self.children.iter().find(|child| child.id() == id)
    }

    pub fn child_mut(&mut self, id: ChildId) -> Option<&mut T> {
        self.children.iter_mut().find(|child| child.id() == id)
    }

    fn index_of(&self, id: ChildId) -> Option<usize> {
        self.children.iter().position(|child| child.id() == id)
    }

    /// Children in the order computed by the last filter pass
    ///
    /// Children added since then come last, in insertion order.
    pub fn iter_display(&self) -> impl Iterator<Item = &T> + '_ {
        self.display_order
            .iter()
            .filter_map(move |&index| self.children.get(index))
    }

    /// Children sorted under `criteria` without touching the group
    ///
    /// The sort is stable, so ties keep insertion order.
    pub fn sorted_children(&self, criteria: &FilterCriteria) -> Vec<&T> {
        self.sorted_indices(criteria)
            .into_iter()
            .filter_map(|index| self.children.get(index))
            .collect()
    }

    /// Rebuilds the cached display order under `criteria`
    pub fn sort(&mut self, criteria: &FilterCriteria) {
        self.display_order = self.sorted_indices(criteria);
    }

    fn sorted_indices(&self, criteria: &FilterCriteria) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.children.len()).collect();
        order.sort_by(|&a, &b| match (self.children.get(a), self.children.get(b)) {
            (Some(a), Some(b)) => a.compare_to(criteria, b),
            _ => Ordering::Equal,
        });
        order
    }

    /// The most recently selected child, if it is still present
    pub fn last_selected(&self) -> Option<&T> {
        self.last_selected.and_then(|id| self.child(id))
    }

    pub fn selected_child(&self) -> Option<&T> {
        self.children.iter().find(|child| child.is_selected())
    }

    /// Recomputes `filtered` as the AND of every child's flag
    ///
    /// An empty group counts as filtered.
    pub fn update_filtered(&self) -> bool {
        let all_filtered = self.children.iter().all(|child| child.is_filtered());
        self.filtered.set(all_filtered)
    }

    /// Default pick for eager selection
    ///
    /// Returns the last selected child while it is still eligible (unfiltered,
    /// or still holding the selection), otherwise the first unfiltered child
    /// in display order. `None` when every child is filtered.
    pub fn get_next_to_select(&self) -> Option<ChildId> {
        if let Some(hint) = self.last_selected() {
            if !hint.is_filtered() || hint.is_selected() {
                return Some(hint.id());
            }
        }

        self.iter_display()
            .find(|child| !child.is_filtered())
            .map(|child| child.id())
    }

    /// Selects a direct child, deselecting its siblings
    pub fn select_child(&mut self, id: ChildId) -> bool {
        let Some(child) = self.child_mut(id) else {
            return false;
        };

        child.set_state(CarouselItemState::Selected);
        self.child_selected(id);
        true
    }

    /// Bookkeeping once a child has become selected
    fn child_selected(&mut self, id: ChildId) {
        for sibling in self.children.iter_mut().filter(|child| child.id() != id) {
            sibling.set_state(CarouselItemState::NotSelected);
        }

        self.last_selected = Some(id);
        self.state.set(CarouselItemState::Selected);
        tracing::trace!(child = %id, "child selected");
    }
}

impl<T: CarouselItem> Default for CarouselGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CarouselItem> CarouselItem for CarouselGroup<T> {
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
        for child in &mut self.children {
            child.filter(criteria);
        }

        self.update_filtered();
        self.sort(criteria);
    }

    fn set_state(&mut self, state: CarouselItemState) -> bool {
        let changed = self.state.set(state);

        if state == CarouselItemState::NotSelected {
            for child in &mut self.children {
                child.set_state(CarouselItemState::NotSelected);
            }
        }

        changed
    }

    fn select_path(&mut self, path: &[ChildId]) -> bool {
        let Some((&id, rest)) = path.split_first() else {
            self.set_state(CarouselItemState::Selected);
            return true;
        };

        let Some(child) = self.child_mut(id) else {
            return false;
        };

        if !child.select_path(rest) {
            return false;
        }

        self.child_selected(id);
        true
    }
}
