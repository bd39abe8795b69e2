// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

//! Controller tests
//!
//! Navigation and structural changes through the carousel root

use crate::carousel::BeatmapCarousel;
use crate::catalog::Catalog;
use crate::core::tests::fixtures::{beatmap, set_info, stars_between};
use crate::core::{BeatmapSetInfo, CarouselError, CarouselItem, FilterCriteria, Observable, SortMode};

/// Helper: three sets with difficulties spread over 1-7 stars
fn create_test_sets() -> Vec<BeatmapSetInfo> {
    vec![
        set_info(1, "xi", "Blue Zenith", vec![beatmap(11, 2.0), beatmap(12, 5.0), beatmap(13, 7.0)]),
        set_info(2, "Camellia", "Exit This Earth", vec![beatmap(21, 3.0), beatmap(22, 6.0)]),
        set_info(3, "Acid Black Cherry", "Yes", vec![beatmap(31, 1.0)]),
    ]
}

fn create_test_carousel(recommended: f64) -> BeatmapCarousel {
    let mut carousel = BeatmapCarousel::new(Observable::new(recommended));
    carousel.load(create_test_sets()).unwrap();
    carousel
}

fn visible_ids(carousel: &BeatmapCarousel) -> Vec<u64> {
    carousel.visible_sets().map(|set| set.info().id).collect()
}

fn selected_beatmap_id(carousel: &BeatmapCarousel) -> Option<u64> {
    carousel.selected_beatmap().map(|beatmap| beatmap.id)
}

#[test]
fn test_load_counts_sets() {
    let carousel = create_test_carousel(3.0);

    assert_eq!(carousel.len(), 3);
    assert!(carousel.selected_set().is_none(), "Nothing is selected before navigation");
}

#[test]
fn test_duplicate_set_rejected() {
    let mut carousel = create_test_carousel(3.0);
    let duplicate = set_info(2, "someone", "else", vec![beatmap(99, 1.0)]);

    assert_eq!(
        carousel.add_set(duplicate),
        Err(CarouselError::DuplicateBeatmapSet(2))
    );
    assert_eq!(carousel.len(), 3);
}

#[test]
fn test_all_hidden_set_skipped() {
    let mut carousel = BeatmapCarousel::default();
    let mut hidden = beatmap(1, 3.0);
    hidden.hidden = true;

    let added = carousel.add_set(set_info(1, "a", "b", vec![hidden])).unwrap();

    assert!(added.is_none(), "Set without visible difficulties should be skipped");
    assert!(carousel.is_empty());
}

#[test]
fn test_add_from_catalog() {
    let catalog = Catalog::from_sets(create_test_sets()).unwrap();
    let mut carousel = BeatmapCarousel::default();

    assert!(carousel.add_from_catalog(&catalog, 2).unwrap().is_some());
    assert_eq!(
        carousel.add_from_catalog(&catalog, 404),
        Err(CarouselError::UnknownBeatmapSet(404))
    );
    assert_eq!(carousel.len(), 1);
}

#[test]
fn test_select_set_picks_recommended_difficulty() {
    let mut carousel = create_test_carousel(4.0);

    assert!(carousel.select_set(1));

    // 5.0 costs 2.0, 2.0 costs 2.0: tie goes to the first in structural order
    assert_eq!(carousel.selected_set().map(|set| set.info().id), Some(1));
    assert_eq!(selected_beatmap_id(&carousel), Some(11));
}

#[test]
fn test_select_unknown_set() {
    let mut carousel = create_test_carousel(3.0);

    assert!(!carousel.select_set(404));
    assert!(carousel.selected_set().is_none());
}

#[test]
fn test_select_beatmap_moves_selection_across_sets() {
    let mut carousel = create_test_carousel(3.0);
    carousel.select_beatmap(12);

    assert!(carousel.select_beatmap(22));

    assert_eq!(selected_beatmap_id(&carousel), Some(22));
    let selected: Vec<u64> = carousel
        .sets()
        .filter(|set| set.is_selected())
        .map(|set| set.info().id)
        .collect();
    assert_eq!(selected, vec![2], "Exactly one set should hold the selection");

    let first = carousel.sets().next().unwrap();
    assert!(
        first.beatmaps().all(|beatmap| !beatmap.is_selected()),
        "Previous set's difficulties should all be deselected"
    );
}

#[test]
fn test_reselecting_set_restores_last_difficulty() {
    let mut carousel = create_test_carousel(3.0);
    carousel.select_beatmap(13);
    carousel.select_set(2);

    carousel.select_set(1);

    assert_eq!(selected_beatmap_id(&carousel), Some(13));
}

#[test]
fn test_filter_hides_sets_and_orders_display() {
    let mut carousel = create_test_carousel(3.0);

    carousel.filter(stars_between(4.0, 8.0));

    // Difficulty sort: max valid stars 7.0 for set 1, 6.0 for set 2
    assert_eq!(visible_ids(&carousel), vec![2, 1]);
    assert!(!carousel.root().is_filtered());
    assert_eq!(carousel.criteria().sort, SortMode::Difficulty);
}

#[test]
fn test_filter_keeps_selected_set_visible() {
    let mut carousel = create_test_carousel(3.0);
    carousel.select_set(3);

    carousel.filter(stars_between(4.0, 8.0));

    assert_eq!(selected_beatmap_id(&carousel), Some(31), "Filtering never deselects");
    assert!(visible_ids(&carousel).contains(&3));
}

#[test]
fn test_sort_by_artist_case_insensitive() {
    let mut carousel = create_test_carousel(3.0);

    carousel.filter(FilterCriteria::new(SortMode::Artist));

    assert_eq!(visible_ids(&carousel), vec![3, 2, 1]);
}

#[test]
fn test_sets_added_after_filter_are_filtered() {
    let mut carousel = create_test_carousel(3.0);
    carousel.filter(stars_between(4.0, 8.0));

    carousel
        .add_set(set_info(4, "Easy", "Set", vec![beatmap(41, 1.5)]))
        .unwrap();

    assert!(!visible_ids(&carousel).contains(&4));
}

#[test]
fn test_removing_selected_set_moves_selection() {
    let mut carousel = create_test_carousel(3.0);
    carousel.select_set(2);

    let removed = carousel.remove_set(2);

    assert!(removed.is_some());
    assert!(!removed.unwrap().is_selected(), "Removed set should be reset");
    assert_eq!(carousel.len(), 2);
    let selected = carousel.selected_set().map(|set| set.info().id);
    assert!(selected.is_some(), "Root should pick another set");
    assert_ne!(selected, Some(2));
}

#[test]
fn test_update_set_keeps_selected_difficulty() {
    let mut carousel = create_test_carousel(3.0);
    carousel.select_beatmap(22);

    let updated = set_info(2, "Camellia", "Exit This Earth", vec![beatmap(21, 3.0), beatmap(22, 6.5), beatmap(23, 8.0)]);
    carousel.update_set(updated).unwrap();

    assert_eq!(carousel.len(), 3);
    assert_eq!(selected_beatmap_id(&carousel), Some(22));
    assert_eq!(carousel.selected_beatmap().map(|beatmap| beatmap.star_difficulty), Some(6.5));
}

#[test]
fn test_update_set_reselects_when_difficulty_gone() {
    let mut carousel = create_test_carousel(3.0);
    carousel.select_beatmap(22);

    carousel
        .update_set(set_info(2, "Camellia", "Exit This Earth", vec![beatmap(24, 3.5)]))
        .unwrap();

    assert_eq!(carousel.selected_set().map(|set| set.info().id), Some(2));
    assert_eq!(selected_beatmap_id(&carousel), Some(24));
}

#[test]
fn test_recommendation_read_at_first_pick() {
    let recommended = Observable::new(1.0);
    let mut carousel = BeatmapCarousel::new(recommended.clone());
    carousel.load(create_test_sets()).unwrap();

    recommended.set(6.0);
    carousel.select_set(2);

    assert_eq!(selected_beatmap_id(&carousel), Some(22));
}

#[test]
fn test_select_fully_filtered_set_keeps_selection() {
    let mut carousel = create_test_carousel(3.0);
    carousel.filter(stars_between(4.0, 8.0));
    assert!(carousel.select_set(1));
    assert_eq!(selected_beatmap_id(&carousel), Some(12));

    assert!(!carousel.select_set(3), "Set with every difficulty filtered is not selectable");

    assert_eq!(selected_beatmap_id(&carousel), Some(12), "Previous selection should survive");
    let third = carousel.sets().find(|set| set.info().id == 3).unwrap();
    assert!(!third.is_selected());
}

#[test]
fn test_select_filtered_beatmap_rejected() {
    let mut carousel = create_test_carousel(3.0);
    carousel.filter(stars_between(4.0, 8.0));
    assert!(carousel.select_beatmap(12));

    assert!(!carousel.select_beatmap(11), "Filtered difficulty is not selectable");
    assert!(!carousel.select_beatmap(21), "Filtered difficulty in another set is not selectable");

    assert_eq!(selected_beatmap_id(&carousel), Some(12));
}

#[test]
fn test_selection_held_through_filter_can_be_reselected() {
    let mut carousel = create_test_carousel(3.0);
    carousel.select_beatmap(11);
    carousel.filter(stars_between(4.0, 8.0));

    assert!(carousel.select_beatmap(11));
    assert!(carousel.select_set(1));
    assert_eq!(selected_beatmap_id(&carousel), Some(11));
}

#[test]
fn test_update_set_keeps_filtered_selection() {
    let mut carousel = create_test_carousel(3.0);
    carousel.select_beatmap(31);
    carousel.filter(stars_between(4.0, 8.0));

    carousel
        .update_set(set_info(3, "Acid Black Cherry", "Yes", vec![beatmap(31, 1.0), beatmap(32, 1.2)]))
        .unwrap();

    assert_eq!(selected_beatmap_id(&carousel), Some(31));
    assert!(visible_ids(&carousel).contains(&3));
}

#[test]
fn test_sort_by_author_after_filter() {
    let mut carousel = BeatmapCarousel::default();
    let mut first = set_info(1, "a", "a", vec![beatmap(11, 1.0)]);
    first.metadata.author.username = "peppy".to_string();
    let mut second = set_info(2, "b", "b", vec![beatmap(21, 1.0)]);
    second.metadata.author.username = "Ameth".to_string();
    carousel.load(vec![first, second]).unwrap();

    carousel.filter(FilterCriteria::new(SortMode::Author));

    assert_eq!(visible_ids(&carousel), vec![2, 1]);
}
