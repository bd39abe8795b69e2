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

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::catalog::{Catalog, CatalogError};
use crate::core::tests::fixtures::{beatmap, set_info};

/// Helper: Writes a catalog file with two sets
fn create_test_catalog() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("catalog.json");

    let content = r#"[
        {
            "id": 1,
            "metadata": {
                "title": "Blue Zenith",
                "artist": "xi",
                "author": { "username": "Asphyxia" },
                "tags": "gcm"
            },
            "date_added": "2021-01-01T00:00:00Z",
            "beatmaps": [
                { "id": 10, "version": "Hard", "star_difficulty": 4.2, "bpm": 200.0, "length": 240000.0 },
                { "id": 11, "version": "FOUR DIMENSIONS", "star_difficulty": 7.1, "bpm": 200.0, "length": 240000.0 }
            ]
        },
        {
            "id": 2,
            "metadata": {
                "title": "Ghost",
                "artist": "Camellia",
                "author": { "username": "Mir" }
            },
            "date_added": "2022-06-15T12:30:00Z",
            "beatmaps": [
                { "id": 20, "version": "Extra", "star_difficulty": 6.0, "bpm": 180.0, "length": 200000.0, "hidden": true }
            ]
        }
    ]"#;

    fs::write(&catalog_path, content).unwrap();
    (temp_dir, catalog_path)
}

#[test]
fn test_load_catalog() {
    let (_temp_dir, path) = create_test_catalog();
    let catalog = Catalog::load(&path).unwrap();

    assert_eq!(catalog.len(), 2);
    assert!(!catalog.is_empty());

    let first = catalog.get(1).unwrap();
    assert_eq!(first.metadata.artist, "xi");
    assert_eq!(first.beatmaps.len(), 2);
    assert!(catalog.get(2).unwrap().beatmaps[0].hidden);
    assert!(catalog.get(3).is_none());
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.json");

    match Catalog::load(&path) {
        Err(CatalogError::NotFound(reported)) => assert_eq!(reported, path),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_load_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    fs::write(&path, "{ not a list").unwrap();

    let result = Catalog::load(&path);
    assert!(matches!(result, Err(CatalogError::Json { .. })));
}

#[test]
fn test_duplicate_ids_rejected() {
    let sets = vec![
        set_info(1, "a", "a", vec![beatmap(1, 1.0)]),
        set_info(1, "b", "b", vec![beatmap(2, 2.0)]),
    ];

    let result = Catalog::from_sets(sets);
    assert!(matches!(result, Err(CatalogError::DuplicateSet(1))));
}

#[test]
fn test_sets_keep_file_order() {
    let sets = vec![
        set_info(5, "a", "a", vec![]),
        set_info(3, "b", "b", vec![]),
    ];

    let catalog = Catalog::from_sets(sets).unwrap();
    let ids: Vec<u64> = catalog.sets().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![5, 3]);
}
