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

use thiserror::Error;

/// Errors raised while building or mutating the carousel tree.
///
/// Filtering, sorting and selection never fail; only construction does.
#[derive(Debug, Error, PartialEq)]
pub enum CarouselError {
    /// The family record a set node should wrap is absent.
    #[error("Beatmap set {0} not found in catalog")]
    UnknownBeatmapSet(u64),
    /// A set with this id is already part of the carousel.
    #[error("Beatmap set {0} is already in the carousel")]
    DuplicateBeatmapSet(u64),
}
