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

//! src/carousel/mod.rs
//!
//! Selection controller
//!
//! [`BeatmapCarousel`] owns the root of the tree and is the single place
//! navigation enters it, which is what keeps exactly one difficulty
//! selected across all sets.

pub mod controller;

pub use controller::BeatmapCarousel;

#[cfg(test)]
mod tests;
