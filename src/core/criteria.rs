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

//! src/core/criteria.rs
//!
//! Filter criteria and the search query parser
//!
//! A `FilterCriteria` is built once per filter pass and only ever read by
//! the tree. Free text typed into the search box goes through
//! `QueryParser`, which pulls out `key<op>value` conditions such as
//! `stars>4` or `length<=2m` and keeps the rest as search terms.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{BeatmapInfo, BeatmapMetadata};

/// Field the carousel is ordered by
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize, clap::ValueEnum)]
pub enum SortMode {
    #[default]
    Artist,
    Title,
    Author,
    Source,
    DateAdded,
    #[value(name = "bpm")]
    BPM,
    Length,
    Difficulty,
    /// Needs per-user score data, which catalog records do not carry
    RankAchieved,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Artist => write!(f, "artist"),
            SortMode::Title => write!(f, "title"),
            SortMode::Author => write!(f, "author"),
            SortMode::Source => write!(f, "source"),
            SortMode::DateAdded => write!(f, "date added"),
            SortMode::BPM => write!(f, "BPM"),
            SortMode::Length => write!(f, "length"),
            SortMode::Difficulty => write!(f, "difficulty"),
            SortMode::RankAchieved => write!(f, "rank achieved"),
        }
    }
}

/// How the presentation layer buckets sets into headers
///
/// The core carries this through untouched.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GroupMode {
    #[default]
    None,
    Artist,
    Author,
    DateAdded,
}

/// A numeric range where either bound may be absent
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OptionalRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub is_lower_inclusive: bool,
    pub is_upper_inclusive: bool,
}

impl OptionalRange {
    pub fn has_filter(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn is_in_range(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min || (value == min && !self.is_lower_inclusive) {
                return false;
            }
        }

        if let Some(max) = self.max {
            if value > max || (value == max && !self.is_upper_inclusive) {
                return false;
            }
        }

        true
    }

    /// Narrows the range according to a query operator
    ///
    /// `tolerance` widens `=` so that `stars=4.2` still hits 4.2049.
    fn apply(&mut self, op: &str, value: f64, tolerance: f64) -> bool {
        match op {
            "=" | ":" => {
                self.min = Some(value - tolerance);
                self.max = Some(value + tolerance);
                self.is_lower_inclusive = true;
                self.is_upper_inclusive = true;
            }
            ">" => {
                self.min = Some(value + tolerance);
                self.is_lower_inclusive = false;
            }
            ">=" => {
                self.min = Some(value - tolerance);
                self.is_lower_inclusive = true;
            }
            "<" => {
                self.max = Some(value - tolerance);
                self.is_upper_inclusive = false;
            }
            "<=" => {
                self.max = Some(value + tolerance);
                self.is_upper_inclusive = true;
            }
            _ => return false,
        }

        true
    }
}

/// Everything a filter pass is evaluated against
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
    pub sort: SortMode,
    pub group: GroupMode,

    /// Free text left after query conditions were removed
    pub search_text: String,

    /// Lower-cased words of `search_text`, each of which must match
    pub search_terms: Vec<String>,

    pub star_difficulty: OptionalRange,
    pub bpm: OptionalRange,

    /// In milliseconds
    pub length: OptionalRange,

    /// Lower-cased substring the author's username must contain
    pub creator: Option<String>,
    /// Lower-cased substring the artist must contain
    pub artist: Option<String>,
}

impl FilterCriteria {
    pub fn new(sort: SortMode) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Parses a search-box query, see [`QueryParser`]
    pub fn parse(query: &str, sort: SortMode) -> Self {
        QueryParser::new().parse(query, sort)
    }

    /// Replaces the free text and recomputes the search terms
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        self.search_terms = self
            .search_text
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
    }

    /// Whether a member of a set passes every condition
    pub fn matches(&self, beatmap: &BeatmapInfo, metadata: &BeatmapMetadata) -> bool {
        if !self.star_difficulty.is_in_range(beatmap.star_difficulty)
            || !self.bpm.is_in_range(beatmap.bpm)
            || !self.length.is_in_range(beatmap.length)
        {
            return false;
        }

        if let Some(creator) = &self.creator {
            if !metadata.author.username.to_lowercase().contains(creator) {
                return false;
            }
        }

        if let Some(artist) = &self.artist {
            if !metadata.artist.to_lowercase().contains(artist) {
                return false;
            }
        }

        let version = beatmap.version.to_lowercase();
        let terms: Vec<String> = metadata.searchable_terms().map(str::to_lowercase).collect();

        self.search_terms.iter().all(|needle| {
            version.contains(needle.as_str()) || terms.iter().any(|term| term.contains(needle.as_str()))
        })
    }
}

/// Splits a search-box query into criteria
///
/// Recognised conditions (case-insensitive keys):
/// - `stars`, `star`: star difficulty
/// - `bpm`
/// - `length`, `len`: seconds by default, `ms`/`s`/`m`/`h` suffixes allowed
/// - `creator`, `mapper`: author username substring
/// - `artist`: artist substring
///
/// Operators are `=`, `:`, `>`, `<`, `>=` and `<=`. A condition whose value
/// does not parse is left in the free text.
///
/// # Example
/// ```
/// use beatmap_carousel::core::{QueryParser, SortMode};
///
/// let criteria = QueryParser::new().parse("stars>4 bpm<=180 camellia", SortMode::Title);
/// assert_eq!(criteria.search_terms, vec!["camellia".to_string()]);
/// assert!(criteria.star_difficulty.is_in_range(4.5));
/// assert!(!criteria.bpm.is_in_range(200.0));
/// ```
pub struct QueryParser {
    condition: Regex,
    duration: Regex,
}

impl Default for QueryParser {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            condition: Regex::new(
                r#"(?i)\b(?P<key>stars|star|bpm|length|len|creator|mapper|artist)(?P<op>>=|<=|=|:|>|<)(?P<value>"[^"]*"|\S*)"#,
            )
            .expect("query condition pattern should be valid regex"),
            duration: Regex::new(r"^(?P<amount>\d+(?:\.\d+)?)(?P<unit>ms|s|m|h)?$")
                .expect("duration pattern should be valid regex"),
        }
    }
}

impl QueryParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, query: &str, sort: SortMode) -> FilterCriteria {
        let mut criteria = FilterCriteria::new(sort);
        let mut remaining = String::with_capacity(query.len());
        let mut last_end = 0;

        for caps in self.condition.captures_iter(query) {
            let Some(whole) = caps.get(0) else { continue };

            if self.apply_condition(&mut criteria, &caps) {
                remaining.push_str(&query[last_end..whole.start()]);
                remaining.push(' ');
                last_end = whole.end();
            } else {
                tracing::trace!(condition = whole.as_str(), "unparsed query condition kept as text");
            }
        }
        remaining.push_str(&query[last_end..]);

        criteria.set_search_text(&remaining);
        criteria
    }

    fn apply_condition(&self, criteria: &mut FilterCriteria, caps: &Captures<'_>) -> bool {
        let key = caps["key"].to_lowercase();
        let op = &caps["op"];
        let value = caps["value"].trim_matches('"');

        match key.as_str() {
            "stars" | "star" => parse_number(value)
                .map(|stars| criteria.star_difficulty.apply(op, stars, 0.005))
                .unwrap_or(false),
            "bpm" => parse_number(value)
                .map(|bpm| criteria.bpm.apply(op, bpm, 0.005))
                .unwrap_or(false),
            "length" | "len" => self
                .parse_duration(value)
                .map(|(millis, scale)| criteria.length.apply(op, millis, scale / 2.0))
                .unwrap_or(false),
            "creator" | "mapper" => apply_text(&mut criteria.creator, op, value),
            "artist" => apply_text(&mut criteria.artist, op, value),
            _ => false,
        }
    }

    /// Returns the duration in milliseconds along with the unit's size
    fn parse_duration(&self, value: &str) -> Option<(f64, f64)> {
        let caps = self.duration.captures(value)?;
        let amount: f64 = caps["amount"].parse().ok()?;

        let scale = match caps.name("unit").map(|unit| unit.as_str()) {
            Some("ms") => 1.0,
            Some("m") => 60_000.0,
            Some("h") => 3_600_000.0,
            _ => 1_000.0,
        };

        Some((amount * scale, scale))
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn apply_text(target: &mut Option<String>, op: &str, value: &str) -> bool {
    if !matches!(op, "=" | ":") || value.is_empty() {
        return false;
    }

    *target = Some(value.to_lowercase());
    true
}
