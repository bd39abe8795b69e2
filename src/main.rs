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

//! CLI entry point for beatmap-carousel
//!
//! Loads a catalog, runs one filter pass and prints the carousel,
//! optionally after navigating to a set or difficulty.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use beatmap_carousel::carousel::BeatmapCarousel;
use beatmap_carousel::catalog::Catalog;
use beatmap_carousel::core::{CarouselBeatmapSet, CarouselItem, FilterCriteria, Observable, SortMode};

#[derive(Parser)]
#[command(name = "beatmap-carousel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List visible sets in display order
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Select a set or difficulty and show the resolved selection
    Select {
        #[command(flatten)]
        view: ViewArgs,

        /// Beatmap set id to select
        #[arg(long, conflicts_with = "beatmap", required_unless_present = "beatmap")]
        set: Option<u64>,

        /// Difficulty id to select
        #[arg(long)]
        beatmap: Option<u64>,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Path to the beatmap catalog (JSON)
    #[arg(short, long, default_value = "~/.local/share/beatmap-carousel/catalog.json")]
    catalog: PathBuf,

    /// Filter query, e.g. "camellia stars>5 length<3m"
    #[arg(short, long, default_value = "")]
    query: String,

    /// Sort mode
    #[arg(short, long, value_enum, default_value_t = SortMode::Artist)]
    sort: SortMode,

    /// Recommended star difficulty for first picks
    #[arg(short, long, default_value_t = 3.0)]
    recommended: f64,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the listing stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { view } => {
            let carousel = build_carousel(&view)?;
            print_carousel(&carousel);
        }
        Commands::Select { view, set, beatmap } => {
            let mut carousel = build_carousel(&view)?;
            select(&mut carousel, set, beatmap)?;
            print_carousel(&carousel);
            print_selection(&carousel);
        }
    }

    Ok(())
}

/// Loads the catalog and runs the initial filter pass
fn build_carousel(view: &ViewArgs) -> anyhow::Result<BeatmapCarousel> {
    let path = expand_path(&view.catalog)?;
    let catalog = Catalog::load(&path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;

    println!("{} Loaded {} sets from {}", "→".cyan(), catalog.len(), path.display());

    let mut carousel = BeatmapCarousel::new(Observable::new(view.recommended));
    carousel
        .load(catalog.sets().iter().cloned())
        .context("Failed to build carousel")?;
    carousel.filter(FilterCriteria::parse(&view.query, view.sort));

    Ok(carousel)
}

fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let raw = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?;

    Ok(PathBuf::from(shellexpand::tilde(raw).as_ref()))
}

fn select(carousel: &mut BeatmapCarousel, set: Option<u64>, beatmap: Option<u64>) -> anyhow::Result<()> {
    let found = match (set, beatmap) {
        (Some(set_id), _) => carousel.select_set(set_id),
        (None, Some(beatmap_id)) => carousel.select_beatmap(beatmap_id),
        (None, None) => anyhow::bail!("Nothing to select"),
    };

    if !found {
        anyhow::bail!("No such set or difficulty, or it is filtered out by the query");
    }

    Ok(())
}

fn print_carousel(carousel: &BeatmapCarousel) {
    println!(
        "{}",
        format!("Sorted by {}, query \"{}\"\n", carousel.criteria().sort, carousel.criteria().search_text).bold()
    );

    let mut shown = 0;
    for set in carousel.visible_sets() {
        print_set(set);
        shown += 1;
    }

    println!("\n{} Showing {} of {} sets", "✓".green(), shown, carousel.len());
}

fn print_set(set: &CarouselBeatmapSet) {
    let marker = if set.is_selected() { "▶".green().bold() } else { " ".normal() };
    println!("{} {}", marker, format!("{}", set).cyan().bold());

    for beatmap in set.group().iter_display().filter(|beatmap| beatmap.visible()) {
        let line = format!("{}", beatmap);
        if beatmap.is_selected() {
            println!("    {} {}", "●".green(), line.green());
        } else {
            println!("    {} {}", "·".dimmed(), line);
        }
    }
}

fn print_selection(carousel: &BeatmapCarousel) {
    match (carousel.selected_set(), carousel.selected_beatmap()) {
        (Some(set), Some(beatmap)) => {
            println!("{} Selected {} {}", "✓".green().bold(), set, beatmap);
        }
        _ => println!("{}", "⚠ Nothing selected".yellow()),
    }
}
