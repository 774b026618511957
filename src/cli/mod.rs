//! Command-line interface module
//!
//! This module handles argument parsing and the search flow. The caching
//! policy itself lives in [`crate::core`].

pub mod output;

use anyhow::Result;
use clap::Parser;

use crate::config::{defaults, CacheConfig};
use crate::core::manager::{CacheManager, Lookup};
use crate::core::names::{NameListCache, NameListSnapshot};
use crate::core::{render, search};
use crate::error::PypiSearchError;
use crate::registry::client::PypiClient;

/// Search PyPI package names by regex, with optional cached metadata
///
/// The full name index is cached for 23 hours; per-package metadata is
/// cached in a local embedded store and refreshed when stale.
#[derive(Parser, Debug)]
#[command(name = "pypi-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Regular expression matched against whole package names
    #[arg(default_value = "")]
    pub pattern: String,

    /// Case-insensitive matching
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Fetch and show detailed info for the first matches
    #[arg(short = 'd', long)]
    pub desc: bool,

    /// Include the full description in details (with -d)
    #[arg(short = 'f', long)]
    pub full_desc: bool,

    /// Only show the count of matches
    #[arg(long)]
    pub count_only: bool,

    /// Refresh the package index cache before searching
    #[arg(short = 'r', long)]
    pub refresh_cache: bool,

    /// Maximum number of detail fetches
    #[arg(long, default_value_t = defaults::DEFAULT_DETAIL_LIMIT)]
    pub limit: usize,

    /// Delete detail records older than the prune window, then exit
    /// unless a pattern was given
    #[arg(long)]
    pub prune: bool,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Execute the search
    pub async fn run(self) -> Result<()> {
        let config = CacheConfig::new();
        std::fs::create_dir_all(&config.cache_dir).map_err(|e| PypiSearchError::Io {
            path: config.cache_dir.clone(),
            error: e.to_string(),
        })?;

        let manager = CacheManager::open(config.clone());

        if self.prune {
            let deleted = manager.prune().map_err(PypiSearchError::Store)?;
            if !self.quiet {
                println!("{} Pruned {deleted} stale record(s)", output::status::SUCCESS);
            }
            if self.pattern.is_empty() {
                return Ok(());
            }
        }

        if self.pattern.is_empty() && !self.refresh_cache {
            anyhow::bail!("Please provide a regex pattern");
        }

        let regex = search::compile_pattern(&self.pattern, self.ignore_case)?;

        let client = PypiClient::new();
        let names = NameListCache::new(manager.store(), &config);
        let packages = self.load_packages(&names, &client, &config).await?;

        if self.pattern.is_empty() {
            // Bare --refresh-cache run, nothing to search
            return Ok(());
        }

        let matches = search::filter_matches(&regex, &packages);

        if self.count_only {
            println!("Found {} matching packages.", matches.len());
            return Ok(());
        }
        if matches.is_empty() {
            println!("No matching packages found.");
            return Ok(());
        }

        println!("Found {} matches!\n", matches.len());

        for (i, name) in matches.iter().enumerate() {
            let index = i + 1;
            if self.desc {
                if index > self.limit {
                    println!("*** Max descriptions reached ***");
                    break;
                }
                output::print_detail_rule(index, name);
                self.show_detail(&manager, &client, name).await?;
            } else {
                output::print_match_line(index, name);
            }
        }

        println!("\nTotal: {}", matches.len());
        Ok(())
    }

    /// Load the package name list, refreshing it when stale or forced
    ///
    /// An index-fetch failure degrades to a stale snapshot when one
    /// exists; it is a hard error only when there is nothing to fall
    /// back on.
    async fn load_packages(
        &self,
        names: &NameListCache<'_>,
        client: &PypiClient,
        config: &CacheConfig,
    ) -> Result<Vec<String>> {
        let cached = names.load();
        let window = config.name_list_max_age.as_secs_f64();

        if !self.refresh_cache {
            if let Some((snapshot, _)) = &cached {
                if snapshot.is_fresh(window) {
                    tracing::debug!(
                        "Using cached index: {} packages",
                        snapshot.packages.len()
                    );
                    return Ok(snapshot.packages.clone());
                }
            }
        }

        let spinner = (!self.quiet)
            .then(|| output::create_spinner("Fetching fresh PyPI package index..."));

        let fetched = client.fetch_index().await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match fetched {
            Ok(list) => {
                let snapshot = NameListSnapshot::new(list);
                names.save(&snapshot).map_err(PypiSearchError::Store)?;
                if !self.quiet {
                    eprintln!(
                        "{} Cache updated: {} packages",
                        output::status::SUCCESS,
                        snapshot.packages.len()
                    );
                }
                Ok(snapshot.packages)
            }
            Err(e) => match cached {
                Some((snapshot, _)) => {
                    tracing::warn!("Index fetch failed ({}), using stale cache", e);
                    Ok(snapshot.packages)
                }
                None => Err(PypiSearchError::IndexUnavailable(e.to_string()).into()),
            },
        }
    }

    /// Show one package's details, from cache when possible
    async fn show_detail(
        &self,
        manager: &CacheManager,
        client: &PypiClient,
        name: &str,
    ) -> Result<()> {
        let lookup = manager
            .lookup(name, self.full_desc)
            .map_err(PypiSearchError::Store)?;

        let record = match lookup {
            Lookup::Hit(record) => Some((record.json, record.md)),
            Lookup::FetchRequired(reason) => {
                tracing::debug!("Fetching '{}' from network ({:?})", name, reason);
                match client.fetch_detail(name).await {
                    Ok(Some(response)) => {
                        let md = self
                            .full_desc
                            .then(|| render::render_description(&response.doc));
                        manager
                            .store_after_fetch(
                                name,
                                &response.headers,
                                &response.json,
                                md.as_deref(),
                            )
                            .map_err(PypiSearchError::Store)?;
                        Some((response.json, md))
                    }
                    Ok(None) => {
                        println!("  (package not found on PyPI)");
                        None
                    }
                    Err(e) => {
                        tracing::warn!("Detail fetch for '{}' failed: {}", name, e);
                        println!("  (details unavailable)");
                        None
                    }
                }
            }
        };

        if let Some((json, md)) = record {
            match serde_json::from_str::<serde_json::Value>(&json) {
                Ok(doc) => {
                    println!("{}", render::render_summary(name, &doc));
                    if self.full_desc {
                        if let Some(md) = md.filter(|m| !m.is_empty()) {
                            println!("\n**Full Description:**\n{md}");
                        }
                    }
                }
                Err(_) => {
                    tracing::warn!("Cached JSON for '{}' failed to parse", name);
                    println!("  (details unavailable)");
                }
            }
        }
        Ok(())
    }
}
