//! The scan pipeline: walk, filter, read, count, tally.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::aggregate::Tally;
use crate::filter::{Decision, FilterState, SkipReason};
use crate::tokenize::Tokenizer;
use crate::walk::{self, ReadError, SourceReader, WalkError};

/// Everything one scan produced.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Per-extension token tallies.
    pub tally: Tally,
    /// Extensions excluded mid-run after a decode failure, in learning order.
    pub learned: Vec<String>,
    /// How many candidates were skipped, per reason.
    pub skipped: BTreeMap<SkipReason, usize>,
    /// Non-fatal walk and read errors.
    pub errors: Vec<WalkError>,
}

impl ScanOutcome {
    /// Total number of skipped candidates.
    #[must_use]
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Scan `root` sequentially, one file at a time.
///
/// A file that fails to decode teaches `filter` to skip its extension for
/// the rest of the run. Read and walk errors are collected, never fatal.
pub fn scan(
    root: &Path,
    mut filter: FilterState,
    tokenizer: &dyn Tokenizer,
    reader: &dyn SourceReader,
) -> ScanOutcome {
    let mut tally = Tally::new();
    let mut skipped: BTreeMap<SkipReason, usize> = BTreeMap::new();
    let mut errors = Vec::new();

    for item in walk::walk_candidates(root) {
        let candidate = match item {
            Ok(c) => c,
            Err(e) => {
                warn!("{e}");
                errors.push(e);
                continue;
            }
        };

        match filter.decide(&candidate) {
            Decision::Accept => {}
            Decision::Skip(reason) => {
                match reason {
                    SkipReason::Old => info!("file {} marked as old, skipping", candidate.name),
                    SkipReason::Directory => {}
                    _ => debug!("skipping {} ({})", candidate.name, reason.as_str()),
                }
                *skipped.entry(reason).or_default() += 1;
                continue;
            }
        }

        debug!("reading {}", candidate.name);
        let text = match reader.read_text(&candidate.path) {
            Ok(text) => text,
            Err(ReadError::Decode { .. }) => {
                filter.learn_exclusion(&candidate.extension);
                warn!(
                    "file {} is not valid UTF-8, ignoring .{} files from now on",
                    candidate.name, candidate.extension
                );
                *skipped.entry(SkipReason::Undecodable).or_default() += 1;
                continue;
            }
            Err(e @ ReadError::Io(_)) => {
                warn!("cannot read {}: {e}", candidate.path.display());
                errors.push(WalkError::new(format!("{}: {e}", candidate.path.display())));
                *skipped.entry(SkipReason::Unreadable).or_default() += 1;
                continue;
            }
        };

        let tokens = tokenizer.count_tokens(&text);
        debug!("{}: {tokens} tokens [{}]", candidate.name, tokenizer.name());
        tally.record(&candidate.extension, candidate.name, tokens);
    }

    for (reason, n) in &skipped {
        debug!("skipped {n} ({})", reason.as_str());
    }

    ScanOutcome {
        tally,
        learned: filter.into_learned(),
        skipped,
        errors,
    }
}
