//! Per-extension token tallies and the context-window budget.

use std::collections::HashMap;

/// Context window the report measures headroom against.
pub const CONTEXT_WINDOW: usize = 128_000;

/// One counted file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRecord {
    /// Display name (base name only; not unique across directories).
    pub name: String,
    /// Token count of the file's full text.
    pub tokens: usize,
}

/// All files sharing one extension, in walk order.
#[derive(Clone, Debug)]
pub struct ExtensionBucket {
    extension: String,
    records: Vec<FileRecord>,
    subtotal: usize,
}

impl ExtensionBucket {
    fn new(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
            records: Vec::new(),
            subtotal: 0,
        }
    }

    /// The extension, without a leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Files in the order they were recorded.
    #[must_use]
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Sum of the token counts of [`Self::records`].
    #[must_use]
    pub fn subtotal(&self) -> usize {
        self.subtotal
    }
}

/// Running totals for one scan.
///
/// Buckets keep the order in which their extension was first seen.
#[derive(Clone, Debug, Default)]
pub struct Tally {
    buckets: Vec<ExtensionBucket>,
    index: HashMap<String, usize>,
    grand_total: usize,
}

impl Tally {
    /// An empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file's count under `extension`.
    pub fn record(&mut self, extension: &str, name: impl Into<String>, tokens: usize) {
        let idx = match self.index.get(extension) {
            Some(&idx) => idx,
            None => {
                self.buckets.push(ExtensionBucket::new(extension));
                let idx = self.buckets.len() - 1;
                self.index.insert(extension.to_string(), idx);
                idx
            }
        };
        let bucket = &mut self.buckets[idx];
        bucket.records.push(FileRecord {
            name: name.into(),
            tokens,
        });
        bucket.subtotal += tokens;
        self.grand_total += tokens;
    }

    /// Buckets in first-seen order.
    #[must_use]
    pub fn buckets(&self) -> &[ExtensionBucket] {
        &self.buckets
    }

    /// The bucket for `extension`, if any file was recorded under it.
    #[must_use]
    pub fn bucket(&self, extension: &str) -> Option<&ExtensionBucket> {
        self.index.get(extension).map(|&idx| &self.buckets[idx])
    }

    /// Sum of every bucket subtotal.
    #[must_use]
    pub fn grand_total(&self) -> usize {
        self.grand_total
    }

    /// Number of files recorded.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.buckets.iter().map(|b| b.records.len()).sum()
    }

    /// `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Tokens left in the context window. Negative when the total overflows it.
    #[must_use]
    pub fn remaining(&self) -> i64 {
        remaining_budget(self.grand_total)
    }
}

/// `CONTEXT_WINDOW - total`, unclamped.
#[must_use]
pub fn remaining_budget(total: usize) -> i64 {
    let window = i64::try_from(CONTEXT_WINDOW).unwrap_or(i64::MAX);
    let total = i64::try_from(total).unwrap_or(i64::MAX);
    window.saturating_sub(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> Tally {
        let mut t = Tally::new();
        t.record("py", "a.py", 10);
        t.record("md", "README.md", 5);
        t.record("py", "b.py", 7);
        t.record("rs", "main.rs", 3);
        t
    }

    #[test]
    fn buckets_keep_first_seen_order() {
        let t = sample();
        let exts: Vec<&str> = t.buckets().iter().map(ExtensionBucket::extension).collect();
        assert_eq!(exts, vec!["py", "md", "rs"]);
    }

    #[test]
    fn records_keep_insertion_order() {
        let t = sample();
        let names: Vec<&str> = t
            .bucket("py")
            .unwrap()
            .records()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["a.py", "b.py"]);
    }

    #[test]
    fn subtotal_is_sum_of_records() {
        let t = sample();
        for bucket in t.buckets() {
            let sum: usize = bucket.records().iter().map(|r| r.tokens).sum();
            assert_eq!(bucket.subtotal(), sum, "bucket {}", bucket.extension());
        }
        assert_eq!(t.bucket("py").unwrap().subtotal(), 17);
    }

    #[test]
    fn grand_total_is_sum_of_subtotals() {
        let t = sample();
        let sum: usize = t.buckets().iter().map(ExtensionBucket::subtotal).sum();
        assert_eq!(t.grand_total(), sum);
        assert_eq!(t.grand_total(), 25);
        assert_eq!(t.file_count(), 4);
    }

    /// Same-named files from different directories stay separate records.
    #[test]
    fn duplicate_names_are_not_merged() {
        let mut t = Tally::new();
        t.record("rs", "mod.rs", 4);
        t.record("rs", "mod.rs", 6);
        let bucket = t.bucket("rs").unwrap();
        assert_eq!(bucket.records().len(), 2);
        assert_eq!(bucket.subtotal(), 10);
    }

    #[test]
    fn zero_token_files_are_recorded() {
        let mut t = Tally::new();
        t.record("txt", "empty.txt", 0);
        assert!(!t.is_empty());
        assert_eq!(t.bucket("txt").unwrap().records().len(), 1);
    }

    #[test]
    fn empty_tally_has_full_budget() {
        let t = Tally::new();
        assert!(t.is_empty());
        assert_eq!(t.grand_total(), 0);
        assert_eq!(t.remaining(), 128_000);
        assert!(t.bucket("py").is_none());
    }

    #[rstest]
    #[case(0, 128_000)]
    #[case(1_234, 126_766)]
    #[case(128_000, 0)]
    #[case(130_000, -2_000)]
    fn remaining_is_not_clamped(#[case] total: usize, #[case] expected: i64) {
        assert_eq!(remaining_budget(total), expected);
    }

    #[test]
    fn overflowing_tally_reports_negative_remaining() {
        let mut t = Tally::new();
        t.record("txt", "big.txt", 100_000);
        t.record("md", "big.md", 30_000);
        assert_eq!(t.grand_total(), 130_000);
        assert_eq!(t.remaining(), -2_000);
    }
}
