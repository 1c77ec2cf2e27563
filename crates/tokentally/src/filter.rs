//! Per-candidate filtering: old paths, directories, and extension lists.

use std::collections::HashSet;
use std::path::Path;

use crate::walk::Candidate;

/// Filtering choices taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Skip any candidate whose relative path contains `"old"`.
    pub exclude_old: bool,
    /// Extensions to skip.
    pub exclude: Vec<String>,
    /// Extensions to keep; everything else is skipped.
    pub include: Vec<String>,
}

impl FilterOptions {
    /// Build options, accepting extensions written with or without a leading
    /// dot (`.py` and `py` are the same).
    #[must_use]
    pub fn new(exclude_old: bool, exclude: Vec<String>, include: Vec<String>) -> Self {
        Self {
            exclude_old,
            exclude: normalize(exclude),
            include: normalize(include),
        }
    }

    /// Both extension lists are non-empty.
    #[must_use]
    pub fn has_conflicting_lists(&self) -> bool {
        !self.exclude.is_empty() && !self.include.is_empty()
    }
}

fn normalize(exts: Vec<String>) -> Vec<String> {
    exts.into_iter()
        .map(|e| match e.strip_prefix('.') {
            Some(rest) => rest.to_string(),
            None => e,
        })
        .collect()
}

/// Why a candidate did not make it into the tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    /// Path contains `"old"` and `--exclude_old` is set.
    Old,
    /// The candidate is a directory.
    Directory,
    /// Extension is on the exclude list.
    Excluded,
    /// Include mode is active and the extension is not on the list.
    NotIncluded,
    /// A file with this extension failed to decode earlier in the run.
    Learned,
    /// The file itself failed to decode (its extension is learned from now on).
    Undecodable,
    /// The file could not be read.
    Unreadable,
}

impl SkipReason {
    /// Short label for log output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::Directory => "directory",
            Self::Excluded => "excluded",
            Self::NotIncluded => "not included",
            Self::Learned => "learned exclusion",
            Self::Undecodable => "undecodable",
            Self::Unreadable => "unreadable",
        }
    }
}

/// The outcome of filtering one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Read and count the candidate.
    Accept,
    /// Leave the candidate out.
    Skip(SkipReason),
}

/// How the extension lists apply.
#[derive(Debug, Clone)]
enum ExtensionMode {
    /// No list given; every extension passes.
    Any,
    /// Skip listed extensions.
    Exclude(HashSet<String>),
    /// Skip unlisted extensions.
    Include(HashSet<String>),
}

/// Filter state for one run.
///
/// Starts from [`FilterOptions`] and grows a set of learned exclusions as
/// files fail to decode. [`FilterState::decide`] is pure over the current
/// state.
#[derive(Debug, Clone)]
pub struct FilterState {
    exclude_old: bool,
    mode: ExtensionMode,
    learned: Vec<String>,
}

impl FilterState {
    /// Build the initial state.
    ///
    /// When both lists are non-empty the exclude list wins and the include
    /// list is ignored.
    #[must_use]
    pub fn new(opts: &FilterOptions) -> Self {
        let mode = if !opts.exclude.is_empty() {
            ExtensionMode::Exclude(opts.exclude.iter().cloned().collect())
        } else if !opts.include.is_empty() {
            ExtensionMode::Include(opts.include.iter().cloned().collect())
        } else {
            ExtensionMode::Any
        };
        Self {
            exclude_old: opts.exclude_old,
            mode,
            learned: Vec::new(),
        }
    }

    /// Decide whether `candidate` should be read and counted.
    #[must_use]
    pub fn decide(&self, candidate: &Candidate) -> Decision {
        if self.exclude_old && is_old(&candidate.rel_path) {
            return Decision::Skip(SkipReason::Old);
        }
        if candidate.is_dir {
            return Decision::Skip(SkipReason::Directory);
        }
        let ext = candidate.extension.as_str();
        if self.learned.iter().any(|l| l == ext) {
            return Decision::Skip(SkipReason::Learned);
        }
        match &self.mode {
            ExtensionMode::Any => Decision::Accept,
            ExtensionMode::Exclude(set) if set.contains(ext) => {
                Decision::Skip(SkipReason::Excluded)
            }
            ExtensionMode::Include(set) if !set.contains(ext) => {
                Decision::Skip(SkipReason::NotIncluded)
            }
            ExtensionMode::Exclude(_) | ExtensionMode::Include(_) => Decision::Accept,
        }
    }

    /// Skip `extension` for the rest of the run. Returns `true` if it was not
    /// already learned.
    pub fn learn_exclusion(&mut self, extension: &str) -> bool {
        if self.learned.iter().any(|l| l == extension) {
            return false;
        }
        self.learned.push(extension.to_string());
        true
    }

    #[cfg(test)]
    fn learned(&self) -> &[String] {
        &self.learned
    }

    /// Consume the state, returning the learned extensions.
    #[must_use]
    pub fn into_learned(self) -> Vec<String> {
        self.learned
    }
}

fn is_old(rel_path: &Path) -> bool {
    rel_path.to_string_lossy().contains("old")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // ── helpers ────────────────────────────────────────────────────────────

    fn file(rel: &str) -> Candidate {
        let name = Path::new(rel)
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        Candidate {
            path: Path::new("root").join(rel),
            rel_path: rel.into(),
            extension: crate::walk::extension_of(&name),
            name,
            is_dir: false,
        }
    }

    fn dir(rel: &str) -> Candidate {
        Candidate {
            is_dir: true,
            ..file(rel)
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn state(exclude_old: bool, exclude: &[&str], include: &[&str]) -> FilterState {
        FilterState::new(&FilterOptions::new(
            exclude_old,
            strings(exclude),
            strings(include),
        ))
    }

    // ── old paths ──────────────────────────────────────────────────────────

    #[test]
    fn old_path_skipped_when_flag_set() {
        let s = state(true, &[], &[]);
        assert_eq!(
            s.decide(&file("project/old/notes.txt")),
            Decision::Skip(SkipReason::Old)
        );
    }

    #[test]
    fn old_path_counted_without_flag() {
        let s = state(false, &[], &[]);
        assert_eq!(s.decide(&file("project/old/notes.txt")), Decision::Accept);
    }

    /// The substring may appear anywhere, including inside a file name.
    #[rstest]
    #[case("golden.txt")]
    #[case("src/holder/x.rs")]
    #[case("notes.old")]
    fn old_substring_matches_anywhere(#[case] rel: &str) {
        let s = state(true, &[], &[]);
        assert_eq!(s.decide(&file(rel)), Decision::Skip(SkipReason::Old));
    }

    #[test]
    fn old_check_is_case_sensitive() {
        let s = state(true, &[], &[]);
        assert_eq!(s.decide(&file("OLD/notes.txt")), Decision::Accept);
    }

    /// The old check runs before the directory check.
    #[test]
    fn old_directory_reports_old() {
        let s = state(true, &[], &[]);
        assert_eq!(s.decide(&dir("old.d")), Decision::Skip(SkipReason::Old));
    }

    // ── directories ────────────────────────────────────────────────────────

    #[test]
    fn directories_are_skipped() {
        let s = state(false, &[], &[]);
        assert_eq!(s.decide(&dir("pkg.d")), Decision::Skip(SkipReason::Directory));
    }

    // ── extension modes ────────────────────────────────────────────────────

    #[rstest]
    #[case("a.py")]
    #[case("b.txt")]
    #[case(".gitignore")]
    fn no_lists_accept_everything(#[case] rel: &str) {
        assert_eq!(state(false, &[], &[]).decide(&file(rel)), Decision::Accept);
    }

    #[rstest]
    #[case("a.py", Decision::Accept)]
    #[case("b.txt", Decision::Skip(SkipReason::NotIncluded))]
    #[case("c.py", Decision::Accept)]
    fn include_mode_keeps_only_listed(#[case] rel: &str, #[case] expected: Decision) {
        assert_eq!(state(false, &[], &["py"]).decide(&file(rel)), expected);
    }

    #[rstest]
    #[case("a.py", Decision::Skip(SkipReason::Excluded))]
    #[case("b.txt", Decision::Accept)]
    fn exclude_mode_drops_listed(#[case] rel: &str, #[case] expected: Decision) {
        assert_eq!(state(false, &["py"], &[]).decide(&file(rel)), expected);
    }

    #[test]
    fn extension_matching_is_case_sensitive() {
        let s = state(false, &[], &["py"]);
        assert_eq!(
            s.decide(&file("SETUP.PY")),
            Decision::Skip(SkipReason::NotIncluded)
        );
    }

    #[test]
    fn leading_dot_in_lists_is_ignored() {
        let s = state(false, &[], &[".py"]);
        assert_eq!(s.decide(&file("a.py")), Decision::Accept);
    }

    /// With both lists set, the exclude list applies and the include list
    /// is ignored.
    #[rstest]
    #[case("a.py", Decision::Skip(SkipReason::Excluded))]
    #[case("b.txt", Decision::Accept)]
    #[case("c.rs", Decision::Accept)]
    fn exclude_list_takes_precedence(#[case] rel: &str, #[case] expected: Decision) {
        assert_eq!(state(false, &["py"], &["txt"]).decide(&file(rel)), expected);
    }

    #[test]
    fn conflicting_lists_detected() {
        let opts = FilterOptions::new(false, strings(&["py"]), strings(&["txt"]));
        assert!(opts.has_conflicting_lists());
        assert!(!FilterOptions::new(false, strings(&["py"]), vec![]).has_conflicting_lists());
    }

    // ── learned exclusions ─────────────────────────────────────────────────

    #[test]
    fn learned_extension_is_skipped_afterwards() {
        let mut s = state(false, &[], &[]);
        assert_eq!(s.decide(&file("other.dat")), Decision::Accept);
        assert!(s.learn_exclusion("dat"));
        assert_eq!(
            s.decide(&file("other.dat")),
            Decision::Skip(SkipReason::Learned)
        );
        assert_eq!(s.decide(&file("keep.txt")), Decision::Accept);
    }

    #[test]
    fn learning_twice_is_a_no_op() {
        let mut s = state(false, &[], &[]);
        assert!(s.learn_exclusion("dat"));
        assert!(!s.learn_exclusion("dat"));
        assert_eq!(s.learned(), &["dat".to_string()]);
    }

    /// Learning in include mode must not switch the run to exclude mode.
    #[test]
    fn learning_keeps_include_mode() {
        let mut s = state(false, &[], &["py", "ipynb"]);
        s.learn_exclusion("ipynb");
        assert_eq!(s.decide(&file("a.py")), Decision::Accept);
        assert_eq!(
            s.decide(&file("b.txt")),
            Decision::Skip(SkipReason::NotIncluded)
        );
        assert_eq!(
            s.decide(&file("n.ipynb")),
            Decision::Skip(SkipReason::Learned)
        );
    }

    #[test]
    fn into_learned_preserves_order() {
        let mut s = state(false, &[], &[]);
        s.learn_exclusion("bin");
        s.learn_exclusion("dat");
        assert_eq!(s.into_learned(), strings(&["bin", "dat"]));
    }
}
