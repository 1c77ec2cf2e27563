//! The per-extension report.

mod format;

pub use format::{format_number, format_signed};
use format::{format_header, format_remaining};

use std::io::Write;

use crate::aggregate::{CONTEXT_WINDOW, Tally};

/// Line printed between report sections.
pub const SEPARATOR: &str = "-------------------------------------------------";

/// Rendering configuration derived from CLI flags.
pub struct OutputOptions {
    /// When `true`, emit ANSI color codes.
    pub color: bool,
}

impl OutputOptions {
    /// Color is on only when stdout is a terminal, `NO_COLOR` is unset, and
    /// `--no-color` was not given.
    #[must_use]
    pub fn new(no_color: bool) -> Self {
        let color = !no_color && std::env::var("NO_COLOR").is_err() && {
            use std::io::IsTerminal;
            std::io::stdout().is_terminal()
        };
        Self { color }
    }
}

/// Write the report for `tally` to `out`.
///
/// Extensions appear in the order they were first seen, each with its
/// files, then a subtotal. The grand total and the remaining context-window
/// budget close the report; a negative remainder is printed as is.
pub fn write_report(
    out: &mut dyn Write,
    tally: &Tally,
    opts: &OutputOptions,
) -> std::io::Result<()> {
    for bucket in tally.buckets() {
        writeln!(out, "{SEPARATOR}")?;
        writeln!(out, "{}", format_header(bucket.extension(), opts.color))?;
        for record in bucket.records() {
            writeln!(out, "{}: {} tokens", record.name, format_number(record.tokens))?;
        }
        writeln!(
            out,
            "{} total: {} tokens",
            bucket.extension(),
            format_number(bucket.subtotal())
        )?;
    }

    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "grand total: {}", format_number(tally.grand_total()))?;
    writeln!(
        out,
        "remaining tokens given {}K context window: {}",
        CONTEXT_WINDOW / 1000,
        format_remaining(tally.remaining(), opts.color)
    )
}
