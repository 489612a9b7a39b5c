//! Terminal metrics.
//!
//! Every call queries the controlling terminal again; the size is never cached
//! because the terminal may be resized between two renders.

use std::io::IsTerminal;
use terminal_size::{terminal_size, Height, Width};

/// Width used whenever the terminal size cannot be determined.
pub const DEFAULT_COLUMNS: usize = 80;

/// Current terminal width in columns, or [`DEFAULT_COLUMNS`] when stdout is not
/// a terminal or the size query fails.
pub fn columns() -> usize {
    match dimensions() {
        (_, Some(columns)) => columns,
        (_, None) => {
            tracing::trace!("terminal size unavailable, using {DEFAULT_COLUMNS} columns");
            DEFAULT_COLUMNS
        }
    }
}

/// Query `(rows, columns)` of the controlling terminal.
///
/// Each value is `None` when it cannot be determined. A zero-sized report
/// (seen on some pseudo terminals) counts as undetermined.
pub fn dimensions() -> (Option<usize>, Option<usize>) {
    match terminal_size() {
        Some((Width(w), Height(h))) => (non_zero(h), non_zero(w)),
        None => (None, None),
    }
}

/// Whether stdout is an interactive terminal.
pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal()
}

fn non_zero(n: u16) -> Option<usize> {
    (n > 0).then_some(n as usize)
}

/// Layout width source for formatters.
///
/// `Terminal` re-queries [`columns`] on every use; `Fixed` pins the width,
/// which is what `--width` and the tests use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutWidth {
    #[default]
    Terminal,
    Fixed(usize),
}

impl LayoutWidth {
    pub fn columns(self) -> usize {
        match self {
            LayoutWidth::Terminal => columns(),
            LayoutWidth::Fixed(n) => n,
        }
    }
}
