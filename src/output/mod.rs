//! Terminal output for ghi.
//!
//! Everything rendered for the user goes through [`emit`] so that mentions of
//! the current user are highlighted consistently. Diagnostics go to stderr.

use crate::format::{Formatter, Listing};
use crate::style::{Color, ColorChoice, Styler};
use std::io::{self, IsTerminal, Write};

/// Write `text` to `out` with self-mentions highlighted, adding a newline
/// unless `text` already ends with one.
pub fn write_text(out: &mut impl Write, formatter: &Formatter, text: &str) -> io::Result<()> {
    let text = formatter.highlight_mentions(text);
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Write every entry of `listing` (or `None.`) to `out`.
pub fn write_listing(
    out: &mut impl Write,
    formatter: &Formatter,
    listing: &Listing,
) -> io::Result<()> {
    for entry in listing.entries() {
        write_text(out, formatter, entry)?;
    }
    Ok(())
}

/// Print `text` to stdout.
pub fn emit(formatter: &Formatter, text: &str) -> io::Result<()> {
    write_text(&mut io::stdout().lock(), formatter, text)
}

/// Print `listing` to stdout.
pub fn emit_listing(formatter: &Formatter, listing: &Listing) -> io::Result<()> {
    write_listing(&mut io::stdout().lock(), formatter, listing)
}

fn stderr_styler() -> Styler {
    Styler::from_choice(ColorChoice::Auto, io::stderr().is_terminal())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    let style = stderr_styler();
    eprintln!("{} {}", style.bright(style.fg(Color::Red, "Error:")), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    let style = stderr_styler();
    eprintln!("{} {}", style.fg(Color::Yellow, "Warning:"), msg);
}
