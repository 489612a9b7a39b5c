//! Width-aware text layout: truncation and indented re-wrapping.
//!
//! Widths are display columns as reported by `unicode-width`, so wide glyphs
//! count two columns and combining marks count none. Callers measuring styled
//! text must measure the unstyled rendering (see [`crate::style::Styler::no_color`]).

use crate::terminal;
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "...";

static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[\t ]+$").expect("valid trailing space pattern"));
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank run pattern"));

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Right-justify `text` to `width` display columns.
pub fn rjust(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(text));
    format!("{}{text}", " ".repeat(pad))
}

/// Fit `text` into `columns() - reserved` columns.
pub fn truncate(text: &str, reserved: usize) -> String {
    truncate_within(text, terminal::columns() as isize - reserved as isize)
}

/// Fit `text` into `budget` columns.
///
/// Text that fits is returned untouched. Otherwise the longest prefix ending at
/// a whitespace boundary is kept, trailing whitespace is stripped and `"..."`
/// appended, so the result never exceeds `budget`. When no boundary fits, the
/// text is cut mid-word. Budgets too small for the ellipsis yield a prefix of
/// it (an empty string for zero or negative budgets).
pub fn truncate_within(text: &str, budget: isize) -> String {
    if budget >= 0 && display_width(text) <= budget as usize {
        return text.to_string();
    }

    let budget = budget.max(0) as usize;
    if budget <= ELLIPSIS.len() {
        return ELLIPSIS[..budget].to_string();
    }
    let room = budget - ELLIPSIS.len();

    // Prefixes are measured as whole strings: emoji presentation selectors
    // and joiners change the width of the glyph before them.
    let mut kept = None;
    for (i, c) in text.char_indices() {
        if display_width(&text[..i]) > room {
            break;
        }
        if c.is_whitespace() {
            let prefix = text[..i].trim_end();
            if !prefix.is_empty() && display_width(prefix) <= room {
                kept = Some(prefix);
            }
            if c == '\n' {
                break;
            }
        }
    }
    let kept = kept.unwrap_or_else(|| take_columns(text, room));

    format!("{kept}{ELLIPSIS}")
}

/// Longest prefix of `text` that fits in `room` columns.
fn take_columns(text: &str, room: usize) -> &str {
    let end = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| display_width(&text[..end]) <= room)
        .last()
        .unwrap_or(0);
    &text[..end]
}

/// Re-wrap `text` to the terminal width and indent every line by `level`
/// spaces.
pub fn indent(text: &str, level: usize) -> String {
    indent_within(text, level, terminal::columns())
}

/// Re-wrap `text` for a terminal `columns` wide and indent every line by
/// `level` spaces.
///
/// Carriage returns are dropped, trailing blanks removed from each line and
/// runs of blank lines collapsed to one. Lines wrap at whitespace to at most
/// `columns - level - 1` columns; a single token wider than that keeps its own
/// line unbroken. The result has no trailing newline.
pub fn indent_within(text: &str, level: usize, columns: usize) -> String {
    let width = columns.saturating_sub(level + 1).max(1);
    let prefix = " ".repeat(level);

    let mut rows = Vec::new();
    for line in normalize(text).split('\n') {
        if line.is_empty() {
            rows.push(String::new());
        } else {
            rows.extend(wrap_line(line, width));
        }
    }
    while rows.last().is_some_and(String::is_empty) {
        rows.pop();
    }

    rows.iter()
        .map(|row| format!("{prefix}{row}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize(text: &str) -> String {
    let text = text.replace('\r', "");
    let text = TRAILING_SPACE.replace_all(&text, "");
    BLANK_RUN.replace_all(&text, "\n\n").into_owned()
}

/// Greedy wrap of one logical line. Leading indentation of the line is kept,
/// also when the first token alone overflows the width. Gaps swallowed by a
/// line break are dropped, as is leading indentation that would push a
/// fitting first token past the width.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for (n, (gap, word)) in segments(line).into_iter().enumerate() {
        let gap = if current.is_empty() && n > 0 { "" } else { gap };
        let gap_width = display_width(gap);
        let word_width = display_width(word);

        if current_width + gap_width + word_width <= width {
            current.push_str(gap);
            current.push_str(word);
            current_width += gap_width + word_width;
            continue;
        }

        if !current.trim().is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        current.clear();
        current_width = 0;

        if word_width > width {
            let lead = if n == 0 { gap } else { "" };
            rows.push(format!("{lead}{word}"));
        } else {
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.trim().is_empty() {
        rows.push(current);
    }
    rows
}

/// Split a line into `(preceding whitespace, word)` pairs.
fn segments(line: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let start = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
        let (gap, tail) = rest.split_at(start);
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, next) = tail.split_at(end);
        if word.is_empty() {
            break;
        }
        out.push((gap, word));
        rest = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_within_fitting_text_is_unchanged() {
        assert_eq!(truncate_within("Fix the parser", 14), "Fix the parser");
        assert_eq!(truncate_within("Fix the parser", 80), "Fix the parser");
        assert_eq!(truncate_within("", 0), "");
    }

    #[test]
    fn test_truncate_within_breaks_at_word_boundary() {
        let result = truncate_within("Crash when opening a very large repository", 20);
        assert_eq!(result, "Crash when...");
        assert!(display_width(&result) <= 20);
    }

    #[test]
    fn test_truncate_within_result_never_exceeds_budget() {
        let title = "Support rendering of nested task lists inside issue bodies and comments";
        for budget in 0..title.len() as isize {
            let result = truncate_within(title, budget);
            assert!(display_width(&result) <= budget as usize, "budget {budget}: {result:?}");
            if budget >= 3 {
                assert!(result.ends_with("..."));
            }
        }
    }

    #[test]
    fn test_truncate_within_long_single_word_is_cut() {
        let result = truncate_within("supercalifragilisticexpialidocious", 10);
        assert_eq!(result, "superca...");
    }

    #[test]
    fn test_truncate_within_negative_budget() {
        assert_eq!(truncate_within("anything at all", -12), "");
        assert_eq!(truncate_within("anything at all", 0), "");
        assert_eq!(truncate_within("anything at all", 2), "..");
    }

    #[test]
    fn test_truncate_within_stops_at_newline() {
        assert_eq!(truncate_within("first line\nsecond line here", 20), "first line...");
    }

    #[test]
    fn test_truncate_within_wide_glyphs() {
        // Each CJK glyph is two columns wide.
        let result = truncate_within("日本語 の テキスト です", 12);
        assert_eq!(result, "日本語 の...");
        assert!(display_width(&result) <= 12);
    }

    #[test]
    fn test_truncate_within_emoji_presentation_sequences() {
        // U+FE0F widens the heart to two columns.
        let hearts = "\u{2764}\u{fe0f} ".repeat(6);
        let result = truncate_within(hearts.trim_end(), 10);
        assert!(display_width(&result) <= 10, "{result:?}");
        assert!(result.ends_with("..."));
        assert!(result.starts_with("\u{2764}\u{fe0f} \u{2764}\u{fe0f}"));
    }

    #[test]
    fn test_truncate_within_combining_marks() {
        let result = truncate_within("cafe\u{301} cafe\u{301} cafe\u{301}", 10);
        assert_eq!(result, "cafe\u{301}...");
    }

    #[test]
    fn test_truncate_within_tabs() {
        let result = truncate_within("a\tb\tc\td\te", 6);
        assert!(display_width(&result) <= 6, "{result:?}");
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_within_budget_holds_for_mixed_glyphs() {
        let samples = [
            "\u{2764}\u{fe0f}\u{2764}\u{fe0f}\u{2764}\u{fe0f}\u{2764}\u{fe0f}\u{2764}\u{fe0f}",
            "\u{1f468}\u{200d}\u{1f469}\u{200d}\u{1f467} family \u{1f468}\u{200d}\u{1f469}\u{200d}\u{1f467}",
            "e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}",
            "tab\tseparated\tcolumns\there",
            "日本語のテキストです",
        ];
        for text in samples {
            for budget in -2..display_width(text) as isize + 2 {
                let result = truncate_within(text, budget);
                assert!(
                    display_width(&result) <= budget.max(0) as usize,
                    "budget {budget}: {result:?}"
                );
            }
        }
    }

    #[test]
    fn test_take_columns_measures_whole_prefix() {
        let hearts = "\u{2764}\u{fe0f}\u{2764}\u{fe0f}\u{2764}\u{fe0f}";
        for room in 0..8 {
            assert!(display_width(take_columns(hearts, room)) <= room);
        }
        assert_eq!(take_columns("abc", 0), "");
        assert_eq!(take_columns("abc", 5), "abc");
    }

    #[test]
    fn test_truncate_with_reserved_over_terminal_width_does_not_panic() {
        let result = truncate("hello world", terminal::columns() + 10);
        assert_eq!(result, "");
    }

    #[test]
    fn test_indent_short_line() {
        assert_eq!(indent_within("hello world", 4, 80), "    hello world");
    }

    #[test]
    fn test_indent_level_zero() {
        assert_eq!(indent_within("#12: Title", 0, 80), "#12: Title");
    }

    #[test]
    fn test_indent_drops_carriage_returns_and_trailing_blanks() {
        let result = indent_within("one  \r\ntwo\t\r\n", 2, 80);
        assert_eq!(result, "  one\n  two");
    }

    #[test]
    fn test_indent_collapses_blank_runs() {
        let result = indent_within("a\n\n\n\n\nb\n\nc", 4, 80);
        assert_eq!(result, "    a\n    \n    b\n    \n    c");
    }

    #[test]
    fn test_indent_whitespace_only_lines_count_as_blank() {
        let result = indent_within("a\n   \n \t\n\nb", 0, 80);
        assert_eq!(result, "a\n\nb");
    }

    #[test]
    fn test_indent_wraps_at_whitespace() {
        // width = 20 - 4 - 1 = 15
        let result = indent_within("the quick brown fox jumps over the lazy dog", 4, 20);
        assert_eq!(
            result,
            "    the quick brown\n    fox jumps over\n    the lazy dog"
        );
        for line in result.lines() {
            assert!(display_width(line) <= 19);
        }
    }

    #[test]
    fn test_indent_long_token_kept_whole_on_own_line() {
        let url = "https://example.com/a/really/long/path/that/does/not/fit";
        let result = indent_within(&format!("see {url} for details"), 4, 30);
        assert_eq!(result, format!("    see\n    {url}\n    for details"));
    }

    #[test]
    fn test_indent_keeps_leading_indentation() {
        let result = indent_within("fn main() {\n    run();\n}", 4, 80);
        assert_eq!(result, "    fn main() {\n        run();\n    }");
    }

    #[test]
    fn test_indent_keeps_indentation_of_overflowing_token() {
        let result = indent_within("  run --with-a-very-long-flag-name\n  done", 0, 12);
        assert_eq!(result, "  run\n--with-a-very-long-flag-name\n  done");
        let result = indent_within("    https://example.com/long/path", 2, 12);
        assert_eq!(result, "      https://example.com/long/path");
    }

    #[test]
    fn test_indent_drops_trailing_empty_line() {
        assert_eq!(indent_within("body\n", 4, 80), "    body");
        assert_eq!(indent_within("body\n\n\n", 4, 80), "    body");
        assert_eq!(indent_within("", 4, 80), "");
    }

    #[test]
    fn test_indent_tiny_terminal_does_not_panic() {
        let result = indent_within("a b c", 10, 5);
        assert_eq!(result, format!("{0}a\n{0}b\n{0}c", " ".repeat(10)));
    }

    #[test]
    fn test_rjust() {
        assert_eq!(rjust("7", 3), "  7");
        assert_eq!(rjust("123", 3), "123");
        assert_eq!(rjust("1234", 3), "1234");
        assert_eq!(rjust("語", 3), " 語");
    }

    #[test]
    fn test_segments() {
        assert_eq!(
            segments("  a bb   c"),
            vec![("  ", "a"), (" ", "bb"), ("   ", "c")]
        );
        assert!(segments("").is_empty());
    }
}
