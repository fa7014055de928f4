#![forbid(unsafe_code)]

//! Visual line breaking for textarea content.
//!
//! Lines break the way a `pre-wrap` textarea breaks them:
//! - `\n` always starts a new line; a trailing `\n` leaves an empty last line.
//! - Soft breaks happen between words; whitespace at a break hangs and
//!   takes no room on either line.
//! - Leading whitespace of a paragraph is content: it takes room on the
//!   first line up to the full width, and only the excess hangs.
//! - A word wider than the whole line is split at grapheme boundaries.
//! - Widths are terminal-style cells: CJK and emoji count as 2.
//!
//! # Example
//! ```
//! use panefit_text::wrap::{line_count, wrap_lines};
//!
//! assert_eq!(wrap_lines("Hello world foo bar", 10), vec!["Hello", "world foo", "bar"]);
//! assert_eq!(line_count("Supercalifragilistic", 10), 2);
//! assert_eq!(line_count("", 10), 1);
//! ```
//!
//! # Invariants
//!
//! For fixed text, [`line_count`] never increases as the width grows.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of one grapheme cluster in cells.
#[inline]
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    grapheme.width()
}

/// Display width of a string in cells.
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        return text.len();
    }
    text.graphemes(true).map(grapheme_width).sum()
}

/// Visual lines of `text` at `width` cells (a width of 0 is treated as 1).
#[must_use]
pub fn wrap_lines(text: &str, width: usize) -> Vec<&str> {
    let mut lines = Vec::new();
    for_each_line(text, width, |line| lines.push(line));
    lines
}

/// Number of visual lines; always at least 1.
#[must_use]
pub fn line_count(text: &str, width: usize) -> usize {
    let mut count = 0;
    for_each_line(text, width, |_| count += 1);
    count
}

fn for_each_line<'a>(text: &'a str, width: usize, mut emit: impl FnMut(&'a str)) {
    let width = width.max(1);
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        wrap_paragraph(paragraph, width, &mut emit);
    }
}

/// Current line: byte range into the paragraph plus its width.
struct Line {
    start: usize,
    end: usize,
    width: usize,
}

fn wrap_paragraph<'a>(paragraph: &'a str, width: usize, emit: &mut impl FnMut(&'a str)) {
    let mut line: Option<Line> = None;
    let mut gap = 0;

    for (offset, token, is_space) in tokens(paragraph) {
        let token_width = display_width(token);
        if is_space {
            if line.is_none() {
                line = Some(leading_space(offset, token, width));
            } else {
                gap += token_width;
            }
            continue;
        }

        if let Some(current) = line.as_mut() {
            if current.width + gap + token_width <= width {
                current.width += gap + token_width;
                current.end = offset + token.len();
                gap = 0;
                continue;
            }
            emit(&paragraph[current.start..current.end]);
        }
        gap = 0;

        if token_width <= width {
            line = Some(Line {
                start: offset,
                end: offset + token.len(),
                width: token_width,
            });
            continue;
        }

        // Word longer than a full line: fill whole lines, keep the tail open.
        let mut chunk_start = offset;
        let mut chunk_width = 0;
        for (index, grapheme) in token.grapheme_indices(true) {
            let w = grapheme_width(grapheme);
            if chunk_width > 0 && chunk_width + w > width {
                emit(&paragraph[chunk_start..offset + index]);
                chunk_start = offset + index;
                chunk_width = 0;
            }
            chunk_width += w;
        }
        line = Some(Line {
            start: chunk_start,
            end: offset + token.len(),
            width: chunk_width,
        });
    }

    match line {
        Some(current) => emit(&paragraph[current.start..current.end]),
        None => emit(""),
    }
}

/// Indentation at the start of a paragraph occupies the first line; only
/// the part wider than the line hangs.
fn leading_space(offset: usize, run: &str, width: usize) -> Line {
    let mut end = offset;
    let mut used = 0;
    for (index, grapheme) in run.grapheme_indices(true) {
        let w = grapheme_width(grapheme);
        if used + w > width {
            break;
        }
        used += w;
        end = offset + index + grapheme.len();
    }
    Line {
        start: offset,
        end,
        width: used,
    }
}

/// Split into alternating word and whitespace runs: `(offset, run, is_space)`.
fn tokens(paragraph: &str) -> impl Iterator<Item = (usize, &str, bool)> + '_ {
    let mut rest = paragraph;
    let mut offset = 0;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_space = first.is_whitespace();
        let len = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != is_space)
            .map_or(rest.len(), |(i, _)| i);
        let (run, tail) = rest.split_at(len);
        let item = (offset, run, is_space);
        offset += len;
        rest = tail;
        Some(item)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_wrap() {
        assert_eq!(
            wrap_lines("Hello world foo bar", 10),
            vec!["Hello", "world foo", "bar"]
        );
    }

    #[test]
    fn exact_fit_stays_on_one_line() {
        assert_eq!(wrap_lines("hello world", 11), vec!["hello world"]);
        assert_eq!(wrap_lines("hello world", 10), vec!["hello", "world"]);
    }

    #[test]
    fn long_word_splits_at_graphemes() {
        assert_eq!(
            wrap_lines("Supercalifragilistic", 10),
            vec!["Supercalif", "ragilistic"]
        );
        assert_eq!(wrap_lines("ab cdefgh", 3), vec!["ab", "cde", "fgh"]);
    }

    #[test]
    fn split_tail_shares_line_with_next_word() {
        assert_eq!(wrap_lines("abcdefg hi", 5), vec!["abcde", "fg hi"]);
    }

    #[test]
    fn hard_breaks() {
        assert_eq!(line_count("a\nb", 80), 2);
        assert_eq!(line_count("a\n\nb", 80), 3);
        assert_eq!(line_count("a\n", 80), 2);
        assert_eq!(wrap_lines("a\r\nb", 80), vec!["a", "b"]);
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(line_count("", 10), 1);
        assert_eq!(wrap_lines("    ", 2), vec!["  "]);
    }

    #[test]
    fn indentation_takes_room() {
        assert_eq!(wrap_lines("  ab", 4), vec!["  ab"]);
        assert_eq!(wrap_lines("   ab", 4), vec!["   ", "ab"]);
        assert_eq!(wrap_lines("          x", 5), vec!["     ", "x"]);
        assert_eq!(line_count("          x", 5), 2);
        assert_eq!(line_count("          x", 11), 1);
        assert_eq!(wrap_lines("a\n  b", 3), vec!["a", "  b"]);
    }

    #[test]
    fn trailing_spaces_hang() {
        assert_eq!(wrap_lines("abc     ", 4), vec!["abc"]);
        assert_eq!(wrap_lines("ab      cd", 5), vec!["ab", "cd"]);
    }

    #[test]
    fn wide_graphemes() {
        assert_eq!(display_width("你好"), 4);
        assert_eq!(wrap_lines("你好世界", 4), vec!["你好", "世界"]);
        // A wide grapheme in a 1-cell line still makes progress.
        assert_eq!(line_count("你好", 1), 2);
    }

    #[test]
    fn zwj_sequence_is_not_split() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let text = format!("{family}{family}");
        let lines = wrap_lines(&text, 2);
        assert_eq!(lines, vec![family, family]);
    }

    #[test]
    fn zero_width_is_treated_as_one() {
        assert_eq!(line_count("abc", 0), 3);
    }
}
