//! Text utilities for bubble layout
//!
//! All widths are terminal display widths (unicode-width), not byte lengths,
//! so CJK and emoji in replies wrap correctly.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[inline]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Wrap one line at word boundaries to fit `max_width`
///
/// Words wider than `max_width` are broken by character.
pub fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || display_width(line) <= max_width {
        return vec![line.to_string()];
    }

    let mut rows: Vec<String> = Vec::new();
    let mut row = String::new();
    let mut row_width = 0usize;

    for word in line.split_whitespace() {
        let word_width = display_width(word);

        if row_width > 0 && row_width + 1 + word_width <= max_width {
            row.push(' ');
            row.push_str(word);
            row_width += 1 + word_width;
            continue;
        }

        if row_width > 0 {
            rows.push(std::mem::take(&mut row));
            row_width = 0;
        }

        if word_width <= max_width {
            row.push_str(word);
            row_width = word_width;
            continue;
        }

        // Force-break an over-long word; the remainder starts the next row
        for c in word.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if row_width + w > max_width && row_width > 0 {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(c);
            row_width += w;
        }
    }

    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Wrap multi-line text, keeping blank lines
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                wrap_line(line, max_width)
            }
        })
        .collect()
}

/// Cut `s` to `max_width` columns, ending in "..." when shortened
pub fn truncate_ellipsis(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width < 4 {
        return s.chars().take(max_width).collect();
    }

    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_line_short() {
        assert_eq!(wrap_line("hello", 10), vec!["hello"]);
    }

    #[test]
    fn test_wrap_line_breaks_at_words() {
        assert_eq!(wrap_line("hello world foo", 10), vec!["hello", "world foo"]);
    }

    #[test]
    fn test_wrap_line_long_word() {
        assert_eq!(wrap_line("superlongword", 5), vec!["super", "longw", "ord"]);
        assert_eq!(wrap_line("a superlongword", 5), vec!["a", "super", "longw", "ord"]);
    }

    #[test]
    fn test_wrap_line_wide_chars() {
        // Each CJK character is two columns wide
        assert_eq!(wrap_line("日本語テキスト", 6), vec!["日本語", "テキス", "ト"]);
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        assert_eq!(
            wrap_text("hello world\n\nfoo bar", 8),
            vec!["hello", "world", "", "foo bar"]
        );
    }

    #[test]
    fn test_truncate_ellipsis() {
        assert_eq!(truncate_ellipsis("short", 10), "short");
        assert_eq!(truncate_ellipsis("technician name", 10), "technic...");
        assert_eq!(truncate_ellipsis("abcdef", 3), "abc");
    }
}
