//! Greedy word wrapping.

use unicode_width::UnicodeWidthStr;

/// Wraps `text` into lines of at most `width` display columns.
///
/// Words are separated by single spaces. Continuation lines are prefixed with
/// `indent` spaces, which do not count towards `width`. A word longer than
/// `width` sits alone on its line. The result has no trailing newline.
///
/// # Examples
///
/// ```
/// use flagtrie_help::wrap_words;
///
/// assert_eq!(wrap_words("one two three", 7, 2), "one two\n  three");
/// ```
pub fn wrap_words(text: &str, width: usize, indent: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.width();
        if line_len > 0 && line_len + 1 + word_len > width {
            out.push('\n');
            out.extend(std::iter::repeat_n(' ', indent));
            line_len = 0;
        }
        if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(word);
        line_len += word_len;
    }
    out
}
