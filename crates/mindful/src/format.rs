//! Markdown-subset formatter for generated text.
//!
//! A fixed six-pass regex pipeline, not a Markdown parser. Each pass runs on
//! the previous pass's output:
//!
//! 1. `**bold**` → `<strong>` (non-greedy)
//! 2. `*italic*` → `<em>` (non-greedy)
//! 3. lines starting with `- ` → `<li>`
//! 4. each line holding list items → wrapped in `<ul>`
//! 5. newlines → `<br>`
//! 6. `</ul><br><ul>` removed so neighbouring list lines share one `<ul>`
//!
//! Nested emphasis, ordered lists and malformed input come out partially
//! transformed. Stored insights are re-run through the same pipeline on every
//! render, so the output must stay byte-for-byte stable.

use regex::Regex;
use std::sync::LazyLock;

/// Any character except a line terminator. Lines end at `\n`, `\r`, U+2028
/// and U+2029, so `.` and `^` never span or skip any of them.
const NOT_EOL: &str = r"[^\n\r\x{2028}\x{2029}]";

/// Whitespace as matched by `\s` in the browser, which differs from Unicode
/// `White_Space` (U+FEFF included, U+0085 not).
const SPACE: &str = r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap()
}

static BOLD: LazyLock<Regex> = LazyLock::new(|| pattern(&format!(r"\*\*({NOT_EOL}*?)\*\*")));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| pattern(&format!(r"\*({NOT_EOL}*?)\*")));
// `(?m)^` only follows `\n`; a lone `\r`, U+2028 or U+2029 start a line too,
// so that terminator is captured and written back.
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    pattern(&format!(
        r"(?m)(^|[\r\x{{2028}}\x{{2029}}])-{SPACE}({NOT_EOL}*)"
    ))
});
static LIST_RUN: LazyLock<Regex> =
    LazyLock::new(|| pattern(&format!(r"(<li>{NOT_EOL}*</li>)")));

const LIST_SEAM: &str = "</ul><br><ul>";

/// Convert generated text to display markup.
pub fn format_response(text: &str) -> String {
    let text = BOLD.replace_all(text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    let text = LIST_ITEM.replace_all(&text, "${1}<li>${2}</li>");
    let text = LIST_RUN.replace_all(&text, "<ul>${1}</ul>");
    text.replace('\n', "<br>").replace(LIST_SEAM, "")
}
