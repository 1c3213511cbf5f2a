//! Cell text flattening.

use scraper::ElementRef;

/// Flattened, whitespace-normalized text content of a cell element.
///
/// Text fragments from the cell's whole subtree are joined with single
/// spaces, runs of whitespace inside fragments are collapsed, and the result
/// is trimmed. Nested markup (links, spans, even stray tables) contributes
/// only its text, so malformed nesting can never fail here.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    let mut out = String::new();
    for fragment in cell.text() {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        push_collapsed(&mut out, fragment);
    }
    out
}

/// Append `s` to `out` with internal whitespace runs collapsed to one space.
fn push_collapsed(out: &mut String, s: &str) {
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
}
