// Post-processing for remote completion output.
//
// The model is told to return HTML only, but completions routinely arrive
// wrapped in Markdown fences or with prose around the document. Cleanup is
// best-effort: text without fences or surrounding prose passes through
// untouched.

const DOCTYPE_MARKER: &str = "<!doctype html>";
const CLOSING_TAG: &str = "</html>";

/// Reduces raw completion output to the card markup.
pub fn extract_card_markup(raw: &str) -> String {
    let unfenced = strip_code_fences(raw);
    trim_to_document(&unfenced).trim().to_string()
}

/// Removes ```html and ``` fence markers wherever they appear, swallowing
/// the newline that usually rides along with each marker.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```html\n", "")
        .replace("```html", "")
        .replace("\n```", "")
        .replace("```", "")
}

/// Cuts prose before the doctype and after the closing root tag, when both
/// ends of a document are recognizable. Fragments come back unchanged.
fn trim_to_document(html: &str) -> &str {
    let mut out = html;

    if let Some(at) = find_ascii_ignore_case(out, DOCTYPE_MARKER) {
        out = &out[at..];
    }
    if let Some(at) = find_ascii_ignore_case(out, CLOSING_TAG) {
        out = &out[..at + CLOSING_TAG.len()];
    }

    out
}

/// Byte-wise ASCII-case-insensitive substring search. The needles are pure
/// ASCII and ASCII bytes never occur inside multi-byte UTF-8 sequences, so
/// a returned index always sits on a char boundary.
fn find_ascii_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();

    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }

    (0..=haystack.len() - needle.len())
        .find(|&at| haystack[at..at + needle.len()].eq_ignore_ascii_case(needle))
}
