//! Text preparation for speech synthesis: markdown flattening and
//! word-bounded chunking.

/// Flatten markdown to plain speakable text.
///
/// Strips markup without preserving any structure: headings, emphasis,
/// links (keeping the link text), images, code fences, inline code, list
/// markers and blockquotes are removed, then whitespace is normalized to
/// single spaces.
pub fn flatten_markdown(markdown: &str) -> String {
    let fence_pattern = regex::Regex::new(r"(?m)^```[^\n]*$").unwrap();
    let text = fence_pattern.replace_all(markdown, " ");

    let inline_code_pattern = regex::Regex::new(r"`([^`]*)`").unwrap();
    let text = inline_code_pattern.replace_all(&text, "$1");

    // Images first: their syntax embeds the link syntax
    let image_pattern = regex::Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap();
    let text = image_pattern.replace_all(&text, "$1");

    let link_pattern = regex::Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap();
    let text = link_pattern.replace_all(&text, "$1");

    let heading_pattern = regex::Regex::new(r"(?m)^#{1,6}\s+").unwrap();
    let text = heading_pattern.replace_all(&text, "");

    // List markers before emphasis, so a `*` bullet is not mistaken for
    // the opening of an emphasis span on the next line
    let list_marker_pattern = regex::Regex::new(r"(?m)^\s*(?:[-*+]|\d+\.)\s+").unwrap();
    let text = list_marker_pattern.replace_all(&text, "");

    let blockquote_pattern = regex::Regex::new(r"(?m)^>\s?").unwrap();
    let text = blockquote_pattern.replace_all(&text, "");

    let emphasis_pattern = regex::Regex::new(r"[*_]{1,3}([^*_]+)[*_]{1,3}").unwrap();
    let text = emphasis_pattern.replace_all(&text, "$1");

    // Normalize whitespace (replace multiple spaces/newlines with single space)
    let whitespace_pattern = regex::Regex::new(r"\s+").unwrap();
    whitespace_pattern.replace_all(&text, " ").trim().to_string()
}

/// Split text into chunks of at most `max_length` characters without
/// breaking words. Each chunk is as long as possible; a single word longer
/// than `max_length` becomes its own chunk.
pub fn split_text(text: &str, max_length: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_length {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
