//! Mermaid diagram extraction from generated design documents.

use std::sync::OnceLock;

use regex::Regex;

fn mermaid_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"```mermaid\r?\n([\s\S]*?)```").expect("Invalid mermaid fence regex")
    })
}

/// Returns the body of the first ```` ```mermaid ```` fence, trimmed.
///
/// Text without such a fence is assumed to be bare diagram code: any stray
/// fence markers are removed and the rest is returned trimmed.
pub fn extract_mermaid_code(text: &str) -> String {
    if let Some(caps) = mermaid_fence_re().captures(text) {
        return caps[1].trim().to_string();
    }
    text.replace("```", "").trim().to_string()
}

/// Whether the text holds a fenced mermaid diagram.
pub fn has_mermaid_fence(text: &str) -> bool {
    mermaid_fence_re().is_match(text)
}
