/// Placeholder scanning and position-safe splicing of resolved names.
///
/// Markup has the shape `#category:usage:tag(variant)`, e.g. `#c:new:hero()`
/// or `#r:old:home(places)`. The variant may be empty.
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use regex::Regex;

use crate::core::resolver::PlaceholderResolver;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#([a-zA-Z]+):([a-zA-Z]+):([a-zA-Z]+)\(([a-zA-Z]*)\)")
        .expect("placeholder pattern is valid")
});

/// One placeholder occurrence and its byte span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub start: usize,
    pub end: usize,
    pub category: String,
    pub usage: String,
    pub tag: String,
    pub variant: String,
}

impl Placeholder {
    /// The variant key, or `None` when the markup leaves it empty.
    pub fn variant(&self) -> Option<&str> {
        Some(self.variant.as_str()).filter(|v| !v.is_empty())
    }
}

/// All non-overlapping placeholders in `text`, left to right.
pub fn scan(text: &str) -> Vec<Placeholder> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Placeholder {
                start: whole.start(),
                end: whole.end(),
                category: caps[1].to_string(),
                usage: caps[2].to_string(),
                tag: caps[3].to_string(),
                variant: caps[4].to_string(),
            })
        })
        .collect()
}

/// Resolve every placeholder in `text` and splice the names in.
///
/// Placeholders are resolved in reading order, so an `old` reference after a
/// `new` one in the same fragment sees the new element. Replacements are
/// spliced from the rightmost span backwards, which keeps the recorded
/// offsets of earlier spans valid whatever the replacement lengths.
/// A placeholder that cannot be resolved is left untouched.
pub fn resolve_text(text: &str, resolver: &mut PlaceholderResolver, rng: &mut StdRng) -> String {
    let mut replacements: Vec<(usize, usize, String)> = Vec::new();
    for placeholder in scan(text) {
        match resolver.resolve(&placeholder.category, &placeholder.usage, &placeholder.tag, rng) {
            Ok(node) => {
                let rendered = node.render(placeholder.variant(), rng);
                replacements.push((placeholder.start, placeholder.end, rendered));
            }
            Err(e) => {
                tracing::warn!(
                    markup = &text[placeholder.start..placeholder.end],
                    "could not resolve placeholder: {e}"
                );
            }
        }
    }

    splice(text, &replacements)
}

/// Replace each `(start, end)` byte span with its text.
///
/// Spans must be ordered and non-overlapping.
pub fn splice(text: &str, replacements: &[(usize, usize, String)]) -> String {
    let mut result = text.to_string();
    for (start, end, replacement) in replacements.iter().rev() {
        result.replace_range(*start..*end, replacement);
    }
    result
}
