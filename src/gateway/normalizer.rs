//! Reduces a backend reply to one display string.

use crate::downstream::ReplyFragment;

/// Join the trimmed, non-empty `text` of each fragment with newlines, in order.
///
/// Returns an empty string when no fragment carries usable text.
pub fn normalize(fragments: &[ReplyFragment]) -> String {
    fragments
        .iter()
        .filter_map(|f| f.text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
