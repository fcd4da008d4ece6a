use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Index of a fragment template inside its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FragmentId(pub usize);

/// A reusable block of template story text with gating predicates.
///
/// Templates are never mutated; a story run renders its own text from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// Tags attached to the story once this fragment is chosen.
    pub tags: FxHashSet<String>,
    /// Raw text, possibly containing `#category:usage:tag(variant)` markers.
    pub text: String,
    /// Tags the immediately preceding fragment must all bear.
    /// Empty means the fragment can only open a story.
    #[serde(default)]
    pub follows_on: FxHashSet<String>,
    /// Tags that must have appeared on any earlier fragment of the same story.
    #[serde(default)]
    pub lineage_of: FxHashSet<String>,
}

impl Fragment {
    pub fn new(text: &str, tags: &[&str], follows_on: &[&str], lineage_of: &[&str]) -> Self {
        Self {
            tags: to_set(tags),
            text: text.to_string(),
            follows_on: to_set(follows_on),
            lineage_of: to_set(lineage_of),
        }
    }

    /// True if the fragment can open a story.
    pub fn is_initial(&self) -> bool {
        self.follows_on.is_empty()
    }

    /// True if this fragment may directly follow one bearing `predecessor_tags`
    /// in a story whose accumulated tags are `lineage`.
    pub fn accepts(&self, predecessor_tags: &FxHashSet<String>, lineage: &FxHashSet<String>) -> bool {
        self.follows_on.is_subset(predecessor_tags) && self.lineage_of.is_subset(lineage)
    }
}

fn to_set(items: &[&str]) -> FxHashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_when_no_predecessor_tags() {
        assert!(Fragment::new("Once upon a time.", &["start"], &[], &[]).is_initial());
        assert!(!Fragment::new("Then.", &["mid"], &["start"], &[]).is_initial());
    }

    #[test]
    fn accepts_requires_every_predecessor_tag() {
        let fragment = Fragment::new("x", &[], &["a", "b"], &[]);
        let lineage = FxHashSet::default();
        assert!(!fragment.accepts(&to_set(&["a"]), &lineage));
        assert!(fragment.accepts(&to_set(&["a", "b", "c"]), &lineage));
    }

    #[test]
    fn accepts_requires_lineage() {
        let fragment = Fragment::new("x", &[], &["a"], &["y"]);
        let predecessor = to_set(&["a"]);
        assert!(!fragment.accepts(&predecessor, &to_set(&["a"])));
        assert!(fragment.accepts(&predecessor, &to_set(&["a", "y"])));
    }
}
