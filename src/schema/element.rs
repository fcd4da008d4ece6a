use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Variant key holding an element's plain name.
pub const DEFAULT_VARIANT: &str = "default";
/// Variant key holding an entity's possessive (genitive) name.
pub const POSSESSIVE_VARIANT: &str = "g";
/// Variant key holding a region's descriptive place phrases.
pub const PLACES_VARIANT: &str = "places";

/// Newtype wrapper for story element IDs, unique within one almanach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// What kind of story element a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// A character or a town: something with a name that can own things.
    Entity,
    /// A landscape that places can be located relative to.
    Region,
}

/// A named rendition of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Variant {
    /// Always rendered the same way.
    Fixed(String),
    /// One phrase picked uniformly at random on every request.
    Choice(Vec<String>),
}

/// A resolved story element (entity or region).
///
/// Created once by a factory and owned by the almanach that registered it.
/// The name, tags and variants never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementNode {
    pub id: ElementId,
    pub kind: ElementKind,
    pub name: String,
    pub tags: FxHashSet<String>,
    variants: FxHashMap<String, Variant>,
}

impl ElementNode {
    /// Build an entity node. The possessive variant is computed here.
    pub fn entity(id: ElementId, name: &str, tags: FxHashSet<String>) -> Self {
        let mut variants = FxHashMap::default();
        variants.insert(DEFAULT_VARIANT.to_string(), Variant::Fixed(name.to_string()));
        variants.insert(POSSESSIVE_VARIANT.to_string(), Variant::Fixed(possessive(name)));
        Self {
            id,
            kind: ElementKind::Entity,
            name: name.to_string(),
            tags,
            variants,
        }
    }

    /// Build a region node. An empty `places` list adds no places variant.
    pub fn region(id: ElementId, name: &str, places: &[String], tags: FxHashSet<String>) -> Self {
        let mut variants = FxHashMap::default();
        if !places.is_empty() {
            variants.insert(PLACES_VARIANT.to_string(), Variant::Choice(places.to_vec()));
        }
        Self {
            id,
            kind: ElementKind::Region,
            name: name.to_string(),
            tags,
            variants,
        }
    }

    /// Returns true if this element has the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn variant(&self, key: &str) -> Option<&Variant> {
        self.variants.get(key)
    }

    /// Render the element in the requested variant.
    ///
    /// `None`, an empty key, or a key this element does not carry all fall
    /// back to the primary name. Choice variants are re-drawn on every call.
    pub fn render(&self, key: Option<&str>, rng: &mut StdRng) -> String {
        let variant = key.filter(|k| !k.is_empty()).and_then(|k| self.variants.get(k));
        match variant {
            Some(Variant::Fixed(text)) => text.clone(),
            Some(Variant::Choice(phrases)) => phrases
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| self.name.clone()),
            None => self.name.clone(),
        }
    }
}

/// Possessive form of a name: `'s`, or only `'` after a final `s`, `x` or `th`.
pub fn possessive(name: &str) -> String {
    if name.ends_with('s') || name.ends_with('x') || name.ends_with("th") {
        format!("{}'", name)
    } else {
        format!("{}'s", name)
    }
}
