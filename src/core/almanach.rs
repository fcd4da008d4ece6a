/// Almanach: tag-keyed history of the story elements introduced so far.
use std::collections::hash_map::Entry;

use rand::rngs::StdRng;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::factory::ElementFactory;
use crate::schema::element::{ElementId, ElementNode};

/// Keeps every element created under a tag, in creation order.
///
/// Each node lives in exactly one bucket, the one for the tag it was
/// created with, so the most recent element for a tag is always the last
/// entry of that bucket. Buckets are looked up through a hash map; the
/// order in which tags were first used is kept separately in `tag_order`.
pub struct Almanach {
    factory: Box<dyn ElementFactory>,
    elements: FxHashMap<String, Vec<ElementNode>>,
    tag_order: Vec<String>,
    count: u64,
}

impl Almanach {
    pub fn new(factory: Box<dyn ElementFactory>) -> Self {
        Self {
            factory,
            elements: FxHashMap::default(),
            tag_order: Vec::new(),
            count: 0,
        }
    }

    /// Invent and register a new element with the given tag. Never reuses.
    pub fn create_element(&mut self, tag: &str, rng: &mut StdRng) -> &ElementNode {
        let id = ElementId(self.count);
        let tags: FxHashSet<String> = std::iter::once(tag.to_string()).collect();
        let node = self.factory.make_new(id, tags, rng);
        self.count += 1;
        tracing::debug!(tag, name = %node.name, id = id.0, "introduced story element");

        let bucket = match self.elements.entry(tag.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.tag_order.push(tag.to_string());
                entry.insert(Vec::new())
            }
        };
        bucket.push(node);
        &bucket[bucket.len() - 1]
    }

    /// Return the most recent element created under `tag`, creating one if
    /// there is none yet.
    pub fn get_or_create_element(&mut self, tag: &str, rng: &mut StdRng) -> &ElementNode {
        if self.elements.get(tag).map_or(true, Vec::is_empty) {
            return self.create_element(tag, rng);
        }
        let bucket = &self.elements[tag];
        &bucket[bucket.len() - 1]
    }

    /// The most recent element created under `tag`, if any.
    pub fn latest(&self, tag: &str) -> Option<&ElementNode> {
        self.elements.get(tag).and_then(|bucket| bucket.last())
    }

    /// All elements created under `tag`, oldest first.
    pub fn elements_for(&self, tag: &str) -> &[ElementNode] {
        self.elements.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tags that have elements, in the order they were first used.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tag_order.iter().map(String::as_str)
    }

    /// Number of elements ever created.
    pub fn count_elements(&self) -> u64 {
        self.count
    }
}

impl std::fmt::Debug for Almanach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Almanach")
            .field("tags", &self.tag_order)
            .field("elements", &self.elements)
            .field("count", &self.count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factory::EntityFactory;
    use rand::SeedableRng;

    fn almanach(names: &[&str]) -> Almanach {
        let names = names.iter().map(|n| n.to_string()).collect();
        Almanach::new(Box::new(EntityFactory::new(names).unwrap()))
    }

    #[test]
    fn create_registers_element() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut al = almanach(&["Sam"]);
        assert_eq!(al.count_elements(), 0);

        let node = al.create_element("funky", &mut rng);
        assert_eq!(node.name, "Sam");
        assert!(node.has_tag("funky"));
        let id = node.id;

        assert_eq!(al.count_elements(), 1);
        assert_eq!(al.elements_for("funky").len(), 1);
        assert_eq!(al.elements_for("funky")[0].id, id);
    }

    #[test]
    fn get_or_create_nonexisting_creates() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut al = almanach(&["Sam"]);
        let node = al.get_or_create_element("funky", &mut rng);
        assert_eq!(node.name, "Sam");
        assert_eq!(al.count_elements(), 1);
        assert!(al.latest("funky").is_some());
    }

    #[test]
    fn get_or_create_existing_reuses() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut al = almanach(&["Sam"]);
        let created = al.create_element("funky", &mut rng).id;

        let reused = al.get_or_create_element("funky", &mut rng).id;
        assert_eq!(created, reused);
        assert_eq!(al.count_elements(), 1);
    }

    #[test]
    fn old_lookup_is_idempotent_until_new_creation() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut al = almanach(&["Sam", "Alex", "Robin"]);

        let first = al.get_or_create_element("antagonist", &mut rng).id;
        let second = al.get_or_create_element("antagonist", &mut rng).id;
        assert_eq!(first, second);

        let newer = al.create_element("antagonist", &mut rng).id;
        assert_ne!(newer, first);
        assert_eq!(al.get_or_create_element("antagonist", &mut rng).id, newer);
        assert_eq!(al.elements_for("antagonist").len(), 2);
    }

    #[test]
    fn tags_have_separate_buckets() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut al = almanach(&["Sam", "Alex"]);
        let hero = al.create_element("hero", &mut rng).id;
        let villain = al.get_or_create_element("villain", &mut rng).id;
        assert_ne!(hero, villain);
        assert_eq!(al.elements_for("hero").len(), 1);
        assert_eq!(al.elements_for("villain").len(), 1);
        assert!(al.elements_for("sidekick").is_empty());
        assert_eq!(al.count_elements(), 2);
    }

    #[test]
    fn buckets_and_tags_keep_creation_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut al = almanach(&["Sam", "Alex", "Robin", "Kim"]);
        let first = al.create_element("hero", &mut rng).id;
        al.create_element("villain", &mut rng);
        let second = al.create_element("hero", &mut rng).id;
        let third = al.create_element("hero", &mut rng).id;
        al.get_or_create_element("mentor", &mut rng);

        let ids: Vec<ElementId> = al.elements_for("hero").iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![first, second, third]);
        assert_eq!(al.latest("hero").map(|n| n.id), Some(third));
        assert_eq!(al.tags().collect::<Vec<_>>(), vec!["hero", "villain", "mentor"]);
    }
}
