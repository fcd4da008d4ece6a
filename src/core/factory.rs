/// Factories that invent new story elements for an almanach.
use rand::rngs::StdRng;
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::core::pool::Pool;
use crate::schema::config::RegionRecord;
use crate::schema::element::{ElementId, ElementNode};

/// Invents a new element bearing `tags`.
pub trait ElementFactory {
    fn make_new(&mut self, id: ElementId, tags: FxHashSet<String>, rng: &mut StdRng) -> ElementNode;
}

/// Names entities from a depleting pool of names.
#[derive(Debug, Clone)]
pub struct EntityFactory {
    names: Pool<String>,
}

impl EntityFactory {
    /// Returns `None` if `names` is empty.
    pub fn new(names: Vec<String>) -> Option<Self> {
        Pool::new(names).map(|names| Self { names })
    }

    pub fn pool(&self) -> &Pool<String> {
        &self.names
    }
}

impl ElementFactory for EntityFactory {
    fn make_new(&mut self, id: ElementId, tags: FxHashSet<String>, rng: &mut StdRng) -> ElementNode {
        let name = self.names.extract(rng);
        ElementNode::entity(id, &name, tags)
    }
}

/// Draws regions with replacement from a fixed list of records.
#[derive(Debug, Clone)]
pub struct RegionFactory {
    regions: Vec<RegionRecord>,
}

impl RegionFactory {
    /// Returns `None` if `regions` is empty.
    pub fn new(regions: Vec<RegionRecord>) -> Option<Self> {
        if regions.is_empty() {
            return None;
        }
        Some(Self { regions })
    }

    fn pick(&self, rng: &mut StdRng) -> &RegionRecord {
        // Non-empty by construction.
        &self.regions[rng.gen_range(0..self.regions.len())]
    }
}

impl ElementFactory for RegionFactory {
    fn make_new(&mut self, id: ElementId, tags: FxHashSet<String>, rng: &mut StdRng) -> ElementNode {
        let region = self.pick(rng);
        ElementNode::region(id, &region.name, &region.places, tags)
    }
}
