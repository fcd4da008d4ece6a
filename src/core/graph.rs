/// Fragment graph: tag-gated random walk over story fragments.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::schema::fragment::{Fragment, FragmentId};

/// Read-only store of fragment templates, indexed for successor lookup.
///
/// A fragment with predecessor tags `{a, b}` is listed under both `a` and
/// `b`, so it is discovered from either; the full predecessor set is then
/// checked before it becomes a candidate.
#[derive(Debug, Clone, Default)]
pub struct FragmentGraph {
    fragments: Vec<Fragment>,
    initial: Vec<FragmentId>,
    by_required_tag: FxHashMap<String, Vec<FragmentId>>,
}

/// The outcome of one walk over the graph.
#[derive(Debug, Clone, Default)]
pub struct Walk {
    /// Chosen fragments, in story order.
    pub path: Vec<FragmentId>,
    /// Every tag carried by any chosen fragment.
    pub lineage: FxHashSet<String>,
    /// True if the walk was cut off by the step limit rather than running
    /// out of candidates.
    pub truncated: bool,
}

impl FragmentGraph {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        let mut initial = Vec::new();
        let mut by_required_tag: FxHashMap<String, Vec<FragmentId>> = FxHashMap::default();

        for (idx, fragment) in fragments.iter().enumerate() {
            let id = FragmentId(idx);
            if fragment.is_initial() {
                initial.push(id);
                continue;
            }
            for tag in &fragment.follows_on {
                by_required_tag.entry(tag.clone()).or_default().push(id);
            }
        }

        Self {
            fragments,
            initial,
            by_required_tag,
        }
    }

    pub fn get(&self, id: FragmentId) -> Option<&Fragment> {
        self.fragments.get(id.0)
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn initial(&self) -> &[FragmentId] {
        &self.initial
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Pick an opening fragment uniformly at random.
    pub fn pick_initial(&self, rng: &mut StdRng) -> Option<FragmentId> {
        self.initial.choose(rng).copied()
    }

    /// Every fragment allowed to follow one with `predecessor_tags`, given
    /// the story's `lineage`. Sorted and free of duplicates.
    pub fn candidates(
        &self,
        predecessor_tags: &FxHashSet<String>,
        lineage: &FxHashSet<String>,
    ) -> Vec<FragmentId> {
        let mut candidates: Vec<FragmentId> = predecessor_tags
            .iter()
            .filter_map(|tag| self.by_required_tag.get(tag))
            .flatten()
            .copied()
            .filter(|id| self.fragments[id.0].accepts(predecessor_tags, lineage))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();
        candidates
    }

    /// Pick a successor uniformly among the candidates.
    pub fn pick_next(
        &self,
        predecessor_tags: &FxHashSet<String>,
        lineage: &FxHashSet<String>,
        rng: &mut StdRng,
    ) -> Option<FragmentId> {
        self.candidates(predecessor_tags, lineage).choose(rng).copied()
    }

    /// Walk from a random opening fragment until no candidate remains or
    /// `max_fragments` have been chosen.
    ///
    /// Returns an empty walk if the graph has no opening fragment.
    pub fn walk(&self, max_fragments: usize, rng: &mut StdRng) -> Walk {
        let mut walk = Walk::default();
        let Some(mut current) = self.pick_initial(rng) else {
            tracing::debug!("no opening fragment available");
            return walk;
        };

        loop {
            let fragment = &self.fragments[current.0];
            walk.path.push(current);
            walk.lineage.extend(fragment.tags.iter().cloned());
            tracing::debug!(fragment = current.0, "chose story fragment");

            if walk.path.len() >= max_fragments {
                // Only a cut if the story could have gone on.
                if !self.candidates(&fragment.tags, &walk.lineage).is_empty() {
                    tracing::warn!(max_fragments, "story walk hit the fragment limit");
                    walk.truncated = true;
                }
                break;
            }

            match self.pick_next(&fragment.tags, &walk.lineage, rng) {
                Some(next) => current = next,
                None => break,
            }
        }

        walk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn set(items: &[&str]) -> FxHashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn chain() -> FragmentGraph {
        FragmentGraph::new(vec![
            Fragment::new("Once upon a time.", &["start"], &[], &[]),
            Fragment::new("A journey began.", &["travel"], &["start"], &[]),
            Fragment::new("The end.", &["end"], &["travel"], &[]),
        ])
    }

    #[test]
    fn partitions_initial_and_indexed() {
        let graph = FragmentGraph::new(vec![
            Fragment::new("a", &["x"], &[], &[]),
            Fragment::new("b", &["y"], &["x", "z"], &[]),
        ]);
        assert_eq!(graph.initial(), &[FragmentId(0)]);
        assert_eq!(graph.by_required_tag["x"], vec![FragmentId(1)]);
        assert_eq!(graph.by_required_tag["z"], vec![FragmentId(1)]);
        assert!(!graph.by_required_tag.contains_key("y"));
    }

    #[test]
    fn walk_follows_chain() {
        let mut rng = StdRng::seed_from_u64(1);
        let walk = chain().walk(100, &mut rng);
        assert_eq!(walk.path, vec![FragmentId(0), FragmentId(1), FragmentId(2)]);
        assert_eq!(walk.lineage, set(&["start", "travel", "end"]));
        assert!(!walk.truncated);
    }

    #[test]
    fn no_initial_fragment_gives_empty_walk() {
        let mut rng = StdRng::seed_from_u64(1);
        let graph = FragmentGraph::new(vec![Fragment::new("orphan", &["a"], &["b"], &[])]);
        let walk = graph.walk(100, &mut rng);
        assert!(walk.path.is_empty());
        assert!(walk.lineage.is_empty());
        assert!(!walk.truncated);
    }

    #[test]
    fn candidates_require_whole_predecessor_set() {
        let graph = FragmentGraph::new(vec![
            Fragment::new("start", &["a"], &[], &[]),
            Fragment::new("needs a and b", &["n"], &["a", "b"], &[]),
            Fragment::new("needs a", &["m"], &["a"], &[]),
        ]);
        let lineage = set(&["a", "b"]);
        assert_eq!(graph.candidates(&set(&["a"]), &lineage), vec![FragmentId(2)]);
        assert_eq!(
            graph.candidates(&set(&["a", "b"]), &lineage),
            vec![FragmentId(1), FragmentId(2)]
        );
    }

    #[test]
    fn candidates_are_deduplicated() {
        let graph = FragmentGraph::new(vec![
            Fragment::new("start", &["a", "b"], &[], &[]),
            Fragment::new("next", &["n"], &["a", "b"], &[]),
        ]);
        let tags = set(&["a", "b"]);
        assert_eq!(graph.candidates(&tags, &tags), vec![FragmentId(1)]);
    }

    #[test]
    fn predecessor_gate_holds_across_seeds() {
        let graph = FragmentGraph::new(vec![
            Fragment::new("s1", &["start", "x"], &[], &[]),
            Fragment::new("s2", &["start"], &[], &[]),
            Fragment::new("gated", &["gated"], &["x"], &[]),
            Fragment::new("open", &["plain"], &["start"], &[]),
            Fragment::new("loop", &["x"], &["plain"], &[]),
            Fragment::new("end", &["end"], &["gated"], &[]),
        ]);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let walk = graph.walk(50, &mut rng);
            for pair in walk.path.windows(2) {
                if pair[1] == FragmentId(2) {
                    assert!(graph.get(pair[0]).unwrap().tags.contains("x"));
                }
            }
        }
    }

    #[test]
    fn lineage_gate_holds_across_seeds() {
        let graph = FragmentGraph::new(vec![
            Fragment::new("with y", &["start", "y"], &[], &[]),
            Fragment::new("without y", &["start"], &[], &[]),
            Fragment::new("middle", &["mid"], &["start"], &[]),
            Fragment::new("needs y", &["late"], &["mid"], &["y"]),
            Fragment::new("fallback", &["late"], &["mid"], &[]),
        ]);
        let mut saw_gated = false;
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let walk = graph.walk(50, &mut rng);
            if let Some(pos) = walk.path.iter().position(|id| *id == FragmentId(3)) {
                saw_gated = true;
                // Reached via "middle", which lacks "y" itself.
                assert_eq!(walk.path[pos - 1], FragmentId(2));
                assert!(walk.path[..pos]
                    .iter()
                    .any(|id| graph.get(*id).unwrap().tags.contains("y")));
            }
        }
        assert!(saw_gated);
    }

    #[test]
    fn cyclic_graph_is_cut_off() {
        let mut rng = StdRng::seed_from_u64(4);
        let graph = FragmentGraph::new(vec![
            Fragment::new("start", &["loop"], &[], &[]),
            Fragment::new("again", &["loop"], &["loop"], &[]),
        ]);
        let walk = graph.walk(25, &mut rng);
        assert_eq!(walk.path.len(), 25);
        assert!(walk.truncated);
    }

    #[test]
    fn ending_exactly_at_limit_is_not_a_cut() {
        let mut rng = StdRng::seed_from_u64(4);
        let walk = chain().walk(3, &mut rng);
        assert_eq!(walk.path.len(), 3);
        assert!(!walk.truncated);
    }
}
