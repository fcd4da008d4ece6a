/// The story teller: configuration → fragment walk → resolved text.
///
/// Wires together the fragment graph, one placeholder resolver per run and
/// the labeler.
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::factory::{EntityFactory, RegionFactory};
use crate::core::graph::FragmentGraph;
use crate::core::labeler::{Categorization, Labeler};
use crate::core::placeholder::resolve_text;
use crate::core::resolver::{ElementResolver, PlaceholderResolver};
use crate::core::towns::generate_town_names;
use crate::schema::config::{ConfigError, StoryConfig};
use crate::schema::fragment::FragmentId;

/// Placeholder category for characters.
pub const CHARACTERS: &str = "c";
/// Placeholder category for towns.
pub const TOWNS: &str = "t";
/// Placeholder category for regions.
pub const REGIONS: &str = "r";

const DEFAULT_MAX_FRAGMENTS: usize = 200;
const DEFAULT_TOWN_COUNT: usize = 30;

/// One generated story.
#[derive(Debug, Clone)]
pub struct Story {
    /// Resolved fragment texts joined by single spaces.
    pub text: String,
    /// The fragments the story was built from, in order.
    pub fragments: Vec<FragmentId>,
    /// Every tag the chosen fragments carried.
    pub lineage: FxHashSet<String>,
    /// True if the fragment limit cut the story short.
    pub truncated: bool,
}

/// Generates stories from a validated configuration. Built via
/// `StoryTeller::builder()`.
///
/// Each story gets fresh name pools and almanachs, so characters never
/// leak from one story into the next. The fragment graph is shared
/// read-only between runs.
#[derive(Debug, Clone)]
pub struct StoryTeller {
    graph: Arc<FragmentGraph>,
    characters: EntityFactory,
    towns: EntityFactory,
    regions: RegionFactory,
    labeler: Labeler,
    max_fragments: usize,
    seed: u64,
    generation_count: u64,
}

/// Builder for constructing a `StoryTeller`.
pub struct StoryTellerBuilder {
    config: Option<StoryConfig>,
    config_path: Option<PathBuf>,
    labeler: Option<Labeler>,
    max_fragments: usize,
    town_count: usize,
    seed: u64,
}

impl StoryTeller {
    pub fn builder() -> StoryTellerBuilder {
        StoryTellerBuilder {
            config: None,
            config_path: None,
            labeler: None,
            max_fragments: DEFAULT_MAX_FRAGMENTS,
            town_count: DEFAULT_TOWN_COUNT,
            seed: 0,
        }
    }

    /// Tell the next story in this teller's seeded sequence.
    ///
    /// Returns `None` when the configuration has no opening fragment.
    pub fn tell_story(&mut self) -> Option<Story> {
        let mut rng = self.next_rng();
        self.tell_story_with(&mut rng)
    }

    /// Tell a story drawing all randomness from `rng`.
    pub fn tell_story_with(&self, rng: &mut StdRng) -> Option<Story> {
        let mut resolver = self.fresh_resolver();
        let walk = self.graph.walk(self.max_fragments, rng);
        if walk.path.is_empty() {
            tracing::warn!("no story produced: configuration has no opening fragment");
            return None;
        }

        let texts: Vec<String> = walk
            .path
            .iter()
            .filter_map(|id| self.graph.get(*id))
            .map(|fragment| resolve_text(&fragment.text, &mut resolver, rng))
            .collect();

        Some(Story {
            text: texts.join(" "),
            fragments: walk.path,
            lineage: walk.lineage,
            truncated: walk.truncated,
        })
    }

    /// Tell the next story and label it.
    pub fn tell_labeled_story(&mut self) -> Option<(Story, Categorization)> {
        let mut rng = self.next_rng();
        let story = self.tell_story_with(&mut rng)?;
        let label = self.labeler.categorize(&story.text, &mut rng);
        Some((story, label))
    }

    pub fn graph(&self) -> &FragmentGraph {
        &self.graph
    }

    /// A shared handle to the read-only fragment graph.
    pub fn shared_graph(&self) -> Arc<FragmentGraph> {
        Arc::clone(&self.graph)
    }

    pub fn labeler(&self) -> &Labeler {
        &self.labeler
    }

    /// The town names every story starts from.
    pub fn town_names(&self) -> &[String] {
        self.towns.pool().available()
    }

    /// A resolver over brand-new almanachs for the `c`, `t` and `r` categories.
    pub fn fresh_resolver(&self) -> PlaceholderResolver {
        let mut resolver = PlaceholderResolver::new();
        resolver.set_strategy_for(CHARACTERS, ElementResolver::with_factory(self.characters.clone()));
        resolver.set_strategy_for(TOWNS, ElementResolver::with_factory(self.towns.clone()));
        resolver.set_strategy_for(REGIONS, ElementResolver::with_factory(self.regions.clone()));
        resolver
    }

    fn next_rng(&mut self) -> StdRng {
        let rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.generation_count));
        self.generation_count += 1;
        rng
    }
}

impl StoryTellerBuilder {
    /// Provide the configuration directly.
    pub fn config(mut self, config: StoryConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the configuration from a RON file at build time.
    pub fn config_path(mut self, path: &str) -> Self {
        self.config_path = Some(PathBuf::from(path));
        self
    }

    pub fn labeler(mut self, labeler: Labeler) -> Self {
        self.labeler = Some(labeler);
        self
    }

    /// Upper bound on fragments per story. At least one.
    pub fn max_fragments(mut self, max: usize) -> Self {
        self.max_fragments = max.max(1);
        self
    }

    /// How many town names to generate when the config lists none.
    pub fn town_count(mut self, count: usize) -> Self {
        self.town_count = count;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the configuration and build the teller.
    ///
    /// Without an explicit config or path the bundled story data is used.
    pub fn build(self) -> Result<StoryTeller, ConfigError> {
        let config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => StoryConfig::load_from_ron(&path)?,
            (None, None) => StoryConfig::bundled()?,
        };
        config.validate()?;

        let town_names = match config.town_names {
            Some(names) => names,
            None => {
                let mut rng = StdRng::seed_from_u64(self.seed);
                generate_town_names(self.town_count, &mut rng)
            }
        };

        let characters = EntityFactory::new(config.char_names)
            .ok_or_else(|| ConfigError::EmptyPool(CHARACTERS.to_string()))?;
        let towns = EntityFactory::new(town_names)
            .ok_or_else(|| ConfigError::EmptyPool(TOWNS.to_string()))?;
        let regions = RegionFactory::new(config.regions).ok_or(ConfigError::MissingRegions)?;

        let graph = FragmentGraph::new(config.story_nodes);
        tracing::debug!(
            fragments = graph.len(),
            openings = graph.initial().len(),
            "story teller ready"
        );

        Ok(StoryTeller {
            graph: Arc::new(graph),
            characters,
            towns,
            regions,
            labeler: self.labeler.unwrap_or_default(),
            max_fragments: self.max_fragments,
            seed: self.seed,
            generation_count: 0,
        })
    }
}
