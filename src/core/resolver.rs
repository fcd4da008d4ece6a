/// Resolution strategies: turn a placeholder's category, usage type and
/// tag into a concrete story element.
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::almanach::Almanach;
use crate::core::factory::ElementFactory;
use crate::schema::element::ElementNode;

/// Usage-type token selecting [`Strategy::New`].
pub const NEW: &str = "new";
/// Usage-type token selecting [`Strategy::Old`].
pub const OLD: &str = "old";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no strategy for story element category '{0}' registered")]
    UnknownCategory(String),
    #[error("no strategy for resolving usage type '{usage}' in category '{category}'")]
    UnknownUsageType { category: String, usage: String },
}

/// How an element is looked up in an almanach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Always introduce a fresh element.
    New,
    /// Reuse the latest element with the tag, introducing one if needed.
    Old,
}

impl Strategy {
    pub fn resolve<'a>(&self, tag: &str, almanach: &'a mut Almanach, rng: &mut StdRng) -> &'a ElementNode {
        match self {
            Self::New => almanach.create_element(tag, rng),
            Self::Old => almanach.get_or_create_element(tag, rng),
        }
    }
}

/// One category's almanach together with its usage-type table.
#[derive(Debug)]
pub struct ElementResolver {
    almanach: Almanach,
    strategies: FxHashMap<String, Strategy>,
}

impl ElementResolver {
    /// A resolver with the standard `new` and `old` usage types.
    pub fn new(almanach: Almanach) -> Self {
        let mut strategies = FxHashMap::default();
        strategies.insert(NEW.to_string(), Strategy::New);
        strategies.insert(OLD.to_string(), Strategy::Old);
        Self { almanach, strategies }
    }

    /// Shorthand for a resolver over a fresh almanach fed by `factory`.
    pub fn with_factory(factory: impl ElementFactory + 'static) -> Self {
        Self::new(Almanach::new(Box::new(factory)))
    }

    /// Register (or replace) the strategy used for a usage-type token.
    pub fn set_strategy(&mut self, usage: &str, strategy: Strategy) {
        self.strategies.insert(usage.to_string(), strategy);
    }

    pub fn strategy_for(&self, usage: &str) -> Option<Strategy> {
        self.strategies.get(usage).copied()
    }

    pub fn almanach(&self) -> &Almanach {
        &self.almanach
    }

    /// Resolve `tag` with the strategy registered for `usage`.
    ///
    /// The category is only used for the error message.
    pub fn resolve_element(
        &mut self,
        category: &str,
        usage: &str,
        tag: &str,
        rng: &mut StdRng,
    ) -> Result<&ElementNode, ResolveError> {
        let strategy = self
            .strategy_for(usage)
            .ok_or_else(|| ResolveError::UnknownUsageType {
                category: category.to_string(),
                usage: usage.to_string(),
            })?;
        Ok(strategy.resolve(tag, &mut self.almanach, rng))
    }
}

/// Dispatches placeholder lookups to the resolver registered for their category.
#[derive(Debug, Default)]
pub struct PlaceholderResolver {
    categories: FxHashMap<String, ElementResolver>,
}

impl PlaceholderResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_strategy_for(&mut self, category: &str, resolver: ElementResolver) {
        self.categories.insert(category.to_string(), resolver);
    }

    pub fn category(&self, category: &str) -> Option<&ElementResolver> {
        self.categories.get(category)
    }

    /// True if `category` is registered and accepts `usage`.
    pub fn knows(&self, category: &str, usage: &str) -> bool {
        self.category(category)
            .is_some_and(|resolver| resolver.strategy_for(usage).is_some())
    }

    /// Resolve a placeholder into a story element.
    ///
    /// Never fails for a known category and usage type: when an existing
    /// element is requested but none exists, a new one is introduced.
    pub fn resolve(
        &mut self,
        category: &str,
        usage: &str,
        tag: &str,
        rng: &mut StdRng,
    ) -> Result<&ElementNode, ResolveError> {
        let resolver = self
            .categories
            .get_mut(category)
            .ok_or_else(|| ResolveError::UnknownCategory(category.to_string()))?;
        resolver.resolve_element(category, usage, tag, rng)
    }
}
