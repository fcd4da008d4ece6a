use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::fragment::Fragment;

const BUNDLED: &str = include_str!("../../story_data/stories.ron");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("pool for category '{0}' has no identifiers")]
    EmptyPool(String),
    #[error("no regions configured")]
    MissingRegions,
}

/// A region record: a name plus phrases locating something relative to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    #[serde(default)]
    pub places: Vec<String>,
}

/// Everything the story teller reads before generating.
///
/// RON shape:
///
/// ```ron
/// StoryConfig(
///     char_names: ["Sam", "Alex"],
///     regions: [(name: "the Grey Hills", places: ["north of the Grey Hills"])],
///     story_nodes: [(text: "#c:new:hero() woke up.", tags: ["start"])],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryConfig {
    pub char_names: Vec<String>,
    pub regions: Vec<RegionRecord>,
    pub story_nodes: Vec<Fragment>,
    /// Fixed town names. Generated procedurally when absent.
    #[serde(default)]
    pub town_names: Option<Vec<String>>,
}

impl StoryConfig {
    /// Load a story configuration from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<StoryConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a story configuration from a RON string.
    pub fn parse_ron(input: &str) -> Result<StoryConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    /// The story data shipped with the crate.
    pub fn bundled() -> Result<StoryConfig, ConfigError> {
        Self::parse_ron(BUNDLED)
    }

    /// Check the lists that must not be empty for generation to work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.char_names.is_empty() {
            return Err(ConfigError::EmptyPool("c".to_string()));
        }
        if self.regions.is_empty() {
            return Err(ConfigError::MissingRegions);
        }
        if matches!(&self.town_names, Some(names) if names.is_empty()) {
            return Err(ConfigError::EmptyPool("t".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"StoryConfig(
        char_names: ["Sam", "Alex"],
        regions: [
            (name: "the Grey Hills", places: ["north of the Grey Hills", "beyond the Grey Hills"]),
            (name: "the Fens"),
        ],
        story_nodes: [
            (text: "#c:new:hero() woke up.", tags: ["start"]),
            (text: "Then #c:old:hero() left.", tags: ["end"], follows_on: ["start"], lineage_of: ["start"]),
        ],
    )"##;

    #[test]
    fn parse_minimal_config() {
        let config = StoryConfig::parse_ron(MINIMAL).unwrap();
        assert_eq!(config.char_names, vec!["Sam".to_string(), "Alex".to_string()]);
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.regions[0].places.len(), 2);
        assert!(config.regions[1].places.is_empty());
        assert_eq!(config.story_nodes.len(), 2);
        assert!(config.story_nodes[0].follows_on.is_empty());
        assert!(config.story_nodes[0].lineage_of.is_empty());
        assert!(config.story_nodes[1].follows_on.contains("start"));
        assert!(config.town_names.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_names_is_a_parse_error() {
        let input = r#"StoryConfig(regions: [], story_nodes: [])"#;
        assert!(matches!(StoryConfig::parse_ron(input), Err(ConfigError::Ron(_))));
    }

    #[test]
    fn empty_lists_fail_validation() {
        let mut config = StoryConfig::parse_ron(MINIMAL).unwrap();
        config.char_names.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPool(c)) if c == "c"));

        let mut config = StoryConfig::parse_ron(MINIMAL).unwrap();
        config.regions.clear();
        assert!(matches!(config.validate(), Err(ConfigError::MissingRegions)));

        let mut config = StoryConfig::parse_ron(MINIMAL).unwrap();
        config.town_names = Some(Vec::new());
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPool(c)) if c == "t"));
    }

    #[test]
    fn bundled_config_is_valid() {
        let config = StoryConfig::bundled().unwrap();
        assert!(config.validate().is_ok());
        assert!(config.story_nodes.iter().any(|f| f.is_initial()));
    }

    #[test]
    fn load_fixture_config() {
        let path = std::path::PathBuf::from("tests/fixtures/test_stories.ron");
        let config = StoryConfig::load_from_ron(&path).unwrap();
        assert!(!config.char_names.is_empty());
        assert!(!config.story_nodes.is_empty());
        assert!(config.validate().is_ok());
    }
}
