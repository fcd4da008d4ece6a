//! Story Engine: procedural short stories and synthetic rating labels.
//!
//! Stories are built by walking a graph of tagged text fragments and
//! splicing generated characters, towns and regions into their
//! placeholders. A rule-based labeler then scores each story on a 0..=5
//! scale, which makes the output usable as machine-labeled training data.

pub mod core;
pub mod schema;
pub mod telemetry;

pub use crate::core::labeler::{Categorization, KeywordLists, Labeler};
pub use crate::core::teller::{Story, StoryTeller, StoryTellerBuilder};
pub use crate::schema::config::{ConfigError, StoryConfig};
