//! WASM bindings for story-engine: powers the in-browser story demo.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use story_engine::core::sample::{to_html, LabelStatistics};
use story_engine::{Categorization, KeywordLists, Labeler, StoryTeller};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct StoryOutput {
    text: String,
    html: String,
    fragments: usize,
    truncated: bool,
    label: Categorization,
}

// ---------------------------------------------------------------------------
// StoryDemo: the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct StoryDemo {
    teller: StoryTeller,
}

#[wasm_bindgen]
impl StoryDemo {
    /// Create a teller over the bundled stories.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<StoryDemo, JsError> {
        let teller = StoryTeller::builder()
            .seed(seed)
            .build()
            .map_err(|e| JsError::new(&format!("Story teller build error: {e}")))?;
        Ok(StoryDemo { teller })
    }

    /// Tell the next story. Returns JSON with the text, its HTML document and
    /// the label breakdown.
    pub fn tell_story(&mut self) -> Result<String, JsError> {
        let (story, label) = self
            .teller
            .tell_labeled_story()
            .ok_or_else(|| JsError::new("No opening fragment available"))?;
        let output = StoryOutput {
            html: to_html(&story.text),
            fragments: story.fragments.len(),
            truncated: story.truncated,
            text: story.text,
            label,
        };
        serde_json::to_string(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Label `size` stories and return the histograms as JSON.
    pub fn statistics(&mut self, size: usize) -> Result<String, JsError> {
        let stats = LabelStatistics::collect(&mut self.teller, size);
        serde_json::to_string(&stats)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Restart the story sequence from a new seed.
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        self.teller = StoryDemo::new(seed)?.teller;
        Ok(())
    }
}

/// Label arbitrary text with the default keyword lists. Returns JSON.
#[wasm_bindgen]
pub fn categorize(text: &str, seed: u64) -> Result<String, JsError> {
    let labeler = Labeler::new(&KeywordLists::default())
        .map_err(|e| JsError::new(&format!("Keyword error: {e}")))?;
    let mut rng = StdRng::seed_from_u64(seed);
    serde_json::to_string(&labeler.categorize(text, &mut rng))
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

/// Tell a single story from the bundled data. Returns JSON.
#[wasm_bindgen]
pub fn tell_story(seed: u64) -> Result<String, JsError> {
    StoryDemo::new(seed)?.tell_story()
}
