/// Rule-based labeler: scores a finished story into a category 0..=5.
///
/// The score starts from a base level read off the closing sentence and is
/// nudged by how strongly liked and disliked keywords outweigh each other
/// across the whole text.
use rand::rngs::StdRng;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Lowest category a text can receive.
pub const MIN_LEVEL: u8 = 0;
/// Highest category a text can receive.
pub const MAX_LEVEL: u8 = 5;

const NEUTRAL_BASE: i32 = 2;
const BAD_ENDING_BASE: i32 = 1;

/// Keyword lists driving the labeler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordLists {
    pub good_ending: Vec<String>,
    pub bad_ending: Vec<String>,
    /// +1 each.
    pub positive: Vec<String>,
    /// +2 each.
    pub very_positive: Vec<String>,
    /// +1 each.
    pub negative: Vec<String>,
    /// +2 each.
    pub very_negative: Vec<String>,
}

impl Default for KeywordLists {
    /// The taste of the reader the synthetic samples are labeled for: fond of
    /// fantasy, magic, rescues and mountains, and especially dragons; not keen
    /// on detective stories, shootings, forests and rain, and least of all fire.
    fn default() -> Self {
        Self {
            good_ending: words(&["happy", "happily"]),
            bad_ending: words(&["died", "dead"]),
            positive: words(&[
                "wizard", "witch", "mage", "spell", "kidnapped", "mountain", "mountains", "valley",
                "valleys",
            ]),
            very_positive: words(&["dragon"]),
            negative: words(&[
                "pi", "shooting", "shootout", "forest", "forests", "wood", "woods", "rain", "rainy",
            ]),
            very_negative: words(&["fire"]),
        }
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// The keywords that fired, grouped by what they influenced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reasons {
    pub positive: Vec<String>,
    pub very_positive: Vec<String>,
    pub negative: Vec<String>,
    pub very_negative: Vec<String>,
    pub good_ending: Vec<String>,
    pub bad_ending: Vec<String>,
}

/// A category together with the values it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
    /// Final category in `0..=5`.
    pub level: u8,
    pub base_level: i32,
    pub pos_influence: i32,
    pub neg_influence: i32,
    /// Shift applied to the base level, in `-2..=2`.
    pub variation: i32,
    pub reasons: Reasons,
}

/// A keyword with its compiled whole-word matcher.
#[derive(Debug, Clone)]
struct Keyword {
    word: String,
    pattern: Regex,
}

impl Keyword {
    fn compile(list: &[String]) -> Result<Vec<Keyword>, regex::Error> {
        list.iter()
            .map(|word| {
                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&word.to_lowercase())))?;
                Ok(Keyword {
                    word: word.clone(),
                    pattern,
                })
            })
            .collect()
    }

    fn found_in(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Deterministic keyword scorer, apart from the coin flip between 3 and 4
/// for happy endings.
#[derive(Debug, Clone)]
pub struct Labeler {
    good_ending: Vec<Keyword>,
    bad_ending: Vec<Keyword>,
    positive: Vec<Keyword>,
    very_positive: Vec<Keyword>,
    negative: Vec<Keyword>,
    very_negative: Vec<Keyword>,
}

impl Default for Labeler {
    fn default() -> Self {
        // Escaped literals always compile.
        Self::new(&KeywordLists::default()).expect("default keyword lists compile")
    }
}

impl Labeler {
    pub fn new(lists: &KeywordLists) -> Result<Self, regex::Error> {
        Ok(Self {
            good_ending: Keyword::compile(&lists.good_ending)?,
            bad_ending: Keyword::compile(&lists.bad_ending)?,
            positive: Keyword::compile(&lists.positive)?,
            very_positive: Keyword::compile(&lists.very_positive)?,
            negative: Keyword::compile(&lists.negative)?,
            very_negative: Keyword::compile(&lists.very_negative)?,
        })
    }

    /// Score `text` into a category with its full breakdown.
    pub fn categorize(&self, text: &str, rng: &mut StdRng) -> Categorization {
        let text = text.to_lowercase();
        let mut reasons = Reasons::default();

        let base_level = self.base_level(&text, &mut reasons, rng);
        let (pos_influence, neg_influence) = self.influences(&text, &mut reasons);
        let variation = variation(pos_influence, neg_influence);
        let level = (base_level + variation).clamp(MIN_LEVEL as i32, MAX_LEVEL as i32) as u8;

        Categorization {
            level,
            base_level,
            pos_influence,
            neg_influence,
            variation,
            reasons,
        }
    }

    /// Shorthand for the category alone.
    pub fn score(&self, text: &str, rng: &mut StdRng) -> u8 {
        self.categorize(text, rng).level
    }

    fn base_level(&self, text: &str, reasons: &mut Reasons, rng: &mut StdRng) -> i32 {
        let closing = closing_sentence(text);
        let mut base = NEUTRAL_BASE;

        if let Some(kw) = self.bad_ending.iter().find(|kw| kw.found_in(closing)) {
            base = BAD_ENDING_BASE;
            reasons.bad_ending.push(kw.word.clone());
        }
        // A happy ending overrides a bad one.
        if let Some(kw) = self.good_ending.iter().find(|kw| kw.found_in(closing)) {
            base = if rng.gen_bool(0.5) { 3 } else { 4 };
            reasons.good_ending.push(kw.word.clone());
        }
        base
    }

    fn influences(&self, text: &str, reasons: &mut Reasons) -> (i32, i32) {
        let pos = tally(&self.positive, 1, text, &mut reasons.positive)
            + tally(&self.very_positive, 2, text, &mut reasons.very_positive);
        let neg = tally(&self.negative, 1, text, &mut reasons.negative)
            + tally(&self.very_negative, 2, text, &mut reasons.very_negative);
        (pos, neg)
    }
}

/// Add `weight` for every keyword of `list` present in `text`, noting each hit.
fn tally(list: &[Keyword], weight: i32, text: &str, hits: &mut Vec<String>) -> i32 {
    let mut total = 0;
    for kw in list.iter().filter(|kw| kw.found_in(text)) {
        total += weight;
        hits.push(kw.word.clone());
    }
    total
}

/// Shift of the base level from the balance of positive and negative influence.
pub fn variation(pos: i32, neg: i32) -> i32 {
    let mean = 0.5 * f64::from(pos + neg);
    let diff = f64::from((pos - neg).abs());
    let sign = if pos > neg { 1 } else { -1 };

    if diff > 0.6 * mean && mean > 1.8 {
        2 * sign
    } else if diff > 0.3 * mean {
        sign
    } else {
        0
    }
}

/// The text between the last two full stops, trimmed.
///
/// With a single full stop this is everything before it; without any, the
/// whole text.
pub fn closing_sentence(text: &str) -> &str {
    let Some(last) = text.rfind('.') else {
        return text.trim();
    };
    let start = text[..last].rfind('.').map_or(0, |idx| idx + 1);
    text[start..last].trim()
}
