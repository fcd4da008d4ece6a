/// Synthetic training samples: generated stories wrapped as documents and
/// labeled automatically, plus label statistics over many of them.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::labeler::{Categorization, MAX_LEVEL};
use crate::core::teller::{Story, StoryTeller};

/// Provenance recorded for labels assigned by the labeler.
pub const LABELED_BY_AUTOMATED: &str = "automated";

/// One generated, labeled document.
#[derive(Debug, Clone)]
pub struct Sample {
    pub story: Story,
    /// The story as an HTML document.
    pub html: String,
    pub label: Categorization,
    pub labeled_by: String,
}

/// Wrap story text into the HTML document shape the raw samples use.
pub fn to_html(text: &str) -> String {
    format!(
        "<html><head><title>A story</title><body><p class=\"text\">{}</p><p class=\"end\">The End ~</p></body></head></html>",
        escape_html(text)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Produces labeled samples from a story teller.
#[derive(Debug)]
pub struct SampleGenerator {
    teller: StoryTeller,
}

impl SampleGenerator {
    pub fn new(teller: StoryTeller) -> Self {
        Self { teller }
    }

    /// Generate one sample, or `None` if no story could be told.
    pub fn generate(&mut self) -> Option<Sample> {
        let (story, label) = self.teller.tell_labeled_story()?;
        Some(Sample {
            html: to_html(&story.text),
            story,
            label,
            labeled_by: LABELED_BY_AUTOMATED.to_string(),
        })
    }

    /// Generate up to `count` samples; stops early if no story can be told.
    pub fn generate_many(&mut self, count: usize) -> Vec<Sample> {
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            match self.generate() {
                Some(sample) => samples.push(sample),
                None => break,
            }
        }
        samples
    }
}

/// Histogram of categories and variations over many labeled stories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStatistics {
    pub total: usize,
    /// Count per category `0..=5`.
    pub levels: [usize; MAX_LEVEL as usize + 1],
    /// Count per variation `-2..=2`, index 0 being -2.
    pub variations: [usize; 5],
}

impl LabelStatistics {
    /// Tell and label `size` stories and tally the results.
    pub fn collect(teller: &mut StoryTeller, size: usize) -> Self {
        let mut stats = Self::default();
        for _ in 0..size {
            match teller.tell_labeled_story() {
                Some((_, label)) => stats.record(&label),
                None => break,
            }
        }
        stats
    }

    pub fn record(&mut self, label: &Categorization) {
        self.total += 1;
        self.levels[usize::from(label.level.min(MAX_LEVEL))] += 1;
        let idx = (label.variation.clamp(-2, 2) + 2) as usize;
        self.variations[idx] += 1;
    }

    /// Rounded percentage of stories in `count`.
    fn percent(&self, count: usize) -> usize {
        if self.total == 0 {
            return 0;
        }
        (100.0 * count as f64 / self.total as f64).round() as usize
    }
}

impl fmt::Display for LabelStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "levels:")?;
        for (level, count) in self.levels.iter().enumerate() {
            writeln!(f, "{}: {}\t{}%", level, count, self.percent(*count))?;
        }
        writeln!(f)?;
        writeln!(f, "variations:")?;
        for (idx, count) in self.variations.iter().enumerate() {
            writeln!(f, "{}: {}\t{}%", idx as i32 - 2, count, self.percent(*count))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::labeler::Reasons;

    fn label(level: u8, variation: i32) -> Categorization {
        Categorization {
            level,
            base_level: 2,
            pos_influence: 0,
            neg_influence: 0,
            variation,
            reasons: Reasons::default(),
        }
    }

    #[test]
    fn html_wraps_and_escapes() {
        let html = to_html("Sam & Alex <3");
        assert!(html.starts_with("<html><head><title>A story</title>"));
        assert!(html.contains("<p class=\"text\">Sam &amp; Alex &lt;3</p>"));
        assert!(html.ends_with("<p class=\"end\">The End ~</p></body></head></html>"));
    }

    #[test]
    fn statistics_tally() {
        let mut stats = LabelStatistics::default();
        stats.record(&label(0, -2));
        stats.record(&label(3, 1));
        stats.record(&label(3, 0));
        stats.record(&label(5, 2));
        assert_eq!(stats.total, 4);
        assert_eq!(stats.levels, [1, 0, 0, 2, 0, 1]);
        assert_eq!(stats.variations, [1, 0, 1, 1, 1]);

        let rendered = stats.to_string();
        assert!(rendered.contains("3: 2\t50%"));
        assert!(rendered.contains("-2: 1\t25%"));
    }

    #[test]
    fn empty_statistics_render() {
        let stats = LabelStatistics::default();
        assert!(stats.to_string().contains("0: 0\t0%"));
    }
}
