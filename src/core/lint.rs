/// Static checks over a fragment set: reachability, loops and placeholders
/// that would never resolve.
use rustc_hash::FxHashSet;

use crate::core::placeholder::scan;
use crate::core::resolver::PlaceholderResolver;
use crate::schema::fragment::Fragment;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Lint `fragments` against the categories and usage types `resolver` knows.
pub fn lint_fragments(fragments: &[Fragment], resolver: &PlaceholderResolver) -> LintReport {
    let mut report = LintReport::default();

    if !fragments.iter().any(Fragment::is_initial) {
        report
            .errors
            .push("No opening fragment (one without follows_on); no story can be told".to_string());
    }

    let produced: FxHashSet<&str> = fragments
        .iter()
        .flat_map(|f| f.tags.iter().map(String::as_str))
        .collect();

    for (idx, fragment) in fragments.iter().enumerate() {
        let label = describe(idx, fragment);

        for tag in sorted(&fragment.follows_on) {
            if !produced.contains(tag) {
                report.warnings.push(format!(
                    "{} follows on tag '{}' which no fragment carries; it is unreachable",
                    label, tag
                ));
            }
        }
        for tag in sorted(&fragment.lineage_of) {
            if !produced.contains(tag) {
                report.warnings.push(format!(
                    "{} requires lineage tag '{}' which no fragment carries; it is unreachable",
                    label, tag
                ));
            }
        }

        if !fragment.is_initial()
            && fragment.follows_on.is_subset(&fragment.tags)
            && fragment.lineage_of.iter().all(|t| produced.contains(t.as_str()))
        {
            report.warnings.push(format!(
                "{} can follow itself; stories may repeat it until the fragment limit",
                label
            ));
        }

        for placeholder in scan(&fragment.text) {
            if resolver.category(&placeholder.category).is_none() {
                report.errors.push(format!(
                    "{} uses unknown placeholder category '{}'",
                    label, placeholder.category
                ));
            } else if !resolver.knows(&placeholder.category, &placeholder.usage) {
                report.errors.push(format!(
                    "{} uses unknown usage type '{}' for category '{}'",
                    label, placeholder.usage, placeholder.category
                ));
            }
        }
    }

    report
}

fn describe(idx: usize, fragment: &Fragment) -> String {
    let preview: String = fragment.text.chars().take(32).collect();
    format!("Fragment #{} (\"{}\")", idx, preview)
}

fn sorted(tags: &FxHashSet<String>) -> Vec<&str> {
    let mut tags: Vec<&str> = tags.iter().map(String::as_str).collect();
    tags.sort_unstable();
    tags
}
