/// Fairy Tale example: builds a tiny fragment graph in code and tells a few
/// labeled stories from it.
///
/// A mini story: a hero leaves home → meets a dragon or gets lost → comes back or doesn't.
///
/// Run with: cargo run --example fairy_tale

use story_engine::core::lint::lint_fragments;
use story_engine::core::sample::{LabelStatistics, SampleGenerator};
use story_engine::schema::config::{RegionRecord, StoryConfig};
use story_engine::schema::fragment::Fragment;
use story_engine::StoryTeller;

fn main() {
    // --- Fragments: openings have no follows_on, endings lead nowhere ---
    let story_nodes = vec![
        Fragment::new(
            "Once upon a time #c:new:hero() lived in #t:new:home() with #c:new:friend().",
            &["start"],
            &[],
            &[],
        ),
        Fragment::new(
            "One day #c:old:hero() met a dragon #r:new:wild(places).",
            &["middle", "dragon"],
            &["start"],
            &[],
        ),
        Fragment::new(
            "One day #c:old:hero() got lost in the woods of #r:new:wild() while it kept on raining.",
            &["middle", "woods"],
            &["start"],
            &[],
        ),
        Fragment::new(
            "#c:old:hero() and #c:old:friend() flew home on the dragon and lived happily ever after.",
            &["end"],
            &["middle"],
            &["dragon"],
        ),
        Fragment::new(
            "Nobody ever heard of #c:old:hero() again, and #c:old:friend(g) heart broke.",
            &["end"],
            &["middle"],
            &[],
        ),
    ];

    let config = StoryConfig {
        char_names: ["Sam", "Alex", "Robin", "Charles", "Tess"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        regions: vec![RegionRecord {
            name: "the Misty Vale".to_string(),
            places: vec![
                "deep in the Misty Vale".to_string(),
                "on the edge of the Misty Vale".to_string(),
            ],
        }],
        story_nodes,
        town_names: None,
    };

    let mut teller = StoryTeller::builder()
        .seed(2026)
        .config(config)
        .town_count(8)
        .build()
        .expect("Failed to build story teller");

    // --- Sanity check the graph ---
    let report = lint_fragments(teller.graph().fragments(), &teller.fresh_resolver());
    println!("Lint: {} errors, {} warnings", report.errors.len(), report.warnings.len());
    println!("Towns: {}", teller.town_names().join(", "));
    println!();

    // --- A few stories with their labels ---
    for n in 1..=3 {
        let (story, label) = teller.tell_labeled_story().expect("graph has an opening");
        println!("=== Story {} ===", n);
        println!("{}", story.text);
        println!("\tThe End ~");
        println!(
            "category {} (base {}, variation {:+})\n",
            label.level, label.base_level, label.variation
        );
    }

    // --- Label distribution ---
    let stats = LabelStatistics::collect(&mut teller, 200);
    println!("{}", stats);

    // --- One sample as it would be written to disk ---
    let mut generator = SampleGenerator::new(teller);
    if let Some(sample) = generator.generate() {
        println!("{}", sample.html);
        println!("labeled by: {}", sample.labeled_by);
    }
}
