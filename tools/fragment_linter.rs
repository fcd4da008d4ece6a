/// Fragment Linter: checks a story configuration for dead ends, loops and
/// placeholders that can never resolve.
///
/// Usage: fragment_linter [<stories.ron>] [-v]
///
/// Without a path the bundled story data is checked.

use std::path::Path;
use std::process;

use story_engine::core::lint::lint_fragments;
use story_engine::schema::config::StoryConfig;
use story_engine::{telemetry, StoryTeller};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("Usage: fragment_linter [<stories.ron>] [-v]");
        process::exit(0);
    }

    let mut path = None;
    let mut verbosity = 0u8;
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" => verbosity += 1,
            "-vv" => verbosity += 2,
            other => path = Some(other.to_string()),
        }
    }
    telemetry::init(verbosity);

    let loaded = match &path {
        Some(p) => StoryConfig::load_from_ron(Path::new(p)),
        None => StoryConfig::bundled(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: Failed to load story configuration: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded {} fragments, {} character names, {} regions",
        config.story_nodes.len(),
        config.char_names.len(),
        config.regions.len()
    );

    let teller = match StoryTeller::builder().config(config).build() {
        Ok(teller) => teller,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let report = lint_fragments(teller.graph().fragments(), &teller.fresh_resolver());

    println!("\n=== Fragment Lint Report ===\n");

    if report.is_clean() {
        println!("All checks passed!");
    }

    for warning in &report.warnings {
        println!("WARNING: {}", warning);
    }

    for error in &report.errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );

    if report.errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}
