/// Story Preview: interactive shell for reading generated stories and their labels.
///
/// Usage: story_preview [--config <path>] [--seed <n>] [--max-fragments <n>] [--once] [--stats <n>] [-v]
///
/// Commands:
///   story          tell the next story and show its label
///   seed <n>       restart the sequence from seed n
///   stats <n>      label n stories and print the histograms
///   lint           check the loaded fragments
///   help           list commands
///   quit           exit

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use story_engine::core::lint::lint_fragments;
use story_engine::core::sample::LabelStatistics;
use story_engine::{telemetry, Categorization, ConfigError, StoryTeller};

struct Options {
    config_path: Option<String>,
    seed: u64,
    max_fragments: Option<usize>,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let mut options = Options {
        config_path: None,
        seed: 42,
        max_fragments: None,
    };
    let mut once = false;
    let mut stats_size = None;
    let mut verbosity = 0u8;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                options.config_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                options.seed = parse_or_exit("--seed", &args[i]);
            }
            "--max-fragments" if i + 1 < args.len() => {
                i += 1;
                options.max_fragments = Some(parse_or_exit("--max-fragments", &args[i]));
            }
            "--once" => once = true,
            "--stats" if i + 1 < args.len() => {
                i += 1;
                stats_size = Some(parse_or_exit::<usize>("--stats", &args[i]));
            }
            "-v" => verbosity += 1,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    telemetry::init(verbosity);

    let mut teller = match build_teller(&options, options.seed) {
        Ok(teller) => teller,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(size) = stats_size {
        println!("{}", LabelStatistics::collect(&mut teller, size));
        return;
    }
    if once {
        tell(&mut teller);
        return;
    }

    println!("Loaded {} fragments", teller.graph().len());
    println!("Seed: {}", options.seed);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("story> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "story" | "s" => tell(&mut teller),
            "seed" => {
                let Some(seed) = parts.get(1).and_then(|s| s.parse::<u64>().ok()) else {
                    println!("Usage: seed <n>");
                    continue;
                };
                match build_teller(&options, seed) {
                    Ok(rebuilt) => {
                        teller = rebuilt;
                        println!("Seed set to {}", seed);
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "stats" => {
                let size = parts.get(1).and_then(|s| s.parse::<usize>().ok()).unwrap_or(100);
                let stats = LabelStatistics::collect(&mut teller, size);
                println!("\n{}", stats);
            }
            "lint" => {
                let report = lint_fragments(teller.graph().fragments(), &teller.fresh_resolver());
                if report.is_clean() {
                    println!("All checks passed!");
                }
                for warning in &report.warnings {
                    println!("WARNING: {}", warning);
                }
                for error in &report.errors {
                    println!("ERROR: {}", error);
                }
            }
            _ => println!("Unknown command '{}'. Type 'help' for commands.", cmd),
        }
    }
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid value '{}' for {}", value, flag))
}

fn parse_or_exit<T: FromStr>(flag: &str, value: &str) -> T {
    match parse_value(flag, value) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn build_teller(options: &Options, seed: u64) -> Result<StoryTeller, ConfigError> {
    let mut builder = StoryTeller::builder().seed(seed);
    if let Some(path) = &options.config_path {
        builder = builder.config_path(path);
    }
    if let Some(max) = options.max_fragments {
        builder = builder.max_fragments(max);
    }
    builder.build()
}

fn tell(teller: &mut StoryTeller) {
    match teller.tell_labeled_story() {
        Some((story, label)) => {
            println!();
            println!("{}", story.text);
            println!();
            println!("\tThe End ~");
            println!();
            if story.truncated {
                println!("(stopped at the fragment limit)");
            }
            print_label(&label);
        }
        None => println!("No story could be told: no opening fragment."),
    }
}

fn print_label(label: &Categorization) {
    println!("category: {}", label.level);
    println!(
        "  base {} | positive {} | negative {} | variation {:+}",
        label.base_level, label.pos_influence, label.neg_influence, label.variation
    );
    let reasons = &label.reasons;
    let groups = [
        ("good ending", &reasons.good_ending),
        ("bad ending", &reasons.bad_ending),
        ("positive", &reasons.positive),
        ("very positive", &reasons.very_positive),
        ("negative", &reasons.negative),
        ("very negative", &reasons.very_negative),
    ];
    for (name, words) in groups {
        if !words.is_empty() {
            println!("  {}: {}", name, words.join(", "));
        }
    }
    println!();
}

fn print_usage() {
    println!("Story Preview: interactive shell for generated stories and their labels.");
    println!();
    println!("Usage: story_preview [--config <path>] [--seed <n>] [--max-fragments <n>] [--once] [--stats <n>] [-v]");
    println!();
    println!("  --config <path>        Story configuration (default: bundled stories)");
    println!("  --seed <n>             Initial RNG seed (default: 42)");
    println!("  --max-fragments <n>    Fragment limit per story (default: 200)");
    println!("  --once                 Tell a single story and exit");
    println!("  --stats <n>            Print label histograms over n stories and exit");
    println!("  -v                     More log output (repeatable)");
}

fn print_help() {
    println!("Commands:");
    println!("  story        Tell the next story and show its label");
    println!("  seed <n>     Restart the sequence from seed n");
    println!("  stats <n>    Label n stories and print the histograms (default: 100)");
    println!("  lint         Check the loaded fragments");
    println!("  help         Show this help");
    println!("  quit         Exit");
}
