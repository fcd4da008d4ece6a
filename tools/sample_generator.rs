/// Sample Generator: writes generated, automatically labeled stories to disk.
///
/// Usage: sample_generator --out <dir> [--count <n>] [--config <path>] [--seed <n>] [-v]
///
/// Layout of <dir>:
///   raw/sample_0001.html        the story as an HTML document
///   labeled/sample_0001.ron     the category with its breakdown
///   index.tsv                   one line per sample: name, category, labeled by

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use ron::ser::PrettyConfig;
use story_engine::core::sample::{Sample, SampleGenerator};
use story_engine::{telemetry, StoryTeller};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        process::exit(0);
    }

    let mut out_dir = None;
    let mut count: usize = 10;
    let mut config_path = None;
    let mut seed: u64 = 42;
    let mut verbosity = 0u8;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" if i + 1 < args.len() => {
                i += 1;
                out_dir = Some(PathBuf::from(&args[i]));
            }
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = parse_or_exit("--count", &args[i]);
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = parse_or_exit("--seed", &args[i]);
            }
            "-v" => verbosity += 1,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    telemetry::init(verbosity);

    let Some(out_dir) = out_dir else {
        eprintln!("ERROR: --out <dir> is required");
        process::exit(1);
    };

    let mut builder = StoryTeller::builder().seed(seed);
    if let Some(path) = &config_path {
        builder = builder.config_path(path);
    }
    let teller = match builder.build() {
        Ok(teller) => teller,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let mut generator = SampleGenerator::new(teller);
    let samples = generator.generate_many(count);
    if samples.len() < count {
        eprintln!(
            "WARNING: only {} of {} samples generated (no opening fragment?)",
            samples.len(),
            count
        );
    }

    match write_samples(&out_dir, &samples) {
        Ok(()) => println!("Wrote {} samples to {}", samples.len(), out_dir.display()),
        Err(e) => {
            eprintln!("ERROR: Failed to write samples: {}", e);
            process::exit(1);
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
            process::exit(1);
        }
    }
}

fn write_samples(out_dir: &Path, samples: &[Sample]) -> std::io::Result<()> {
    let raw_dir = out_dir.join("raw");
    let labeled_dir = out_dir.join("labeled");
    fs::create_dir_all(&raw_dir)?;
    fs::create_dir_all(&labeled_dir)?;

    let mut index = fs::File::create(out_dir.join("index.tsv"))?;
    writeln!(index, "sample\tcategory\tlabeled by")?;

    for (n, sample) in samples.iter().enumerate() {
        let name = format!("sample_{:04}", n + 1);
        fs::write(raw_dir.join(format!("{}.html", name)), &sample.html)?;

        let label = ron::ser::to_string_pretty(&sample.label, PrettyConfig::default())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(labeled_dir.join(format!("{}.ron", name)), label)?;

        writeln!(index, "{}\t{}\t{}", name, sample.label.level, sample.labeled_by)?;
    }
    Ok(())
}

fn print_usage() {
    println!("Sample Generator: writes generated, automatically labeled stories to disk.");
    println!();
    println!("Usage: sample_generator --out <dir> [--count <n>] [--config <path>] [--seed <n>] [-v]");
    println!();
    println!("  --out <dir>       Output directory (created if missing)");
    println!("  --count <n>       Number of samples (default: 10)");
    println!("  --config <path>   Story configuration (default: bundled stories)");
    println!("  --seed <n>        RNG seed (default: 42)");
    println!("  -v                More log output (repeatable)");
}
