use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use word_search_engine::{Generator, Grid};

/// Word search puzzle generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Grid size; the puzzle is size x size
    #[arg(short, long, default_value_t = 15)]
    size: usize,

    /// Seed for the random source, to regenerate a puzzle exactly
    #[arg(long)]
    seed: Option<u64>,

    /// Leave unused cells blank instead of filling them with random letters
    #[arg(long)]
    no_fill: bool,

    /// Words to place in the puzzle
    words: Vec<String>,
}

fn main() -> ExitCode {
    init_logger();

    let cli = Cli::parse();

    if cli.size == 0 {
        eprintln!("Error: grid size must be at least 1");
        return ExitCode::FAILURE;
    }

    let words = if cli.words.is_empty() {
        default_words()
    } else {
        cli.words
    };

    let grid = Grid::new(cli.size);
    let mut generator = match cli.seed {
        Some(seed) => Generator::with_seed(grid, seed),
        None => Generator::new(grid),
    };

    let mut rejected = 0;
    for word in &words {
        if let Err(error) = generator.add_word(word) {
            log::warn!("skipping {:?}: {}", word, error);
            rejected += 1;
        }
    }

    if !cli.no_fill {
        generator.fill_empty_spaces();
    }

    println!("{}", generator.grid());

    if rejected > 0 {
        eprintln!("{} of {} words could not be placed", rejected, words.len());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn default_words() -> Vec<String> {
    ["compass", "harbor", "island", "lagoon", "anchor", "sail", "tide", "reef"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Logs at warn level by default; `RUST_LOG` overrides.
fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, LevelFilter::Warn)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder.init();
}
