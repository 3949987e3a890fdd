//! Command line front end: convert a SALSA/TIGER release into document JSON lines
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use salsa_tiger::converter::{
  convert, ConversionConfig, DEFAULT_FRAMES_PATH, DEFAULT_MAPPING_PATH, DEFAULT_OUTPUT_PATH,
  DEFAULT_SALSA_PATH, DEFAULT_TIGER_PATH,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
  Trace,
  Debug,
  Info,
  Warn,
  Error,
}

/// Convert the SALSA frame layer and the TIGER treebank into one JSON line per document
#[derive(Parser, Debug)]
#[command(name = "salsa-tiger", version, about)]
struct Cli {
  /// SALSA release (frame layer)
  #[arg(long, default_value = DEFAULT_SALSA_PATH)]
  salsa: String,
  /// TIGER release (token stream)
  #[arg(long, default_value = DEFAULT_TIGER_PATH)]
  tiger: String,
  /// tab separated `doc_id, sentence_id` mapping
  #[arg(long, default_value = DEFAULT_MAPPING_PATH)]
  documents: String,
  /// output file, one JSON object per document
  #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
  output: String,
  /// also write every extracted frame, one per line
  #[arg(long, default_value = DEFAULT_FRAMES_PATH)]
  frames_out: String,
  /// skip writing the frame inventory
  #[arg(long)]
  no_frames_out: bool,
  /// also write the lemma to frame-name inventory
  #[arg(long)]
  lemmas_out: Option<String>,
  /// warn about sentences whose SALSA and TIGER tokens differ
  #[arg(long)]
  verify_tokens: bool,
  /// logging verbosity
  #[arg(long, value_enum, default_value = "info")]
  log_level: LogLevel,
}

impl From<Cli> for ConversionConfig {
  fn from(cli: Cli) -> ConversionConfig {
    ConversionConfig {
      salsa_path: cli.salsa,
      tiger_path: cli.tiger,
      mapping_path: cli.documents,
      output_path: cli.output,
      frames_path: if cli.no_frames_out { None } else { Some(cli.frames_out) },
      lemmas_path: cli.lemmas_out,
      verify_tokens: cli.verify_tokens,
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  let log_level = match cli.log_level {
    LogLevel::Trace => tracing::Level::TRACE,
    LogLevel::Debug => tracing::Level::DEBUG,
    LogLevel::Info => tracing::Level::INFO,
    LogLevel::Warn => tracing::Level::WARN,
    LogLevel::Error => tracing::Level::ERROR,
  };
  tracing_subscriber::fmt()
    .with_max_level(log_level)
    .with_writer(std::io::stderr)
    .init();

  let start = Instant::now();
  let config = ConversionConfig::from(cli);
  match convert(&config) {
    Ok(report) => {
      println!("---");
      println!("Conversion finished in {:?}ms, gathered: ", start.elapsed().as_millis());
      println!("{:?} documents;", report.documents);
      println!("{:?} sentences;", report.sentences);
      println!("{:?} frames;", report.frames);
      println!("{:?} approximated split references;", report.approximated_refs);
      if config.verify_tokens {
        println!("{:?} sentences with diverging tokens;", report.token_mismatches);
      }
      ExitCode::SUCCESS
    },
    Err(e) => {
      tracing::error!("{}", e);
      ExitCode::FAILURE
    },
  }
}
