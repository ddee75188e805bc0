//! CLI: compile dialogue networks from .dot files into topics.
//!
//! Every file may hold several `digraph` blocks; all of them form one system,
//! so recurrent arcs may call enter nodes defined in another file.
//!
//! Usage: `compile_dot [OPTIONS] <dot files>...`
//! Example: compile_dot --prefix BOT greeting.dot weather.dot
//!
//! Prints the compiled topics as JSON, or writes them to `--output`.
//!
//! Set RUST_LOG=topicweave=trace for TRACE-level span enter/exit and events.

use clap::Parser;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;
use topicweave::traversal::{EdgeLog, Traversal};
use topicweave::{Markers, compile, dot_parser};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Compile dialogue networks from .dot files into topics.
#[derive(Parser, Debug)]
#[command(name = "compile_dot")]
#[command(after_help = r#"Environment variables (override --prefix when set):
  TOPICWEAVE_MARKER_PREFIX   Prefix of the synthetic marker words (default: TW).

Examples:
  compile_dot greeting.dot
  compile_dot --markers markers.json --output topics.json greeting.dot sub.dot"#)]
struct Args {
  /// Prefix of the synthetic marker words. Overridden by TOPICWEAVE_MARKER_PREFIX if set.
  #[arg(long, value_name = "PREFIX", default_value = topicweave::markers::DEFAULT_PREFIX)]
  prefix: String,

  /// JSON file naming individual markers; unnamed ones use the default prefix.
  #[arg(long, value_name = "FILE")]
  markers: Option<PathBuf>,

  /// Write the JSON here instead of stdout.
  #[arg(long, short, value_name = "FILE")]
  output: Option<PathBuf>,

  /// Paths to the .dot files
  #[arg(value_name = "dot-files", required = true)]
  dot_paths: Vec<PathBuf>,
}

fn fail(message: String) -> ! {
  eprintln!("{message}");
  process::exit(1);
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  info!("compile_dot starting");
  let args = Args::parse();

  // Env var overrides the flag.
  let prefix = env::var("TOPICWEAVE_MARKER_PREFIX").unwrap_or_else(|_| args.prefix.clone());
  let markers = match &args.markers {
    Some(path) => {
      let text = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("Error reading {}: {}", path.display(), e)));
      serde_json::from_str::<Markers>(&text)
        .unwrap_or_else(|e| fail(format!("Error parsing markers {}: {}", path.display(), e)))
    }
    None => Markers::with_prefix(&prefix),
  };
  info!(?markers, "markers (file, env or flag)");

  let mut source = String::new();
  for path in &args.dot_paths {
    let dot = fs::read_to_string(path)
      .unwrap_or_else(|e| fail(format!("Error reading {}: {}", path.display(), e)));
    source.push_str(&dot);
    source.push('\n');
  }

  let system = dot_parser::parse_dot(&source).unwrap_or_else(|e| fail(format!("Error parsing DOT: {}", e)));

  let mut edges = EdgeLog::default();
  if Traversal::new().walk_system(&system, &mut [&mut edges]).is_ok() {
    let cycles: Vec<&str> = edges.back_edges().collect();
    info!(arcs = edges.edges.len(), ?cycles, "edge classes");
  }

  let compiled = compile(&system, &markers).unwrap_or_else(|e| fail(format!("Compile error: {}", e)));
  let json = serde_json::to_string_pretty(&compiled)
    .unwrap_or_else(|e| fail(format!("Error serializing topics: {}", e)));

  match &args.output {
    Some(path) => {
      fs::write(path, json).unwrap_or_else(|e| fail(format!("Error writing {}: {}", path.display(), e)));
      info!(path = %path.display(), topics = compiled.topic_count(), "topics written");
    }
    None => println!("{json}"),
  }
}
