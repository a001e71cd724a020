//! Interactive tool for summarizing slide decks and asking about individual slides.

mod commands;
mod controller;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{help_text, parse_command, Command};
use controller::{extract_deck, Controller};
use deck_core::render::{render_slide_texts, render_summaries};
use deck_core::{Notice, Summary, SummaryModel, UploadedDocument};
use deck_summarizer::config::DEFAULT_ENDPOINT;
use deck_summarizer::{GenerationParams, InferenceApiBackend, Summarizer, SummarizerConfig};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shown while a deck is being extracted and summarized.
const PROCESSING_MESSAGE: &str = "업로드한 파일을 처리 중입니다...";

/// Summarize every slide of a PowerPoint deck and ask about individual slides.
#[derive(Parser, Debug)]
#[command(name = "deck-chat")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Slide deck (.pptx) to upload at start-up
    input: Option<PathBuf>,

    /// Summarization model (distilbart-cnn-12-6 or facebook/bart-large-cnn)
    #[arg(short, long, default_value = "distilbart-cnn-12-6")]
    model: String,

    /// Maximum summary length in tokens
    #[arg(long, default_value_t = 150)]
    max_length: u32,

    /// Minimum summary length in tokens
    #[arg(long, default_value_t = 40)]
    min_length: u32,

    /// Base URL of the hosted inference API
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// API token for the inference endpoint
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the summaries of INPUT and exit instead of starting a session
    #[arg(short, long, requires = "input")]
    print: bool,

    /// Write the printed output to this file instead of stdout
    #[arg(short, long, requires = "print")]
    output: Option<PathBuf>,

    /// Print the extracted slide text instead of summaries (no model calls)
    #[arg(long, requires = "print")]
    extract_only: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if args.print {
        run_once(&args)
    } else {
        run_interactive(&args)
    }
}

/// Build the summarizer described by the command line.
fn build_summarizer(args: &Args) -> Result<Summarizer> {
    anyhow::ensure!(
        args.min_length <= args.max_length,
        "--min-length ({}) must not exceed --max-length ({})",
        args.min_length,
        args.max_length
    );

    let params = GenerationParams {
        max_length: args.max_length,
        min_length: args.min_length,
        ..GenerationParams::default()
    };
    let config = SummarizerConfig::default()
        .with_endpoint(args.endpoint.clone())
        .with_token(args.token.clone())
        .with_timeout(args.timeout_secs.map(Duration::from_secs));

    let backend = InferenceApiBackend::new(config)?;
    Ok(Summarizer::new(Box::new(backend)).with_params(params))
}

/// Read a deck from disk.
fn load_document(path: &Path) -> Result<UploadedDocument> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    Ok(UploadedDocument::new(filename, bytes))
}

/// One-shot mode: process INPUT, print or write the result, exit.
fn run_once(args: &Args) -> Result<()> {
    let input = args
        .input
        .as_deref()
        .context("An input file is required with --print")?;
    let document = load_document(input)?;

    let deck = extract_deck(&document)
        .with_context(|| format!("Failed to extract {}", input.display()))?;
    log::info!("Extracted {} slides", deck.slides.len());

    let output = if args.extract_only {
        render_slide_texts(&deck)
    } else {
        let mut summarizer = build_summarizer(args)?;
        eprintln!("{}", PROCESSING_MESSAGE);
        let summaries = summarizer
            .summarize_named(&deck.slide_texts(), &args.model)
            .with_context(|| format!("Failed to summarize {}", input.display()))?;
        render_summaries(&Summary::from_texts(summaries))
    };

    match &args.output {
        Some(path) => {
            write_output(path, &output)?;
            if args.verbose {
                eprintln!("Written to: {}", path.display());
            }
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Write output to a file, creating its directory if needed.
fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

/// Interactive mode: a read-eval-render loop over one session.
fn run_interactive(args: &Args) -> Result<()> {
    let model: SummaryModel = args.model.parse()?;
    let mut controller = Controller::new(build_summarizer(args)?, model);
    let mut rl = DefaultEditor::new()?;

    println!("PPT 요약기 - model: {} (type /help for commands)", model);

    if let Some(path) = &args.input {
        upload(&mut controller, path);
        print_frame(&controller, None);
    }

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        rl.add_history_entry(trimmed)?;

        let command = match parse_command(trimmed) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let notice = match command {
            Command::Exit => break,
            Command::Help => {
                println!("{}", help_text());
                continue;
            }
            Command::ListModels => {
                for model in SummaryModel::ALL {
                    let marker = if model == controller.session().model() { "*" } else { " " };
                    println!("{} {}", marker, model);
                }
                continue;
            }
            Command::Upload(path) => {
                upload(&mut controller, &path);
                None
            }
            Command::SelectModel(model) => {
                controller.select_model(model);
                println!("Selected {}. Run /update to re-summarize.", model);
                continue;
            }
            Command::Update => {
                if controller.session().document().is_some() {
                    eprintln!("{}", PROCESSING_MESSAGE);
                }
                controller.update_settings().unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    None
                })
            }
            Command::Reset => {
                controller.reset();
                None
            }
            Command::Chat(query) => controller.chat(&query),
        };

        print_frame(&controller, notice.as_ref());
    }

    Ok(())
}

/// Load and process a deck, reporting failures without ending the session.
fn upload(controller: &mut Controller, path: &Path) {
    let document = match load_document(path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return;
        }
    };

    eprintln!("{}", PROCESSING_MESSAGE);
    match controller.upload(document) {
        Ok(count) => log::info!("Summarized {} slides from {}", count, path.display()),
        Err(e) => eprintln!("Error processing {}: {}", path.display(), e),
    }
}

fn print_frame(controller: &Controller, notice: Option<&Notice>) {
    let frame = controller.render(notice);
    if !frame.is_empty() {
        println!("\n{}\n", frame);
    }
}
