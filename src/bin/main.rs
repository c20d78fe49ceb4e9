use clap::{Parser, Subcommand, ValueEnum};
use crossterm::style::{Color, Stylize};
use sentiment_core::batch::read_rows;
use sentiment_core::logging::init_tracing;
use sentiment_core::persistence::save_snapshot;
use sentiment_core::{BatchReport, EngineConfig, EngineError, Label, LexiconSource, SentimentEngine};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "sentiment_engine", version, about = "Score feedback comments by sentiment")]
struct Args {
    /// Lexicon file (text, or a .bin snapshot). Overrides SENTIMENT_LEXICON_PATH.
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score comments, one per line, from a file or stdin.
    Analyze {
        input: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Print label counts after the rows.
        #[arg(long)]
        summary: bool,

        /// Also list the N most positive and most negative comments.
        #[arg(long, default_value_t = 0)]
        top: usize,

        /// Score rows on all cores.
        #[arg(long)]
        parallel: bool,
    },
    /// Compile a text lexicon into a binary snapshot.
    CompileLexicon { input: PathBuf, output: PathBuf },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> ExitCode {
    init_tracing("warn");
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            if e.downcast_ref::<EngineError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = EngineConfig::from_env();
    if let Some(path) = &args.lexicon {
        config = config.with_lexicon_path(path);
    }

    match args.command {
        Command::CompileLexicon { input, output } => {
            let lexicon = LexiconSource::from_path(input).load()?;
            save_snapshot(&lexicon, &output)?;
            println!(
                "Compiled {} words and {} idioms to '{}'",
                lexicon.len(),
                lexicon.idiom_count(),
                output.display()
            );
            Ok(())
        }
        Command::Analyze { input, format, summary, top, parallel } => {
            let engine = SentimentEngine::from_config(&config)?;
            let comments = read_comments(input.as_deref())?;
            let report = if parallel {
                engine.batch().analyze_batch_parallel(comments.iter().map(String::as_str))
            } else {
                engine.batch().analyze_batch(comments.iter().map(String::as_str))
            };

            let mut stdout = io::stdout().lock();
            match format {
                Format::Json => {
                    serde_json::to_writer_pretty(&mut stdout, &report)?;
                    writeln!(stdout)?;
                }
                Format::Table => {
                    let color = io::stdout().is_terminal();
                    print_rows(&mut stdout, &report, &comments, color)?;
                    if summary {
                        print_summary(&mut stdout, &report, color)?;
                    }
                    if top > 0 {
                        print_top(&mut stdout, &report, &comments, top)?;
                    }
                }
            }
            stdout.flush()?;
            Ok(())
        }
    }
}

fn read_comments(path: Option<&Path>) -> io::Result<Vec<String>> {
    match path {
        Some(path) => read_rows(BufReader::new(File::open(path)?)),
        None => read_rows(io::stdin().lock()),
    }
}

fn label_color(label: Label) -> Color {
    match label {
        Label::Positive => Color::Rgb { r: 0x16, g: 0xA3, b: 0x4A },
        Label::Neutral => Color::Rgb { r: 0xF5, g: 0x9E, b: 0x0B },
        Label::Negative => Color::Rgb { r: 0xEF, g: 0x44, b: 0x44 },
    }
}

fn paint(label: Label, color: bool) -> String {
    let padded = format!("{:<8}", label.as_str());
    if color {
        padded.with(label_color(label)).to_string()
    } else {
        padded
    }
}

fn print_rows(out: &mut impl Write, report: &BatchReport, comments: &[String], color: bool) -> io::Result<()> {
    writeln!(out, "{:>5}  {:<8}  {:>7}  Comment", "Row", "Label", "Score")?;
    for row in &report.rows {
        writeln!(
            out,
            "{:>5}  {}  {:>7.3}  {}",
            row.index,
            paint(row.label, color),
            row.score,
            comments[row.index]
        )?;
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, report: &BatchReport, color: bool) -> io::Result<()> {
    writeln!(out)?;
    for (label, count) in report.summary.iter() {
        writeln!(out, "{} {}", paint(label, color), count)?;
    }
    writeln!(out, "Total comments: {}", report.total())
}

fn print_top(out: &mut impl Write, report: &BatchReport, comments: &[String], n: usize) -> io::Result<()> {
    writeln!(out, "\nTop positive comments:")?;
    for row in report.top_positive(n) {
        writeln!(out, "  {:>7.3}  {}", row.score, comments[row.index])?;
    }
    writeln!(out, "\nTop negative comments:")?;
    for row in report.top_negative(n) {
        writeln!(out, "  {:>7.3}  {}", row.score, comments[row.index])?;
    }
    Ok(())
}
