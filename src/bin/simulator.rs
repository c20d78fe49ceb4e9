// Interactive explainer: type a comment, see how each word was scored.
// Run with: cargo run --bin sentiment_simulator
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use sentiment_core::logging::init_tracing;
use sentiment_core::{EngineConfig, Label, SentimentEngine};
use std::io::{self, stdin, stdout, Write};

fn main() -> io::Result<()> {
    init_tracing("warn");

    let engine = match SentimentEngine::from_config(&EngineConfig::from_env()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            std::process::exit(2);
        }
    };

    let mut last: Option<String> = None;
    loop {
        print_ui(&engine, last.as_deref())?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim_end_matches(|c: char| c == '\n' || c == '\r');
        match line.trim() {
            "exit" => break,
            _ => last = Some(line.to_string()),
        }
    }
    Ok(())
}

fn print_ui(engine: &SentimentEngine, text: Option<&str>) -> io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    writeln!(out, "Feedback Sentiment Simulator")?;
    writeln!(out, "---------------------------------------------------------------")?;
    writeln!(out, "Type a comment and press [Enter]. 'exit' to quit.\n")?;

    if let Some(text) = text {
        let result = engine.analyze(text);
        let polarity = engine.polarity_scores(text);

        writeln!(out, "Comment: {}", text)?;
        let label = match result.label {
            Label::Positive => result.label.as_str().green(),
            Label::Neutral => result.label.as_str().yellow(),
            Label::Negative => result.label.as_str().red(),
        };
        writeln!(out, "Label:   {} (score: {:.3})", label, result.score())?;
        writeln!(
            out,
            "Mix:     pos {:.3}  neu {:.3}  neg {:.3}",
            polarity.pos, polarity.neu, polarity.neg
        )?;

        writeln!(out, "\nWord contributions:")?;
        for part in engine.explain(text) {
            if part.valence != 0.0 {
                writeln!(out, "  {:<16} {:+.3}", part.token, part.valence)?;
            } else {
                writeln!(out, "  {:<16} {}", part.token, "-".dark_grey())?;
            }
        }
    }

    write!(out, "\n> ")?;
    out.flush()
}
