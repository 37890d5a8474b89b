//! Cliffwatch CLI
//!
//! Usage:
//!   cliffwatch --text "your answer here"                # Single evaluation
//!   cliffwatch --interactive                            # Survey session on stdin
//!   cliffwatch --survey survey.json --notes notes.json  # Constraint profile
//!   cliffwatch --survey survey.json --recommend "..."   # Complexity ceiling check
//!   cliffwatch --gap "Postgres vs Mongo" --gap "..."    # Researchable gaps
//!   cliffwatch --serve                                  # HTTP API server
//!   cliffwatch --text "text" --json                     # JSON output

use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use cliffwatch::core::{
    load_survey, load_surveyor_notes, run_server, CompoundAnalyzer, ComplexityGuard,
    ConstraintExtractor, ResearchGapFinder, SignalCatalog, SurveySession,
};
use cliffwatch::types::{ConstraintProfile, SurveyorNotes, TurnOutcome};
use cliffwatch::{SUPPRESSION_THRESHOLD, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "cliffwatch",
    version = VERSION,
    about = "Detect when a survey respondent has hit the limit of what they know",
    long_about = "Cliffwatch classifies free-text survey answers for knowledge-cliff\n\
                  signals and checks recommendations against project constraints.\n\n\
                  Tiers:\n  \
                  HIGH    - explicit admission (\"I don't know\", \"you decide\")\n  \
                  MEDIUM  - 2+ hedges, disfluencies or soft deferrals in the last turns\n\n\
                  Modes:\n  \
                  --text         Evaluate one answer\n  \
                  --interactive  Survey session with mode-switch offers\n  \
                  --survey       Extract constraints (add --recommend to check one)\n  \
                  --gap          Find gaps worth researching\n  \
                  --serve        HTTP API server mode"
)]
struct Args {
    /// Answer to evaluate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive survey session - read answers from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Survey JSON file for constraint extraction
    #[arg(long)]
    survey: Option<PathBuf>,

    /// Surveyor notes JSON file (implicit_constraints)
    #[arg(long, requires = "survey")]
    notes: Option<PathBuf>,

    /// Recommendation text to check against the extracted constraints
    #[arg(long, requires = "survey")]
    recommend: Option<String>,

    /// Diagnosis gap to evaluate for research (repeatable)
    #[arg(long = "gap")]
    gaps: Vec<String>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Custom signal catalog (JSON), used by --text and --interactive
    #[arg(long, conflicts_with_all = ["serve", "survey", "gaps"])]
    catalog: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show signal breakdown
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    // WARN by default, RUST_LOG=cliffwatch=debug for detection traces
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    if args.serve {
        run_serve(&args).await;
    } else if let Some(ref survey) = args.survey {
        run_constraints(survey, &args);
    } else if !args.gaps.is_empty() {
        run_research(&args);
    } else if args.interactive {
        run_interactive(&load_catalog(&args), &args);
    } else if let Some(ref text) = args.text {
        run_single(text, &load_catalog(&args), &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&load_catalog(&args), &args);
    }
}

/// Custom catalog from --catalog, or the built-in one
fn load_catalog(args: &Args) -> SignalCatalog {
    match &args.catalog {
        Some(path) => match SignalCatalog::from_json_file(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Catalog error: {}", e);
                std::process::exit(1);
            }
        },
        None => SignalCatalog::builtin().clone(),
    }
}

/// Run single answer evaluation
fn run_single(text: &str, catalog: &SignalCatalog, args: &Args) {
    let analyzer = CompoundAnalyzer::with_catalog(catalog);
    let result = analyzer.analyze(text, &[]);

    if args.json {
        print_json(&result, true);
        return;
    }

    let outcome = TurnOutcome { turn: 1, offer: result.fired(), suppressed: false, result };
    print_outcome(&outcome, args.no_color);
    if args.verbose {
        print_breakdown(text, &analyzer);
    }
}

/// Run interactive survey session
fn run_interactive(catalog: &SignalCatalog, args: &Args) {
    let analyzer = CompoundAnalyzer::with_catalog(catalog);
    let mut session = SurveySession::with_catalog(catalog);

    print_header("Survey Session", args.no_color);
    println!("Answer each question and press Enter. Type 'quit' to exit.");
    println!(
        "A mode switch is offered on a cliff; after {} declines offers stop.",
        SUPPRESSION_THRESHOLD
    );
    println!();

    loop {
        let Some(line) = prompt_line("> ") else { break };
        let line = line.trim();

        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!(
                "\nSession ended. Turns: {} | Declined offers: {}",
                session.history().len(),
                session.declined_offers()
            );
            break;
        }
        if line.is_empty() {
            continue;
        }

        let outcome = session.respond(line);

        if args.json {
            print_json(&outcome, false);
        } else {
            print_outcome(&outcome, args.no_color);
            if args.verbose {
                print_breakdown(line, &analyzer);
            }
        }

        if outcome.suppressed && !args.json {
            println!("{}", "  (offer suppressed after repeated declines)".dimmed());
        }

        if !outcome.offer {
            continue;
        }

        println!();
        println!("{}", "  It sounds like this is outside your expertise.".yellow().bold());
        let answer = prompt_line("  Hand the remaining questions to the engineer? [y/N] ");
        let accepted = answer
            .map(|a| a.trim().eq_ignore_ascii_case("y") || a.trim().eq_ignore_ascii_case("yes"))
            .unwrap_or(false);

        if accepted {
            session.accept();
            println!("{}", "  ✓ Switching to engineer mode".green());
            break;
        }

        session.decline();
        if session.is_suppressed() {
            println!("  Continuing. No further offers this session.");
        } else {
            println!("  Continuing the survey.");
        }
        println!();
    }

    if args.json {
        print_json(&session.status(), true);
    }
}

/// Run constraint extraction and optional complexity check
fn run_constraints(survey_path: &Path, args: &Args) {
    let survey = match load_survey(survey_path) {
        Ok(survey) => survey,
        Err(e) => {
            eprintln!("Survey error: {}", e);
            std::process::exit(1);
        }
    };

    let notes: Option<SurveyorNotes> = match &args.notes {
        Some(path) => match load_surveyor_notes(path) {
            Ok(notes) => Some(notes),
            Err(e) => {
                eprintln!("Notes error: {}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let profile = ConstraintExtractor::new().extract(&survey, notes.as_ref());
    let check = args
        .recommend
        .as_deref()
        .map(|text| ComplexityGuard::new().check(text, &profile));

    if args.json {
        #[derive(Serialize)]
        struct ConstraintOutput<'a> {
            constraints: &'a ConstraintProfile,
            #[serde(skip_serializing_if = "Option::is_none")]
            complexity: Option<&'a cliffwatch::types::ComplexityCheck>,
        }
        print_json(&ConstraintOutput { constraints: &profile, complexity: check.as_ref() }, true);
        return;
    }

    println!("{}", "Constraints".bold());
    println!("  team size:      {:?}", profile.team_size);
    println!("  budget:         {:?}", profile.budget);
    println!("  timeline:       {:?}", profile.timeline);
    println!("  experience:     {:?}", profile.experience);
    println!("  max complexity: {:?}", profile.max_complexity);

    if let Some(check) = check {
        println!();
        if check.valid {
            println!("{}", "✓ Recommendation fits the complexity ceiling".green());
        } else {
            println!("{}", "✗ Recommendation exceeds the complexity ceiling".red());
            for violation in &check.violations {
                println!("  - {}", violation.reason);
                println!("    {}", violation.suggestion.dimmed());
            }
        }
    }
}

/// Run research gap identification
fn run_research(args: &Args) {
    let gaps = ResearchGapFinder::new().identify(&args.gaps);

    if args.json {
        print_json(&gaps, true);
        return;
    }

    if gaps.is_empty() {
        println!("No researchable gaps.");
        return;
    }
    for gap in gaps {
        println!("[{:?}] {}", gap.priority, gap.gap.bold());
        println!("  query: {}", gap.search_query);
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    println!("{} v{} API on {}", "Cliffwatch".bold(), VERSION, args.addr);

    if let Err(e) = run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print prompt, read one line; None on EOF or read error
fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    let title = format!("Cliffwatch v{} - {}", VERSION, mode);
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", "════════════════════════════════════════".bold());
        println!("  {}", title.bold());
        println!("{}", "════════════════════════════════════════".bold());
    }
    println!();
}

fn print_outcome(outcome: &TurnOutcome, no_color: bool) {
    if no_color {
        println!("{}", outcome.to_parseable_string());
    } else {
        println!("{}", outcome.to_terminal_string());
    }
}

/// Print per-tier signal breakdown
fn print_breakdown(text: &str, analyzer: &CompoundAnalyzer<'_>) {
    let explicit = analyzer.explicit().detect(text);
    let implicit = analyzer.implicit().detect(text);

    println!("  ┌ explicit: {}", explicit.signal.as_deref().unwrap_or("-"));
    if implicit.signals.is_empty() {
        println!("  └ implicit: -");
        return;
    }
    let last = implicit.signals.len() - 1;
    for (i, signal) in implicit.signals.iter().enumerate() {
        let branch = if i == last { "└" } else { "├" };
        println!("  {} implicit: {:<24} {}", branch, signal.signal, signal.category.to_string().dimmed());
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("JSON error: {}", e),
    }
}

// =============================================================================
// TESTS
// =============================================================================
