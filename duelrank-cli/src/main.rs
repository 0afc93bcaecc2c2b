mod config;
mod output;
mod storage;

use clap::Parser;
use duelrank_core::{DuelSession, LoadOutcome, Winner};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::storage::FileStorage;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "duelrank", version, about = "Rank items through pairwise A/B duels")]
struct Cli {
    /// Path to config file (default: ~/.config/duelrank/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the state file (default: ~/.local/share/duelrank/state.json)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run an interactive duel loop
    Duel(SelectionArgs),
    /// Print the rankings for one (segment, context) bucket
    Top(TopArgs),
    /// Export the vote ledger as CSV
    Export(ExportArgs),
    /// Discard all ratings and votes
    Reset(ResetArgs),
    /// Create a default config file at ~/.config/duelrank/config.toml
    Init,
}

#[derive(Parser)]
struct SelectionArgs {
    /// Segment id to start with (default: first segment in the config)
    #[arg(long)]
    segment: Option<String>,

    /// Context id to start with (default: first context in the config)
    #[arg(long)]
    context: Option<String>,
}

#[derive(Parser)]
struct TopArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Number of rows to show
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ExportArgs {
    /// Output path for the CSV file
    #[arg(long, default_value = "duelrank_votes.csv")]
    out: PathBuf,
}

#[derive(Parser)]
struct ResetArgs {
    /// Skip the confirmation
    #[arg(long)]
    yes: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if matches!(cli.command, Commands::Init) {
        let path = config::create_default_config();
        println!("Created config at {}", path.display());
        println!("Edit it to set your own catalog, segments, and contexts.");
        return;
    }

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let profile = config::load_profile(&config_path);

    let state_path = cli.state.clone().unwrap_or_else(storage::default_state_path);
    let (mut session, outcome) = DuelSession::open(profile, FileStorage::new(state_path));

    if outcome == LoadOutcome::Recovered {
        eprintln!("Warning: saved state could not be read and was discarded.");
    }

    match cli.command {
        Commands::Duel(args) => run_duel(&mut session, args),
        Commands::Top(args) => run_top(&mut session, args),
        Commands::Export(args) => run_export(&session, args),
        Commands::Reset(args) => run_reset(&mut session, args),
        Commands::Init => unreachable!("handled before state loading"),
    }
}

/// Apply --segment/--context flags after validating them against the
/// profile, so unknown ids bail instead of panicking in the core.
fn apply_selection(session: &mut DuelSession<FileStorage>, args: &SelectionArgs) {
    if let Some(ref seg) = args.segment {
        if session.profile().segment_label(seg).is_none() {
            bail(format!("Unknown segment \"{seg}\". Known: {}", known_segments(session)));
        }
        session.select_segment(seg);
    }
    if let Some(ref ctx) = args.context {
        if session.profile().context_label(ctx).is_none() {
            bail(format!("Unknown context \"{ctx}\". Known: {}", known_contexts(session)));
        }
        session.select_context(ctx);
    }
}

fn known_segments(session: &DuelSession<FileStorage>) -> String {
    let ids: Vec<&str> = session.profile().segments.iter().map(|s| s.id.as_str()).collect();
    ids.join(", ")
}

fn known_contexts(session: &DuelSession<FileStorage>) -> String {
    let ids: Vec<&str> = session.profile().contexts.iter().map(|c| c.id.as_str()).collect();
    ids.join(", ")
}

fn print_duel(session: &DuelSession<FileStorage>) {
    let (a, b) = session.current_pair().expect("duel loop always holds a pair");
    println!();
    println!("[{}] {}", session.active_segment(), session.question());
    println!("  1) {a}");
    println!("  2) {b}");
}

fn print_top(session: &DuelSession<FileStorage>) {
    let seg_label = session
        .profile()
        .segment_label(session.active_segment())
        .expect("active segment is validated");
    output::print_table(&session.top(session.profile().top_n), seg_label, session.question());
}

fn run_duel(session: &mut DuelSession<FileStorage>, args: SelectionArgs) {
    apply_selection(session, &args);

    let mut rng = rand::rng();
    println!("Commands: 1/2 vote, n new pair, t top rankings, s <id> segment, c <id> context, q quit");
    session.new_duel(&mut rng);
    print_duel(session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush().ok();

        let Some(line) = lines.next() else { break };
        let line = line.unwrap_or_else(|e| bail(format!("Failed to read stdin: {e}")));

        match line.trim() {
            "1" | "2" => {
                let winner = if line.trim() == "1" { Winner::A } else { Winner::B };
                if let Err(e) = session.submit_vote(winner, &mut rng) {
                    bail(e);
                }
                print_top(session);
                print_duel(session);
            }
            "n" => {
                session.new_duel(&mut rng);
                print_duel(session);
            }
            "t" => print_top(session),
            "q" | "quit" => break,
            "" => {}
            other => {
                if let Some(id) = other.strip_prefix("s ") {
                    switch_segment(session, id.trim());
                } else if let Some(id) = other.strip_prefix("c ") {
                    switch_context(session, id.trim());
                } else {
                    println!("Unrecognized command: {other}");
                }
            }
        }
    }

    println!("{} votes recorded.", session.vote_count());
}

fn switch_segment(session: &mut DuelSession<FileStorage>, id: &str) {
    if session.profile().segment_label(id).is_none() {
        println!("Unknown segment \"{id}\". Known: {}", known_segments(session));
        return;
    }
    session.select_segment(id);
    print_duel(session);
}

fn switch_context(session: &mut DuelSession<FileStorage>, id: &str) {
    if session.profile().context_label(id).is_none() {
        println!("Unknown context \"{id}\". Known: {}", known_contexts(session));
        return;
    }
    session.select_context(id);
    print_duel(session);
}

fn run_top(session: &mut DuelSession<FileStorage>, args: TopArgs) {
    apply_selection(session, &args.selection);
    let n = args.top_n.unwrap_or(session.profile().top_n);

    if args.json {
        output::print_json(
            &session.top(n),
            session.active_segment(),
            session.active_context(),
            session.vote_count(),
        );
    } else {
        let seg_label = session
            .profile()
            .segment_label(session.active_segment())
            .expect("active segment is validated");
        output::print_table(&session.top(n), seg_label, session.question());
    }
}

fn run_export(session: &DuelSession<FileStorage>, args: ExportArgs) {
    match session.export_csv() {
        Some(csv) => {
            std::fs::write(&args.out, csv)
                .unwrap_or_else(|e| bail(format!("Failed to write {}: {e}", args.out.display())));
            println!("Exported {} votes to {}", session.vote_count(), args.out.display());
        }
        None => println!("No votes to export yet."),
    }
}

fn run_reset(session: &mut DuelSession<FileStorage>, args: ResetArgs) {
    if !args.yes {
        bail("This discards all saved rankings and votes. Re-run with --yes to confirm.");
    }
    if let Err(e) = session.reset() {
        bail(e);
    }
    println!(
        "State reset: all ratings back to {:.0}, vote ledger cleared.",
        session.profile().initial_rating
    );
}
