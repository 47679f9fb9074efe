//! Ultimate Tic-Tac-Toe engine CLI
//!
//! Lets the engine play itself or analyze a position given as a move list.
//! Set `RUST_LOG=debug` to see every search decision.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use uttt::{AIEngine, Action, EngineConfig, SuperBoard, WinState, DEFAULT_SEARCH_DEPTH};

#[derive(Parser)]
#[command(name = "uttt")]
#[command(version, about = "Ultimate Tic-Tac-Toe minimax engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Let the engine play both sides
    SelfPlay(SelfPlayArgs),

    /// Replay a move list and report the engine's view of the position
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Plies searched per move
    #[arg(long, short = 'd', env = "UTTT_DEPTH", default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: usize,

    /// Worker threads for the root search
    #[arg(long, short = 't', env = "UTTT_THREADS", default_value_t = 1)]
    threads: usize,
}

impl EngineArgs {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            search_depth: self.depth,
            threads: self.threads,
        }
    }
}

#[derive(Args, Debug)]
struct SelfPlayArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Stop after this many engine moves
    #[arg(long, default_value_t = 81)]
    max_moves: usize,

    /// Opening moves to play before the engine takes over, e.g. "1,2,0,2 0,2,1,2"
    #[arg(long, default_value = "")]
    moves: String,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Moves leading to the position, e.g. "1,2,0,2 0,2,1,2"
    #[arg(long)]
    moves: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::SelfPlay(args) => self_play(args),
        Command::Analyze(args) => analyze(args),
    }
}

/// Parse whitespace-separated `r,c,r,c` moves
fn parse_moves(text: &str) -> Result<Vec<Action>> {
    text.split_whitespace()
        .map(|token| token.parse::<Action>().with_context(|| format!("bad move '{token}'")))
        .collect()
}

/// Build an engine whose state has the given moves applied
fn engine_with_moves(config: EngineConfig, moves: &[Action]) -> Result<AIEngine> {
    let mut engine = AIEngine::from_config(config);
    for (ply, &action) in moves.iter().enumerate() {
        engine
            .update_state(action)
            .with_context(|| format!("move {} of the move list", ply + 1))?;
    }
    Ok(engine)
}

fn self_play(args: SelfPlayArgs) -> Result<()> {
    let opening = parse_moves(&args.moves)?;
    let mut engine = engine_with_moves(args.engine.config(), &opening)?;
    info!(
        depth = args.engine.depth,
        threads = args.engine.threads,
        opening = opening.len(),
        "starting self-play"
    );

    let mut played = 0;
    while !engine.state().is_complete() && played < args.max_moves {
        let player = engine.state().current_player();
        let result = engine.get_move_with_stats()?;
        engine.update_state(result.action)?;
        played += 1;

        info!(
            ply = engine.state().move_count(),
            %player,
            action = %result.action,
            value = format_args!("{:+.3}", result.value),
            nodes = result.stats.nodes,
            time_ms = result.time_ms,
            "move"
        );
    }

    let state = engine.state();
    match state.winner().winner() {
        Some(winner) => info!(moves = state.move_count(), %winner, "game won"),
        None if state.is_complete() => info!(moves = state.move_count(), "game tied"),
        None => info!(moves = state.move_count(), "stopped before the game ended"),
    }
    println!("{}", describe_result(state));
    Ok(())
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let moves = parse_moves(&args.moves)?;
    let mut engine = engine_with_moves(args.engine.config(), &moves)?;
    let state = engine.state();

    println!("Moves played:   {}", state.move_count());
    println!("Status:         {}", describe_result(state));
    if state.is_complete() {
        return Ok(());
    }

    println!("To move:        {}", state.current_player());
    match state.next_required_sub_board() {
        Some((row, col)) => println!("Required board: ({row}, {col})"),
        None => println!("Required board: any"),
    }
    println!("Legal moves:    {}", state.legal_actions().len());
    println!("Static eval:    {:+.4}", engine.evaluate_state());

    let result = engine.get_move_with_stats()?;
    println!("Best move:      {}", result.action);
    println!("Search value:   {:+.4} (depth {})", result.value, result.depth);
    println!(
        "Nodes:          {} ({} leaves, {} cutoffs, {}ms)",
        result.stats.nodes, result.stats.leaf_evaluations, result.stats.beta_cutoffs, result.time_ms
    );
    Ok(())
}

fn describe_result(state: &SuperBoard) -> String {
    match state.winner() {
        WinState::PlayerOneWin => "Player One wins".to_string(),
        WinState::PlayerTwoWin => "Player Two wins".to_string(),
        WinState::Tie => "tie".to_string(),
        WinState::InProgress => "in progress".to_string(),
    }
}
