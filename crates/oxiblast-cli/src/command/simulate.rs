use std::io::{self, Write as _};

use anyhow::Context as _;
use oxiblast_engine::{Board, GameSession};
use rand::{Rng as _, SeedableRng as _, rngs::StdRng, seq::IndexedRandom as _};

/// Safety cap on the length of a single rollout.
const MAX_PLACEMENTS: usize = 10_000;

const PROGRESS_INTERVAL: usize = 100;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Seed for shape draws and the placement policy (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Emit the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone)]
struct GameResult {
    score: usize,
    placements: usize,
    cleared_lines: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
struct Summary {
    games: usize,
    mean_score: f64,
    min_score: usize,
    max_score: usize,
    mean_placements: f64,
    mean_cleared_lines: f64,
}

impl Summary {
    #[expect(clippy::cast_precision_loss)]
    fn from_games(games: &[GameResult]) -> Self {
        let n = games.len();
        let mean = |total: usize| {
            if n == 0 { 0.0 } else { total as f64 / n as f64 }
        };
        Self {
            games: n,
            mean_score: mean(games.iter().map(|g| g.score).sum()),
            min_score: games.iter().map(|g| g.score).min().unwrap_or(0),
            max_score: games.iter().map(|g| g.score).max().unwrap_or(0),
            mean_placements: mean(games.iter().map(|g| g.placements).sum()),
            mean_cleared_lines: mean(games.iter().map(|g| g.cleared_lines).sum()),
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let mut rng = match arg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut games = Vec::with_capacity(arg.games);
    for i in 0..arg.games {
        games.push(play_one(&mut rng)?);
        if (i + 1) % PROGRESS_INTERVAL == 0 {
            eprintln!("Played {} / {} games", i + 1, arg.games);
        }
    }

    let summary = Summary::from_games(&games);
    if arg.json {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &summary)
            .context("failed to write JSON summary")?;
        writeln!(stdout).context("failed to write JSON summary")?;
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Plays a single game to completion with a uniform random legal-move
/// policy, drawing the session seed from `rng`.
fn play_one(rng: &mut StdRng) -> anyhow::Result<GameResult> {
    let mut session = GameSession::with_seed(rng.random());

    while session.session_state().is_active() && session.stats().placed_shapes() < MAX_PLACEMENTS {
        let moves = legal_moves(&session);
        let Some(&(slot, x, y)) = moves.choose(rng) else {
            break;
        };
        session.try_place(slot, x, y)?;
    }

    let stats = session.stats();
    Ok(GameResult {
        score: stats.score(),
        placements: stats.placed_shapes(),
        cleared_lines: stats.total_cleared_lines(),
    })
}

fn legal_moves(session: &GameSession) -> Vec<(usize, usize, usize)> {
    let board = session.board();
    let mut moves = Vec::new();
    for (slot, shape) in session.tray().occupied_slots() {
        for y in 0..Board::HEIGHT {
            for x in 0..Board::WIDTH {
                if board.can_place(shape, x, y) {
                    moves.push((slot, x, y));
                }
            }
        }
    }
    moves
}

fn print_summary(summary: &Summary) {
    println!("Games played:          {}", summary.games);
    println!("Score (mean):          {:.1}", summary.mean_score);
    println!(
        "Score (min..max):      {} .. {}",
        summary.min_score, summary.max_score
    );
    println!("Placements (mean):     {:.1}", summary.mean_placements);
    println!("Lines cleared (mean):  {:.1}", summary.mean_cleared_lines);
}
