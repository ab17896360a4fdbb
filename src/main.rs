#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use shipshape::{
    init_logging, random_empty, Board, InMemoryStore, MatchService, OpponentKind, PlayerId, Side,
    BOARD_SIZE,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play whole matches with a random-firing stand-in for the human.
    Simulate {
        #[arg(long, default_value = "hunt-target", help = "Opponent type: scan (alias fry) or hunt-target")]
        opponent: OpponentKind,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        games: usize,
        #[arg(long, default_value = "cli-test")]
        player: String,
    },
    /// Parse a 100-character board string (`.` empty, `o` miss, `x` hit) and print it as a grid.
    Board { encoded: String },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            opponent,
            seed,
            games,
            player,
        } => simulate(opponent, seed, games, PlayerId(player)).await?,
        Commands::Board { encoded } => {
            let board: Board = encoded.parse()?;
            print_board(&board);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn simulate(opponent: OpponentKind, seed: Option<u64>, games: usize, player: PlayerId) -> anyhow::Result<()> {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (games will be reproducible)", s);
    }
    let (service, mut rng) = match seed {
        Some(s) => (
            MatchService::with_seed(InMemoryStore::new(), s),
            SmallRng::seed_from_u64(s.wrapping_add(1)),
        ),
        None => {
            let mut seed_rng = rand::rng();
            (MatchService::new(InMemoryStore::new()), SmallRng::from_rng(&mut seed_rng))
        }
    };

    for _ in 0..games {
        let (game, created) = service.get_or_start_match(&player, opponent).await?;
        if created {
            println!("Created a new match against {}", game.opponent());
        } else {
            println!("Resuming match against {}", game.opponent());
        }
        let id = game.id();
        let mut game = service.place_remaining_randomly(id).await?;

        let mut turns = 0;
        let winner = loop {
            let target = random_empty(&game.side(Side::Opponent).board, &mut rng)
                .ok_or_else(|| anyhow::anyhow!("no cell left to fire at in match {}", id))?;
            let report = service.play_turn(id, target).await?;
            turns += 1;
            if let Some(kind) = report.human.sunk() {
                println!("Turn {}: sank the opponent's {}", turns, kind);
            }
            if let Some(kind) = report.opponent.and_then(|r| r.sunk()) {
                println!("Turn {}: opponent sank our {}", turns, kind);
            }
            if let Some(winner) = report.winner() {
                break winner;
            }
            game = service.load(id).await?;
        };
        println!("Match {} over after {} turns: {} wins", id, turns, winner);
    }

    let history = service.match_history(&player).await?;
    let ai_wins = history
        .iter()
        .filter(|m| m.winner() == Some(Side::Opponent))
        .count();
    println!(
        "{} finished matches, opponent won {}, {} won {}",
        history.len(),
        ai_wins,
        player,
        history.len() - ai_wins
    );
    Ok(())
}

#[cfg(feature = "std")]
fn print_board(board: &Board) {
    let size = BOARD_SIZE as usize;
    print!("   ");
    for x in 0..size {
        print!(" {}", x);
    }
    println!();
    for (y, row) in board.cells().chunks(size).enumerate() {
        print!("{:2} ", y);
        for cell in row {
            print!(" {}", cell.symbol());
        }
        println!();
    }
}
