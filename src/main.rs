use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};

use twenty48::engine::Move;
use twenty48::session::Session;

#[derive(Parser, Debug)]
#[command(
    name = "twenty48",
    version,
    about = "Play random 2048 games and report scores"
)]
struct Args {
    /// Grid side length
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Tiles dealt at the start of every game
    #[arg(long, default_value_t = 2)]
    start_tiles: usize,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// RNG seed for reproducible games; omit for entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Print the board after every effective move
    #[arg(long)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Best score across games: the persistence collaborator role, minus
    // the storage medium.
    let mut best_score = 0u64;
    let mut session = Session::new(args.size, args.start_tiles, &mut rng);
    for game in 0..args.games {
        if game > 0 {
            session.restart(&mut rng);
        }
        let mut moves_made = 0u64;
        loop {
            let direction = Move::ALL[rng.gen_range(0..Move::ALL.len())];
            let snapshot = session.apply_move(direction, &mut rng);
            if snapshot.moved {
                moves_made += 1;
                if args.verbose {
                    println!("{}", session.grid());
                }
            }
            if snapshot.over || snapshot.won {
                break;
            }
        }
        best_score = best_score.max(session.score());
        println!(
            "game {}: {} after {} moves, score {}",
            game + 1,
            if session.is_won() { "won" } else { "over" },
            moves_made,
            session.score()
        );
        println!("{}", session.grid());
    }
    println!("Best score: {best_score}");
}
