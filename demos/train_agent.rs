//! Trains a Monte Carlo agent against the house and prints what it learned.
//!
//! Run with: `cargo run --example train_agent [rounds] [seed]`

use std::env;
use std::process::ExitCode;

use bjlearn::{Action, Agent, Game, GameOptions, MonteCarloEs, State, StateSpace};

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let rounds: u32 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(50_000);
    let seed: u64 = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(42);

    let options = GameOptions::default().with_rounds(rounds);
    let mut game = Game::new(options, seed, |rng| {
        vec![Agent::new(MonteCarloEs::default(), &StateSpace::default(), rng)]
    });

    let scoreboard = match game.play() {
        Ok(scoreboard) => scoreboard,
        Err(err) => {
            eprintln!("training aborted: {err}");
            return ExitCode::FAILURE;
        }
    };

    let score = scoreboard.players()[0];
    println!("trained for {rounds} rounds (seed {seed})");
    println!(
        "wins: {}  pushes: {}  losses: {}",
        score.wins, score.pushes, score.losses
    );

    // Learned policy, one row per player total, hit marked with '+'.
    let agent = &game.players()[0];
    println!("\nlearned policy (rows: player total, columns: dealer upcard 2-11)");
    for player_total in (4..=21).rev() {
        let mut row = format!("{player_total:>4}  ");
        for dealer_upcard in 2..=11 {
            let action = agent
                .policy()
                .action(State::new(player_total, dealer_upcard))
                .expect("default state space covers the printed grid");
            row.push(if action == Action::Hit { '+' } else { '.' });
        }
        println!("{row}");
    }

    ExitCode::SUCCESS
}
