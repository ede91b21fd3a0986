use std::io;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{debug, info};

use tictactoe_minimax::{
    agents::{Agent, HumanAgent, MinimaxAgent, RandomAgent},
    Game, GameState, Player,
};

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Play tic-tac-toe against an exhaustive minimax search", long_about = None)]
struct Cli {
    /// Side the human plays; `none` lets the computer play both sides
    #[arg(long, value_enum, default_value_t = Seat::X)]
    human: Seat,

    /// Computer player facing the human
    #[arg(long, value_enum, default_value_t = Opponent::Minimax)]
    opponent: Opponent,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Seat {
    X,
    O,
    #[value(name = "none")]
    Nobody,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Opponent {
    Minimax,
    Random,
}

fn computer(opponent: Opponent, seed: Option<u64>) -> Box<dyn Agent> {
    match (opponent, seed) {
        (Opponent::Minimax, _) => Box::new(MinimaxAgent),
        (Opponent::Random, Some(seed)) => Box::new(RandomAgent::seeded(seed)),
        (Opponent::Random, None) => Box::new(RandomAgent::new()),
    }
}

fn human() -> Box<dyn Agent> {
    Box::new(HumanAgent::new(io::stdin().lock(), io::stdout()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (mut x, mut o): (Box<dyn Agent>, Box<dyn Agent>) = match cli.human {
        Seat::X => (human(), computer(cli.opponent, cli.seed)),
        Seat::O => (computer(cli.opponent, cli.seed), human()),
        Seat::Nobody => (Box::new(MinimaxAgent), computer(cli.opponent, cli.seed)),
    };
    info!("new game: X is {}, O is {}", x.name(), o.name());

    let mut game = Game::new();
    loop {
        println!("{}", game);

        match game.state() {
            GameState::Ongoing => {}
            GameState::WonByX => {
                println!("X wins!");
                break;
            }
            GameState::WonByO => {
                println!("O wins!");
                break;
            }
            GameState::Draw => {
                println!("It's a draw!");
                break;
            }
        }

        let player = game.current_player();
        let agent = match player {
            Player::X => &mut x,
            Player::O => &mut o,
        };
        let mv = agent
            .select_move(&game)
            .with_context(|| format!("{} could not pick a move for {}", agent.name(), player))?;
        debug!("{} ({}) plays {}", player, agent.name(), mv);

        game.step(mv)
            .with_context(|| format!("{} played an illegal move {}", agent.name(), mv))?;
    }

    info!("game over after {} moves: {:?}", game.history().len(), game.state());
    Ok(())
}
