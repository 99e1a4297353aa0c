//! Batch harness: plays many games between configured strategies and
//! tallies wins per seat.
use anyhow::{anyhow, Result};
use bot::strategy::{QLearningConfig, QTable, QTrainer};
use bot::{GameSession, StrategyKind};
use log::info;
use std::time::{Duration, Instant};

const HELP: &str = "\
Usage: client_cli [OPTIONS]

OPTIONS:
  --games N        minimum number of games to play (default 1000)
  --time SECONDS   keep playing until this much wall-clock time elapsed
  --seed N         fixed dice seed for reproducible runs
  --players LIST   comma-separated seats (default greedy,heuristic-greedy)
                   one of: greedy, heuristic-greedy, heuristic-space, qlearning
  --train-secs N   Q-learning training budget when a qlearning seat is present (default 10)
  --policy PATH    load a trained policy instead of training
";

struct Args {
    games: u64,
    run_time: Duration,
    seed: Option<u64>,
    players: Vec<StrategyKind>,
    train_secs: u64,
    policy_path: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let players = match pargs.opt_value_from_str::<_, String>("--players")? {
        None => vec![StrategyKind::Greedy, StrategyKind::HeuristicGreedy],
        Some(list) => list
            .split(',')
            .map(|name| name.trim().parse().map_err(|err: String| anyhow!(err)))
            .collect::<Result<Vec<StrategyKind>>>()?,
    };
    if players.len() < 2 {
        return Err(anyhow!("need at least two seats"));
    }

    let args = Args {
        games: pargs.opt_value_from_str("--games")?.unwrap_or(1000),
        run_time: Duration::from_secs(pargs.opt_value_from_str("--time")?.unwrap_or(0)),
        seed: pargs.opt_value_from_str("--seed")?,
        players,
        train_secs: pargs.opt_value_from_str("--train-secs")?.unwrap_or(10),
        policy_path: pargs.opt_value_from_str("--policy")?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        return Err(anyhow!("unexpected arguments: {:?}", remaining));
    }
    Ok(args)
}

fn prepare_policy(args: &Args) -> Result<Option<QTable>> {
    if !args.players.contains(&StrategyKind::QLearning) {
        return Ok(None);
    }
    if let Some(path) = &args.policy_path {
        let table = QTable::load(path).map_err(|err| anyhow!("loading {}: {}", path, err))?;
        info!("loaded policy from {} ({} entries)", path, table.len());
        return Ok(Some(table));
    }
    info!("training q-learning policy for {}s", args.train_secs);
    let mut trainer = QTrainer::new(QLearningConfig::default(), args.seed);
    trainer.train(Duration::from_secs(args.train_secs))?;
    info!(
        "trained {} episodes, {} table entries",
        trainer.episodes(),
        trainer.table().len()
    );
    Ok(Some(trainer.into_table()))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let policy = prepare_policy(&args)?;

    let mut session = GameSession::new(&args.players, args.seed, policy.as_ref());
    let mut wins = vec![0u64; args.players.len()];
    let mut total_games = 0u64;
    let start = Instant::now();

    while total_games < args.games || start.elapsed() < args.run_time {
        if total_games % 100 == 0 && total_games > 0 {
            println!("Played {} games. Wins so far: {:?}", total_games, wins);
        }
        let scores = session.play_one_game()?;
        // first seat holding the maximum score takes the win
        let mut winner = 0;
        for (seat, score) in scores.iter().enumerate() {
            if *score > scores[winner] {
                winner = seat;
            }
        }
        wins[winner] += 1;
        total_games += 1;
    }

    println!("Total games played: {}", total_games);
    for (seat, kind) in args.players.iter().enumerate() {
        println!("  seat {} ({}): {} wins", seat, kind, wins[seat]);
    }
    Ok(())
}
