use bot::strategy::{QLearningConfig, QTrainer};
use std::env;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut seconds = 30u64;
    let mut table_path = "models/qwixx_policy.json".to_string();
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seconds" => {
                seconds = args
                    .get(i + 1)
                    .and_then(|value| value.parse().ok())
                    .ok_or("--seconds needs a number")?;
                i += 2;
            }
            "--out" => {
                table_path = args.get(i + 1).ok_or("--out needs a path")?.clone();
                i += 2;
            }
            "--seed" => {
                seed = Some(
                    args.get(i + 1)
                        .and_then(|value| value.parse().ok())
                        .ok_or("--seed needs a number")?,
                );
                i += 2;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("unknown argument: {}", other);
                print_help();
                std::process::exit(1);
            }
        }
    }

    if let Some(parent) = std::path::Path::new(&table_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    println!("Training Q-learning policy for {} seconds", seconds);
    let mut trainer = QTrainer::new(QLearningConfig::default(), seed);
    trainer.train(Duration::from_secs(seconds))?;
    println!("Episodes: {}", trainer.episodes());
    println!("Table entries: {}", trainer.table().len());

    trainer.table().save(&table_path)?;
    println!("Policy written to {}", table_path);
    Ok(())
}

fn print_help() {
    println!("Usage: train_qlearning [--seconds N] [--out PATH] [--seed N]");
    println!("  --seconds N  wall-clock training budget (default 30)");
    println!("  --out PATH   where to write the policy JSON (default models/qwixx_policy.json)");
    println!("  --seed N     fixed RNG seed for reproducible training");
}
