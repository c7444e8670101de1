use anyhow::{bail, Context};
use loyalty::build_info::version_line;
use loyalty::config::{default_config_path, EngineConfig};
use loyalty::{JsonUserStore, LogNotifier, LoyaltyEngine, StatisticsSnapshot};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const USAGE: &str = "\
Usage: loyalty <command> [args]

Commands:
  create-user <username> <email>     Create a user with a fresh profile
  view <user-id>                     Show points, level, badges and tasks
  login <user-id>                    Record today's login
  grant <user-id> <amount> [reason]  Grant points
  task <user-id> <task-id> <value>   Set daily task progress
  purchase <user-id> <amount>        Record a completed purchase
  favorite <user-id> add|remove      Record a favorite toggle
  sync <user-id> <purchases> <spent> <favorites>
                                     Overwrite counters from the statistics source
  badges <user-id>                   Badge catalog with earned flags
  leaderboard [limit]                Top users by points
  catalog                            Print the active catalog as JSON

Options:
  --version  Show version information
  --help     Show this help message

Environment:
  LOYALTY_CONFIG  Path to the JSON config file
  RUST_LOG        Log filter (default: info)";

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some("--version") | Some("-v") => {
            println!("{}", version_line());
            return Ok(());
        }
        _ => {}
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = match default_config_path() {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let store = JsonUserStore::open(config.users_dir())
        .with_context(|| format!("opening user store at {}", config.users_dir().display()))?;
    let engine = LoyaltyEngine::from_config(store, &config)
        .context("building engine")?
        .with_notifier(Arc::new(LogNotifier));

    run(&engine, &args)
}

fn run(engine: &LoyaltyEngine<JsonUserStore>, args: &[String]) -> anyhow::Result<()> {
    let command = args[0].as_str();
    let rest = &args[1..];

    match (command, rest) {
        ("create-user", [username, email]) => print_json(&engine.create_user(username, email)?),
        ("view", [user]) => print_json(&engine.get_profile_view(parse_user(user)?)?),
        ("login", [user]) => print_json(&engine.record_login(parse_user(user)?)?),
        ("grant", [user, amount, reason @ ..]) => {
            let amount: i64 = amount
                .parse()
                .with_context(|| format!("amount must be an integer, got {:?}", amount))?;
            let reason = if reason.is_empty() {
                "manual".to_string()
            } else {
                reason.join(" ")
            };
            print_json(&engine.grant_points(parse_user(user)?, amount, &reason)?)
        }
        ("task", [user, task_id, value]) => {
            let value: i64 = value
                .parse()
                .with_context(|| format!("progress must be an integer, got {:?}", value))?;
            print_json(&engine.update_task_progress(parse_user(user)?, task_id, value)?)
        }
        ("purchase", [user, amount]) => {
            let amount: f64 = amount
                .parse()
                .with_context(|| format!("amount must be a number, got {:?}", amount))?;
            print_json(&engine.record_purchase(parse_user(user)?, amount)?)
        }
        ("favorite", [user, action]) => {
            let added = match action.as_str() {
                "add" => true,
                "remove" => false,
                other => bail!("favorite action must be add or remove, got {:?}", other),
            };
            print_json(&engine.record_favorite(parse_user(user)?, added)?)
        }
        ("sync", [user, purchases, spent, favorites]) => {
            let snapshot = StatisticsSnapshot {
                total_purchases: purchases.parse().context("purchases must be an integer")?,
                total_spent: spent.parse().context("spent must be a number")?,
                favorite_products: favorites.parse().context("favorites must be an integer")?,
            };
            print_json(&engine.sync_statistics(parse_user(user)?, &snapshot)?)
        }
        ("badges", [user]) => print_json(&engine.get_badge_catalog_status(parse_user(user)?)?),
        ("leaderboard", []) => print_json(&engine.get_leaderboard(None)?),
        ("leaderboard", [limit]) => {
            let limit: usize = limit.parse().context("limit must be a positive integer")?;
            print_json(&engine.get_leaderboard(Some(limit))?)
        }
        ("catalog", []) => print_json(&engine.catalog().to_file_data()),
        _ => {
            eprintln!("Unknown or malformed command: {}", args.join(" "));
            eprintln!("Run 'loyalty --help' for usage.");
            std::process::exit(2);
        }
    }
}

fn parse_user(raw: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("not a user id: {:?}", raw))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
