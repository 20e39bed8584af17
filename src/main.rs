// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use musites::{Database, Game, GameMode, GameOptions, GameResult, Question, SiteConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "musites.yaml";
const DEFAULT_LOG_FILTER: &str = "musites=info";

fn print_usage() {
    println!("MUSITES - Music Quiz");
    println!();
    println!("Usage: musites [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <FILE>     Site config (default: {} if present)", DEFAULT_CONFIG);
    println!("  --database <FILE>   Database file (overrides the config)");
    println!("  --list-sets         List the sets in the database");
    println!("  --play <SET>        Play a game with the named set");
    println!("  --mode <MODE>       choice or fill");
    println!("  --count <N>         Number of questions");
    println!("  --choices <N>       Choices per question (choice mode)");
    println!("  --json              Print the result as JSON");
    println!("  --help              Show this help message");
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    ListSets,
    Play(String),
}

#[derive(Debug)]
struct Args {
    command: Command,
    config: Option<PathBuf>,
    database: Option<PathBuf>,
    mode: Option<GameMode>,
    count: Option<usize>,
    choices: Option<usize>,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args {
        command: Command::Help,
        config: None,
        database: None,
        mode: None,
        count: None,
        choices: None,
        json: false,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", flag))
        };

        match arg.as_str() {
            "--help" => parsed.command = Command::Help,
            "--list-sets" => parsed.command = Command::ListSets,
            "--play" => parsed.command = Command::Play(value("--play")?),
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--database" => parsed.database = Some(PathBuf::from(value("--database")?)),
            "--mode" => parsed.mode = Some(value("--mode")?.parse()?),
            "--count" => {
                let v = value("--count")?;
                parsed.count = Some(v.parse().map_err(|_| anyhow!("Invalid count: {}", v))?);
            }
            "--choices" => {
                let v = value("--choices")?;
                let n: usize = v.parse().map_err(|_| anyhow!("Invalid choice count: {}", v))?;
                parsed.choices = Some(n);
            }
            "--json" => parsed.json = true,
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(parsed)
}

fn load_config(args: &Args) -> Result<Option<SiteConfig>> {
    match &args.config {
        Some(path) => SiteConfig::load(path).map(Some),
        None if Path::new(DEFAULT_CONFIG).exists() => SiteConfig::load(DEFAULT_CONFIG).map(Some),
        None => Ok(None),
    }
}

/// Load the database and work out where its audio sources live
fn load_database(args: &Args, config: Option<&SiteConfig>) -> Result<(Database, String)> {
    if let Some(path) = &args.database {
        let base_url = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}/", p))
            .unwrap_or_default();
        return Ok((Database::load(path)?, base_url));
    }

    let config = config.ok_or_else(|| anyhow!("No database given; use --database or --config"))?;
    let root = args
        .config
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""));

    let database = Database::load(config.database_path(root))?;
    Ok((database, config.base_url_under(root)))
}

fn list_sets(database: &Database, config: Option<&SiteConfig>) {
    println!("{}", database.name());
    for set in database.sets() {
        println!("  {} ({} tracks)", set.name(), set.count());
    }

    if let Some(config) = config {
        for line in site_info(config) {
            println!("{}", line);
        }
    }
}

/// About text and source link, each preceded by a blank line
fn site_info(config: &SiteConfig) -> Vec<String> {
    let mut lines = Vec::new();

    if !config.about.trim().is_empty() {
        lines.push(String::new());
        lines.extend(config.about.lines().map(String::from));
    }
    if !config.source.is_empty() {
        lines.push(String::new());
        lines.push(format!("Source: {}", config.source));
    }

    lines
}

/// Turn a line of input into an answer
///
/// In choice mode a number selects that choice; anything else is taken
/// as typed.
fn interpret_answer(question: &Question, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(choices) = &question.choices {
        if let Ok(n) = line.parse::<usize>() {
            if let Some(choice) = n.checked_sub(1).and_then(|i| choices.get(i)) {
                return Some(choice.clone());
            }
        }
    }

    Some(line.to_string())
}

fn play(
    database: &Database,
    base_url: &str,
    set_name: &str,
    options: GameOptions,
    json: bool,
) -> Result<()> {
    let set = database.set(set_name).ok_or_else(|| {
        anyhow!(
            "Set '{}' not found (available: {})",
            set_name,
            database.set_names().join(", ")
        )
    })?;

    let mut game = Game::new(set, options).context("Failed to start game")?;
    let questions = game.questions();
    let total = questions.len();

    println!("Test how much you know about {}", set.name());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for question in &questions {
        println!();
        println!("[{}/{}] {}", question.id, total, question.location(base_url));
        if let Some(choices) = &question.choices {
            for (i, choice) in choices.iter().enumerate() {
                println!("  {}. {}", i + 1, choice);
            }
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        if let Some(answer) = interpret_answer(question, &line?) {
            game.answer(question.id, answer);
        }
    }

    let result = game.submit()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(set.name(), &result);
    }

    Ok(())
}

fn print_result(name: &str, result: &GameResult) {
    println!();
    println!("Here's how much you know about {}:", name);
    println!();
    println!("    {}", result.ranking);
    println!();
    println!(
        "You got {} out of {} questions right, {:.1} % correct.",
        result.correct,
        result.total,
        result.accuracy_percent()
    );

    for record in result.data.iter().filter(|r| !r.correct) {
        println!(
            "  #{} {} - you said {}",
            record.id,
            record.title.first().map(String::as_str).unwrap_or_default(),
            record.answer.as_deref().unwrap_or("nothing")
        );
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args)?;

    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    let config = load_config(&args)?;
    let (database, base_url) = load_database(&args, config.as_ref())?;

    match &args.command {
        Command::Help => print_usage(),
        Command::ListSets => list_sets(&database, config.as_ref()),
        Command::Play(set_name) => {
            let mut options = config.as_ref().map(|c| c.game).unwrap_or_default();
            if let Some(mode) = args.mode {
                options = options.with_mode(mode);
            }
            if let Some(count) = args.count {
                options = options.with_count(count);
            }
            if let Some(choices) = args.choices {
                options = options.with_choice_count(choices);
            }

            play(&database, &base_url, set_name, options, args.json)?;
        }
    }

    Ok(())
}
