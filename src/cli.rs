use crate::config::GameConfig;
use crate::highscore::store::HighscoreStore;
use crate::session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Score,
    Table,
    Reset,
    Scenarios,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("play") => Some(Command::Play),
        Some("score") => Some(Command::Score),
        Some("table") => Some(Command::Table),
        Some("reset") => Some(Command::Reset),
        Some("scenarios") => Some(Command::Scenarios),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let config = GameConfig::from_args(args);
    match parse_command(args) {
        Some(Command::Play) => handle_play(&config, args),
        Some(Command::Score) => handle_score(&config, args),
        Some(Command::Table) => handle_table(&config, args),
        Some(Command::Reset) => handle_reset(&config),
        Some(Command::Scenarios) => handle_scenarios(&config),
        None => {
            eprintln!("usage: greenwave <play|score|table|reset|scenarios> [noupload]");
            2
        }
    }
}

/// `play <category> [player-name]`: run a full session. Without a player
/// name the run is scored and shown but never enters the table.
fn handle_play(config: &GameConfig, args: &[String]) -> i32 {
    let Some(category) = args.get(2) else {
        eprintln!("usage: greenwave play <category> [player-name]");
        return 2;
    };
    let outcome = match session::run(config, category) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("session failed: {err}");
            return 1;
        }
    };
    print_json(&outcome);

    if let Some(name) = args.get(3).filter(|name| !name.is_empty()) {
        if !outcome.record.complete {
            println!("run was incomplete, no score recorded");
            return 0;
        }
        let store = HighscoreStore::new(config);
        let mut table = store.load();
        match session::record_result(&store, &mut table, name, &outcome) {
            Some(rank) => println!("'{name}' placed at rank {}", rank + 1),
            None => println!("score {} did not make the table", outcome.record.score),
        }
    }
    0
}

/// `score <category>`: re-score the artifacts of an already-finished run.
fn handle_score(config: &GameConfig, args: &[String]) -> i32 {
    let Some(category) = args.get(2) else {
        eprintln!("usage: greenwave score <category>");
        return 2;
    };
    print_json(&session::score_artifacts(config, category));
    0
}

/// `table [category]`: print the highscore table (all categories or one).
fn handle_table(config: &GameConfig, args: &[String]) -> i32 {
    let store = HighscoreStore::new(config);
    let table = store.load();
    match args.get(2) {
        Some(category) => match table.entries(category) {
            Some(row) => print_json(&row),
            None => {
                eprintln!("no highscores recorded for '{category}'");
                return 1;
            }
        },
        None => print_json(table.categories()),
    }
    0
}

/// `reset`: drop all local scores and reseed from the reference file.
fn handle_reset(config: &GameConfig) -> i32 {
    let store = HighscoreStore::new(config);
    let mut table = store.load_local();
    store.reset(&mut table);
    if let Err(err) = store.persist(&table) {
        eprintln!("failed to persist reset table: {err}");
        return 1;
    }
    println!(
        "highscores reset ({} categories seeded)",
        table.categories().len()
    );
    0
}

fn handle_scenarios(config: &GameConfig) -> i32 {
    for category in session::scenarios(config) {
        println!("{category}");
    }
    0
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => println!("{payload}"),
        Err(err) => eprintln!("failed to serialize output: {err}"),
    }
}
