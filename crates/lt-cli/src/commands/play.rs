use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use colored::Colorize;

use lt_engine::{
    EngineError, JsonFileStore, MemoryStore, Selection, Session, SessionConfig, StateStore,
};

const TICK_COUNT: usize = 24;
const TICK_INTERVAL: Duration = Duration::from_millis(40);

pub fn run(dir: &Path, seed: Option<u64>, ephemeral: bool) -> Result<(), String> {
    let store: Box<dyn StateStore> = if ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(JsonFileStore::new(dir))
    };
    let mut config = SessionConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut session = Session::with_demo_data(store, config);

    println!("  {} Lostrommel session", "Starting".bold());
    println!(
        "  Roster: {} names | Scores: {} participants",
        session.roster().len(),
        session.ledger().balances().len()
    );
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            println!("Goodbye!");
            break;
        }

        match dispatch(&mut session, input, &mut reader) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Err(message) => println!("{}\n", message.yellow()),
        }
    }

    Ok(())
}

fn dispatch(
    session: &mut Session,
    input: &str,
    reader: &mut impl BufRead,
) -> Result<String, String> {
    // `+2` style shortcuts mirror the point buttons of the classroom view.
    if let Some(points) = input.strip_prefix('+').and_then(|n| n.parse::<i64>().ok()) {
        return do_award(session, points);
    }

    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd.as_str() {
        "roll" => do_roll(session),
        "stop" => do_stop(session),
        "award" => {
            let points: i64 = rest
                .parse()
                .map_err(|_| "usage: award <points>".to_string())?;
            do_award(session, points)
        }
        "undo" => do_undo(session),
        "board" => Ok(render_board(session)),
        "export" => do_export(session, rest),
        "history" => Ok(session.history().render_text()),
        "clear" => do_clear(session, rest),
        "roster" => Ok(render_roster(session)),
        "set" => do_set(session, rest, reader),
        "status" => Ok(session.status()),
        "help" => Ok(help_text()),
        _ => Err(format!("unknown command: {cmd} (try 'help')")),
    }
}

fn do_roll(session: &mut Session) -> Result<String, String> {
    session.start().map_err(|e| e.to_string())?;

    // Display churn only; the winner is decided at 'stop'.
    for _ in 0..TICK_COUNT {
        if let Some(name) = session.tick() {
            print!("\r  {:<24}", name);
            let _ = io::stdout().flush();
            thread::sleep(TICK_INTERVAL);
        }
    }
    println!();

    Ok("Rolling... type 'stop' to settle.".to_string())
}

fn do_stop(session: &mut Session) -> Result<String, String> {
    let Some(event) = session.stop() else {
        return Err("not rolling, type 'roll' first".to_string());
    };

    match &event.winner {
        Selection::Name(name) => {
            let points = session.current_balance().unwrap_or(0);
            Ok(format!(
                "{} {}\nCurrent points: {points}",
                "Winner:".bold(),
                name.to_string().green().bold()
            ))
        }
        _ => Ok("No winner: the roster was empty when the roll settled.".to_string()),
    }
}

fn do_award(session: &mut Session, points: i64) -> Result<String, String> {
    match session.award(points) {
        Ok(balance) => {
            let name = session
                .selector()
                .selection()
                .name()
                .unwrap_or_default()
                .to_string();
            Ok(format!("{name} {points:+} (total {balance})"))
        }
        Err(EngineError::InvalidScoreTarget) => {
            // The view layer is expected to disable scoring here; a quiet
            // notice stands in for the grayed-out buttons.
            Ok("No settled winner to score.".dimmed().to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}

fn do_undo(session: &mut Session) -> Result<String, String> {
    match session.undo_last() {
        Some(tx) => {
            let balance = session.balance_of(&tx.name).unwrap_or(0);
            Ok(format!(
                "Undid {:+} for {} (total {balance})",
                tx.delta, tx.name
            ))
        }
        None => Ok("Nothing to undo.".to_string()),
    }
}

fn render_board(session: &Session) -> String {
    let ranked = session.ledger().ranked();
    if ranked.is_empty() {
        return "No scores recorded.".to_string();
    }
    let mut out = format!("{}\n", "Score Board".bold());
    for (i, entry) in ranked.iter().enumerate() {
        out.push_str(&format!("{:>3}. {} [{}]\n", i + 1, entry.name, entry.points));
    }
    out.trim_end().to_string()
}

fn do_export(session: &Session, rest: &str) -> Result<String, String> {
    let content = session.export_scores();
    if rest.is_empty() {
        return Ok(content.trim_end().to_string());
    }
    std::fs::write(rest, &content).map_err(|e| format!("cannot write to {rest}: {e}"))?;
    Ok(format!("Exported to {rest}"))
}

fn do_clear(session: &mut Session, rest: &str) -> Result<String, String> {
    match rest.to_lowercase().as_str() {
        "history" => {
            session.clear_history();
            Ok("Selection history cleared.".to_string())
        }
        "scores" => match session.clear_scores(false) {
            Err(EngineError::ConfirmationRequired) => {
                Ok("This clears every score. Type 'clear scores confirm' to proceed.".to_string())
            }
            Err(e) => Err(e.to_string()),
            Ok(()) => Ok("All scores cleared.".to_string()),
        },
        "scores confirm" => match session.clear_scores(true) {
            Ok(()) => Ok("All scores cleared.".to_string()),
            Err(e) => Err(e.to_string()),
        },
        _ => Err("usage: clear history | clear scores [confirm]".to_string()),
    }
}

fn render_roster(session: &Session) -> String {
    let names = session.roster().names();
    if names.is_empty() {
        return "The roster is empty. Use 'set roster' to add names.".to_string();
    }
    let mut out = format!("Roster ({} names):\n", names.len());
    for (i, name) in names.iter().enumerate() {
        out.push_str(&format!("{:>3}. {name}\n", i + 1));
    }
    out.trim_end().to_string()
}

fn do_set(
    session: &mut Session,
    target: &str,
    reader: &mut impl BufRead,
) -> Result<String, String> {
    match target.to_lowercase().as_str() {
        "roster" => {
            let text = read_block(reader)?;
            let rig_text = session.rig().names().join("\n");
            session.configure(&text, &rig_text);
            Ok(format!(
                "Roster replaced: {} names. Selection and history reset.",
                session.roster().len()
            ))
        }
        "rigged" => {
            let text = read_block(reader)?;
            let roster_text = session.roster().names().join("\n");
            session.configure(&roster_text, &text);
            Ok(format!(
                "Preset queue replaced: {} entries. Selection and history reset.",
                session.rig().len()
            ))
        }
        _ => Err("usage: set roster | set rigged".to_string()),
    }
}

/// Read lines until a single `.` line (or EOF).
fn read_block(reader: &mut impl BufRead) -> Result<String, String> {
    println!("  One name per line, finish with a single '.'");
    let mut text = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        if line.trim() == "." {
            break;
        }
        text.push_str(&line);
    }
    Ok(text)
}

fn help_text() -> String {
    "\
Commands:
  roll                     Start rolling through the roster
  stop                     Settle the roll and announce the winner
  award <points>           Award points to the winner (+2 is shorthand)
  undo                     Undo the most recent award
  board                    Show the ranked score board
  export [file]            Export ranked scores as text
  history                  Show past selections
  clear history            Forget past selections
  clear scores [confirm]   Clear all scores (needs confirmation)
  roster                   Show the current roster
  set roster               Replace the roster (multi-line, end with '.')
  set rigged               Replace the preset winner queue
  status                   Show session status
  help                     Show this help
  quit                     Exit"
        .to_string()
}
