use std::path::Path;

use colored::Colorize;

pub fn run(dir: &Path) -> Result<(), String> {
    let ledger = super::load_ledger(dir);
    let ranked = ledger.ranked();

    if ranked.is_empty() {
        println!("No scores recorded.");
        return Ok(());
    }

    println!("{}", "Score Board".bold());
    for (i, entry) in ranked.iter().enumerate() {
        let line = format!("{:>3}. {} [{}]", i + 1, entry.name, entry.points);
        match i {
            0 => println!("{}", line.yellow().bold()),
            _ => println!("{line}"),
        }
    }
    Ok(())
}
