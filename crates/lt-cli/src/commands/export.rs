use std::path::Path;

pub fn run(dir: &Path, output: Option<&Path>) -> Result<(), String> {
    let content = super::load_ledger(dir).export_text();

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        print!("{content}");
    }

    Ok(())
}
