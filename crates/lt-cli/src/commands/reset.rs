use std::path::Path;

use lt_engine::{
    EngineError, JsonFileStore, RigQueue, Roster, Session, SessionConfig,
};

pub fn run(dir: &Path, yes: bool) -> Result<(), String> {
    let store = JsonFileStore::new(dir);
    let mut session = Session::new(
        Roster::default(),
        RigQueue::default(),
        Box::new(store),
        SessionConfig::default(),
    );

    match session.clear_scores(yes) {
        Ok(()) => {
            println!("All scores cleared.");
            Ok(())
        }
        Err(EngineError::NothingToClear) => {
            println!("Nothing to clear.");
            Ok(())
        }
        Err(EngineError::ConfirmationRequired) => {
            Err("confirmation required: pass --yes to clear all scores".to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}
