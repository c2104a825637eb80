use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use padroll_core::{BindingStore, MemoryStore, SqliteStore};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

fn log_path() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("padroll");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("padroll.log"))
}

/// Log to `<config_dir>/padroll/padroll.log`, or to stderr when that file can't be created.
pub fn init_logging(level: &str) {
    let level: LevelFilter = level.parse().unwrap_or(LevelFilter::Info);
    let file = log_path().and_then(|path| File::create(path).ok());
    let result = match file {
        Some(file) => WriteLogger::init(level, Config::default(), file),
        None => {
            let mode = TerminalMode::Stderr;
            TermLogger::init(level, Config::default(), mode, ColorChoice::Auto)
        }
    };
    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}

/// The on-disk binding store, or an in-memory one if the database can't be opened.
pub fn open_binding_store() -> Box<dyn BindingStore> {
    let path = SqliteStore::default_path();
    match SqliteStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            let shown = path.display();
            log::warn!("Could not open {}: {}; bindings are not saved", shown, e);
            Box::new(MemoryStore::new())
        }
    }
}
