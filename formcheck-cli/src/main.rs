mod control;
mod form;
mod paths;

use std::fs::{self, File};
use std::io;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::control::Terminal;

fn main() -> io::Result<()> {
    let log_path = paths::log_file();
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)?;
    }
    let log_file = File::create(&log_path)?;
    if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let terminal = Terminal::new(io::stdout());
    let submitted = form::run(io::stdin().lock(), &terminal)?;
    log::info!("Exiting, submitted: {}", submitted);

    Ok(())
}
