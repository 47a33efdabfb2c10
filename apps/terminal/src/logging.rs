//! Log setup for the terminal app.
//!
//! Log lines can't go to stderr while the alternate screen is active, so
//! env_logger is piped to a file next to the working directory. Logging is
//! off unless `RUST_LOG` is set.

use std::fs::OpenOptions;

const LOG_FILE: &str = "foliowatch.log";

/// Initialize file-backed logging when `RUST_LOG` is set.
pub fn init() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let file = match OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("could not open {}: {}", LOG_FILE, err);
            return;
        }
    };

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}
