//! Provides the main entry point to the program.
use anyhow::Result;
use human_panic::setup_panic;
use rainwise::cli::run_cli;
use rainwise::log;

fn main() -> Result<()> {
    setup_panic!();

    if let Err(err) = run_cli() {
        if log::is_logger_initialised() {
            ::log::error!("{err:?}");
            std::process::exit(1);
        }

        return Err(err);
    }

    Ok(())
}
