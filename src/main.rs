//! hookbell - play a sound when an agent hook fires.

use hookbell::cli::Args;
use hookbell::{Dispatcher, HookConfig, SystemLauncher};
use std::io;

fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    let config = HookConfig::from_args(&args);
    log::debug!("config: {:?}", config);

    let mut dispatcher = Dispatcher::new(&config, SystemLauncher, io::stdout());
    match dispatcher.run(io::stdin().lock()) {
        Ok(outcome) => log::debug!("done: {:?}", outcome),
        Err(e) => dispatcher.record_failure(&e),
    }
    // Always exit 0, whatever happened above.
}

/// Diagnostics go to stderr and are off unless asked for.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "off" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .try_init();
}
