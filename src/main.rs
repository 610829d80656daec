use std::process::ExitCode;
use uinputctl::cli::{self, CliError, USAGE};
use uinputctl::touch::ScreenScale;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let result = ScreenScale::from_env()
        .map_err(|e| CliError::Usage(e.to_string()))
        .and_then(|scale| cli::parse(std::env::args().skip(1), scale))
        .and_then(|invocation| cli::run(&invocation));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ CliError::Usage(_)) => {
            eprintln!("uinputctl: {}", e);
            eprint!("{USAGE}");
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            // Fatal errors reach stderr even when RUST_LOG silences them.
            if log::log_enabled!(log::Level::Error) {
                log::error!("{}", e);
            } else {
                eprintln!("uinputctl: {}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
