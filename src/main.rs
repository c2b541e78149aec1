use std::process::ExitCode;
use std::sync::Arc;

use pkgserve::config::{self, AppState, Config};
use pkgserve::error::StartupError;
use pkgserve::{logger, server};

const USAGE: &str = "usage: pkgserve [-c <config file>]";

fn main() -> ExitCode {
    let config_path = match parse_args(std::env::args().skip(1)) {
        Ok(Some(path)) => path,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(StartupError::PortInUse { port }) => {
            logger::log_port_in_use(port);
            ExitCode::FAILURE
        }
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Config path from `-c <path>` / `--config <path>`, `None` when help was asked for
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<String>, String> {
    let mut config_path = config::DEFAULT_CONFIG_PATH.to_string();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                config_path = args
                    .next()
                    .ok_or_else(|| format!("{arg} needs a file path"))?;
            }
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(Some(config_path))
}

fn run(config_path: &str) -> Result<(), StartupError> {
    let cfg = Config::load_from(config_path)?;
    logger::init(&cfg).map_err(StartupError::Logger)?;

    // Worker thread count follows `server.workers`, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), StartupError> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;
    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(AppState::new(cfg));
    server::start_server_loop(listener, state, server::shutdown_signal()).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(args(&[])), Ok(Some("pkgserve".to_string())));
        assert_eq!(
            parse_args(args(&["-c", "site.toml"])),
            Ok(Some("site.toml".to_string()))
        );
        assert_eq!(parse_args(args(&["--help"])), Ok(None));
        assert!(parse_args(args(&["-c"])).is_err());
        assert!(parse_args(args(&["--port", "9"])).is_err());
    }
}
