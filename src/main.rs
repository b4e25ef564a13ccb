use std::io;
use std::process;

use log::error;

use esquema_core::Catalog;
use esquema_plataforma::cli::{execute, Command, USAGE};
use esquema_plataforma::{AppConfig, CoreError};

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args: Vec<String> = std::env::args().skip(1).collect();
    let code = match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            if matches!(e, CoreError::Usage(_)) {
                eprintln!("{USAGE}");
            }
            e.exit_code()
        }
    };
    process::exit(code);
}

fn run(args: &[String]) -> Result<i32, CoreError> {
    let command = Command::parse(args)?;
    let mut stdout = io::stdout().lock();
    if command == Command::Help {
        // ayuda no depende del entorno
        let config = AppConfig::from_lookup(|_: &str| None)?;
        return execute(command, &config, &Catalog::platform(), &mut stdout);
    }
    let config = AppConfig::from_env()?;
    execute(command, &config, &Catalog::platform(), &mut stdout)
}
