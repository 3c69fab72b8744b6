use simpsh::core::config::{ConfigPaths, ShellConfig};
use simpsh::error::ShellError;
use simpsh::flags::Flags;
use simpsh::highlight::Highlighter;
use simpsh::shell::Shell;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            Highlighter::new().report(&e);
            1
        }
    };

    let _ = io::stdout().flush();
    process::exit(code);
}

fn run() -> Result<i32, ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(0);
    }

    if flags.is_set("version") {
        println!("simpsh {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    init_logging(flags.is_set("debug"));

    let paths = ConfigPaths::new(flags.get_value("config").map(PathBuf::from));
    let config = ShellConfig::load(&paths)?;

    let mut shell = Shell::new(config)?;
    shell.run()
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
