use clap::Parser;
use env_logger::Env;
use log::debug;
use std::process::exit;

use certdays::{check_expiry, CheckError, Config};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Site name to check, e.g. example.com
    #[arg(long, default_value = "")]
    site: String,
}

fn run(config: Config) -> Result<i64, CheckError> {
    debug!("checking certificate of {}", config.site);
    check_expiry(&config.site)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let result = Config::from_cli_args(Some(args.site))
        .map_err(CheckError::from)
        .and_then(run);

    match result {
        Ok(days) => println!("{}", days),
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    }
}
