use std::io::{self, Write};
use std::path::PathBuf;

use tacplot_app::{AppError, AppResult, load_config, load_script, run};

const USAGE: &str = "tacplot <script.json> [--config <config.json>]";

struct Args {
    script: PathBuf,
    config: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> AppResult<Args> {
    let mut script = None;
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| AppError::Usage(USAGE.to_string()))?;
                config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Err(AppError::Usage(USAGE.to_string())),
            _ if script.is_none() => script = Some(PathBuf::from(arg)),
            _ => return Err(AppError::Usage(USAGE.to_string())),
        }
    }
    let script = script.ok_or_else(|| AppError::Usage(USAGE.to_string()))?;
    Ok(Args { script, config })
}

fn execute() -> AppResult<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = load_config(args.config.as_deref())?;
    let script = load_script(&args.script)?;
    log::info!("Replaying {} ({} steps)", args.script.display(), script.steps.len());

    let report = run(&script, config);
    log::info!(
        "{} shape(s) stored, {} session(s) ended",
        report.shapes.len(),
        report.outcomes.len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out).map_err(|source| AppError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    })?;
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = execute() {
        log::error!("{}", err);
        eprintln!("tacplot: {err}");
        std::process::exit(1);
    }
}
