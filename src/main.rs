use clap::Parser;
use exn::ResultExt;
use moji::error::{ErrorKind, Result};
use moji::{Config, Pipeline, Report};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "moji", version)]
#[command(about = "Build emoji spritesheets, stylesheets and lookup tables")]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Repository root; overrides the configured one
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.verbose);
    match run(&args) {
        Ok(report) => {
            tracing::info!(
                fingerprint = %report.fingerprint,
                outcome = ?report.outcome,
                entry = %report.entry.display(),
                "Emoji assets ready"
            );
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> Result<Report> {
    let mut config = Config::load(args.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(root) = &args.root {
        config = config.with_root(root);
    }
    Pipeline::new(&config).run()
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        true => EnvFilter::new("moji=debug,info"),
        false => EnvFilter::new("info"),
    });
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
