use anyhow::{Context, Result};
use clap::Parser;

use release_bump::cli::orchestration::{ReleaseOptions, ReleaseOutcome, ReleaseWorkflow};
use release_bump::cli::{self, Args};
use release_bump::config;
use release_bump::deps::CommandCheck;
use release_bump::git::{Git2Repository, VersionControl};
use release_bump::ui::{self, AssumeYes, Confirm, TerminalPrompt};
use release_bump::ReleaseError;

fn initialize_logger(verbose: bool) -> Result<()> {
    let filter = if verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Warn
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_bump")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version land here too, on stdout
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(e) = initialize_logger(args.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let version = match cli::validate_arguments(&args) {
        Ok(version) => version.to_string(),
        Err(e) => {
            ui::display_error(&e.to_string());
            eprintln!("{}", cli::USAGE);
            eprintln!("{}", cli::EXAMPLE);
            std::process::exit(e.exit_code());
        }
    };

    match run(&args, &version) {
        Ok(_) => {}
        Err(e) => {
            let code = match e.downcast_ref::<ReleaseError>() {
                Some(release_error) => release_error.exit_code(),
                None => 1,
            };
            ui::display_error(&format!("{:#}", e));
            std::process::exit(code);
        }
    }
}

fn run(args: &Args, version: &str) -> Result<ReleaseOutcome> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    let repo = Git2Repository::open(&cwd).context("Not in a git repository")?;

    let config = config::load_config(args.config.as_deref(), repo.root())
        .context("Error loading config")?;
    let check = CommandCheck::from_command(&config.dependency_check.command)?;
    let options = ReleaseOptions {
        dry_run: args.dry_run,
    };

    let outcome = if args.yes {
        execute(&repo, &check, &AssumeYes, &config, version, &options)?
    } else {
        execute(&repo, &check, &TerminalPrompt::new(), &config, version, &options)?
    };

    Ok(outcome)
}

fn execute<P: Confirm>(
    repo: &Git2Repository,
    check: &CommandCheck,
    prompt: &P,
    config: &config::Config,
    version: &str,
    options: &ReleaseOptions,
) -> release_bump::Result<ReleaseOutcome> {
    ReleaseWorkflow::new(repo, check, prompt, config).run(version, options)
}
