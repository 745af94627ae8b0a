use anyhow::Result;
use daytense::cli::{self, Command};
use daytense::clock::SystemClock;
use daytense::config::Config;
use daytense::context::{AppContext, StandardContext};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli_args = cli::parse_args(&args)?;

    if cli_args.command == Command::Help {
        cli::print_help("daytense");
        return Ok(());
    }

    let ctx = StandardContext::new(cli_args.root.clone());
    let config = Config::load_or_default(&ctx)?;

    // A second init (e.g. from an embedding test harness) is harmless.
    let _ = TermLogger::init(
        config.log_level_filter(),
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    log::debug!(
        "Config file: {:?}",
        ctx.get_config_file_path().map(|p| p.display().to_string())
    );

    let clock = SystemClock;
    if cli_args.raw {
        println!("{}", cli::execute(&cli_args.command, &clock, None));
        return Ok(());
    }

    let locale = cli_args
        .locale
        .clone()
        .unwrap_or_else(|| config.effective_locale());
    let i18n = daytense::i18n::init_for(&ctx, &config, &locale)?;

    println!("{}", cli::execute(&cli_args.command, &clock, Some(&i18n)));
    Ok(())
}
