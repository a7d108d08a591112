use anyhow::Result;
use clap::{CommandFactory, Parser};
use renumber_core::{
    should_use_color, Config, OutputFormatter, RangeError, RenumberError, VersionResult,
};
use std::io;
use std::num::ParseIntError;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;
mod insert;
mod list;
mod normalize;
mod parse;
mod shift;

use cli::{Cli, Commands, OutputFormat};

fn main() {
    // Renames are never abandoned halfway; a signal only changes the exit code
    let interrupted = Arc::new(AtomicBool::new(false));

    let interrupted_clone = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        eprintln!("\nReceived SIGINT. Finishing the current batch...");
        interrupted_clone.store(true, Ordering::SeqCst);
    })
    .expect("Error setting SIGINT handler");

    let interrupted_clone = Arc::clone(&interrupted);
    unsafe {
        signal_hook::low_level::register(signal_hook::consts::SIGTERM, move || {
            eprintln!("\nReceived SIGTERM. Finishing the current batch...");
            interrupted_clone.store(true, Ordering::SeqCst);
        })
        .expect("Error setting SIGTERM handler");
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        process::exit(2);
    });

    let use_color = !cli.no_color && should_use_color(config.defaults.use_color);

    let mut options = config.defaults.engine_options();
    if let Some(strategy) = cli.strategy {
        options.strategy = strategy.into();
    }

    let working_dir = cli.directory.as_deref();
    tracing::debug!(?options, ?working_dir, "resolved engine options");

    let result = match cli.command {
        Commands::List {
            filter,
            table,
            hidden,
            output,
        } => {
            let filter = filter
                .or_else(|| config.defaults.list_filter.clone())
                .filter(|f| !f.is_empty());
            options.include_hidden |= hidden;
            list::handle_list(
                filter.as_deref(),
                &options,
                working_dir,
                table,
                output,
                use_color,
            )
        },

        Commands::Shift {
            target,
            amount,
            output,
        } => shift::handle_shift(&target, amount, options, working_dir, output, use_color),

        Commands::Insert {
            selection,
            index,
            output,
        } => insert::handle_insert(&selection, index, options, working_dir, output, use_color),

        Commands::Normalize { width, output } => {
            normalize::handle_normalize(width, options, working_dir, output, use_color)
        },

        Commands::Parse { output } => parse::handle_parse(options, working_dir, output, use_color),

        Commands::Version { output } => handle_version(output),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "renumber", &mut io::stdout());
            Ok(())
        },
    };

    // Check if we were interrupted during execution
    if interrupted.load(Ordering::SeqCst) {
        eprintln!("Operation interrupted");
        process::exit(130);
    }

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// 1 for collisions, 2 for requests rejected before anything was renamed, 3 otherwise
fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<RenumberError>() {
        return match err {
            RenumberError::Collision { .. } => 1,
            e if e.is_invalid_input() => 2,
            _ => 3,
        };
    }
    if err.downcast_ref::<RangeError>().is_some() || err.downcast_ref::<ParseIntError>().is_some()
    {
        return 2;
    }
    3
}

/// Log to stderr; `RENUMBER_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("RENUMBER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("renumber_core={default_level},{default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

pub fn print_result<T: OutputFormatter>(result: &T, output: OutputFormat) {
    let formatted = result.format(output.into());
    if formatted.ends_with('\n') {
        print!("{formatted}");
    } else {
        println!("{formatted}");
    }
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "renumber".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    print_result(&version_result, output);
    Ok(())
}
