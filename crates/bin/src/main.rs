use std::io::Read;
use std::process::ExitCode;

use auxdata::Registry;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{CheckArgs, Cli, Commands};

mod cli;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("auxdata=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let registry = Registry::with_builtins();

    match cli.command {
        Commands::Check(args) => check(&registry, args),
        Commands::List => {
            list(&registry);
            ExitCode::SUCCESS
        }
    }
}

/// Validate one auxiliary-data string; the rejection reason goes to stderr
/// and the exit code reflects validity.
fn check(registry: &Registry, args: CheckArgs) -> ExitCode {
    let aux_data = match args.aux_data {
        Some(data) => data,
        None => {
            let mut buffer = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
                eprintln!("failed to read aux data from stdin: {e}");
                return ExitCode::FAILURE;
            }
            buffer
        }
    };

    let resolved = if args.allow.is_empty() {
        registry.resolve(&args.aux_data_type)
    } else {
        registry.resolve_with_allow_list(&args.aux_data_type, &args.allow)
    };
    let validator = match resolved {
        Ok(validator) => validator,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match validator.validate(&aux_data) {
        Ok(()) => {
            tracing::info!("accepted {} aux data", validator.aux_data_type());
            println!("valid ({})", validator.aux_data_type());
            ExitCode::SUCCESS
        }
        Err(rejection) => {
            eprintln!("invalid: {}", rejection.reason());
            ExitCode::FAILURE
        }
    }
}

/// Print the registered canonical types and their aliases.
fn list(registry: &Registry) {
    let mut types: Vec<&str> = registry.aux_data_types().collect();
    types.sort_unstable();
    println!("types:");
    for aux_data_type in types {
        println!("  {aux_data_type}");
    }

    let mut aliases: Vec<(&str, &str)> = registry.aliases().collect();
    aliases.sort_unstable();
    println!("aliases:");
    for (alias, target) in aliases {
        println!("  {alias} -> {target}");
    }
}
