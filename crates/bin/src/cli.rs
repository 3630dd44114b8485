//! CLI argument definitions for the Auxdata binary.

use clap::{Parser, Subcommand};

/// Auxdata key-material validator
#[derive(Parser, Debug)]
#[command(name = "auxdata")]
#[command(about = "Validate serialized public-key material (auxiliary data)")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a single auxiliary-data string
    Check(CheckArgs),
    /// List registered aux data types and aliases
    List,
}

/// Arguments for the check command
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Aux data type or alias to validate against
    #[arg(short = 't', long = "type", default_value = "age", env = "AUXDATA_TYPE")]
    pub aux_data_type: String,

    /// Restrict resolution to these canonical type identifiers (repeatable)
    #[arg(short, long = "allow", env = "AUXDATA_ALLOW")]
    pub allow: Vec<String>,

    /// The auxiliary data string; read from stdin when omitted
    pub aux_data: Option<String>,
}
