use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::DEFAULT_STATUS_COLUMN;

#[derive(Parser)]
#[command(name = "purgo")]
#[command(about = "Company restriction checks against a master list and Companies House", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Login username (prompted when omitted)
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Login password (prompted when omitted)
    #[arg(long, global = true)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a company list against the master list
    Check {
        /// Master workbook (Name, Company Registration Number, Account Partner)
        #[arg(required = true)]
        master: PathBuf,

        /// Workbook to check (Name, Company Registration Number)
        #[arg(required = true)]
        check: PathBuf,

        /// Output file or directory (default: Updated_Check_File.xlsx next to the check file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the registration number search for blank numbers
        #[arg(long)]
        no_enrich: bool,

        /// Skip the Company Status column
        #[arg(long)]
        no_status: bool,
    },

    /// Look up numbers for new accounts and append them to the master list
    Ingest {
        /// Workbook of new accounts (Name)
        #[arg(required = true)]
        new_accounts: PathBuf,

        /// Master workbook to extend
        #[arg(required = true)]
        master: PathBuf,

        /// Output file or directory (default: Updated_<master> next to the master)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch the trading status for every number in one column
    Status {
        /// Input workbook
        #[arg(required = true)]
        input: PathBuf,

        /// Column holding registration numbers
        #[arg(short, long, default_value = DEFAULT_STATUS_COLUMN)]
        column: String,

        /// Output file or directory (default: <input>_status.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or edit settings
    Config {
        /// Store the Companies House API key
        #[arg(long)]
        set_api_key: Option<String>,

        /// Print the current settings
        #[arg(long)]
        show: bool,
    },
}
