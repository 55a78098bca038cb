use crate::data::CaseQuery;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "counsel-portfolio")]
#[command(about = "Browse the case portfolio and subscribe to updates")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override backend.base_url from the config
    #[arg(long)]
    pub base_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List portfolio cases
    Cases {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        area: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        /// Only cases argued by the firm
        #[arg(long)]
        own: bool,

        /// Case-insensitive search over title, citation, court and tags
        #[arg(long)]
        search: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Subscribe to updates
    Subscribe {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: Option<String>,

        /// 10-digit Indian mobile number; non-digits are stripped
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl Command {
    pub fn case_query(&self) -> Option<CaseQuery> {
        match self {
            Command::Cases {
                year,
                area,
                tag,
                own,
                search,
                ..
            } => Some(CaseQuery {
                year: *year,
                legal_area: area.clone(),
                tag: tag.clone(),
                own_cases_only: *own,
                search: search.clone(),
            }),
            Command::Subscribe { .. } => None,
        }
    }
}
