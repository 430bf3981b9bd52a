use crate::error::LoadError;
use crate::loader::load_records;
use crate::query::RawQuery;
use crate::record::Record;
use crate::sample_data::{DEFAULT_SEED, SAMPLE_SIZE, SAMPLE_USERS, generate_users};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::borrow::Cow;
use std::path::PathBuf;

/// Command line and environment configuration for the `dashboard` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dashboard",
    about = "Query the admin dashboard's user list and headline metrics"
)]
pub struct Config {
    /// Load users from a .json or .csv file instead of the generated sample
    #[arg(long, env = "DASHBOARD_DATA")]
    pub data: Option<PathBuf>,

    /// Seed for the generated sample users
    #[arg(long, env = "DASHBOARD_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of generated sample users
    #[arg(long, default_value_t = SAMPLE_SIZE)]
    pub sample_size: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search, filter, sort and page through the user list
    Users(UsersArgs),

    /// Show a single user by id
    User {
        /// User id, e.g. 17
        #[arg(allow_hyphen_values = true)]
        id: String,
    },

    /// Print dashboard totals, growth rate and best-selling products
    Summary {
        /// How many products to list
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

/// Raw list parameters; values are validated by `ListQuery::from_raw`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct UsersArgs {
    /// Case-insensitive match on name, email or id
    #[arg(long)]
    pub search: Option<String>,

    /// name, email or id (anything else sorts by name)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// asc or desc
    #[arg(long)]
    pub sort_order: Option<String>,

    /// all, active or inactive
    #[arg(long)]
    pub status: Option<String>,

    /// 1-based page number
    #[arg(long, allow_hyphen_values = true)]
    pub page: Option<String>,

    /// Users per page
    #[arg(long, env = "DASHBOARD_PAGE_SIZE", allow_hyphen_values = true)]
    pub page_size: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl UsersArgs {
    pub fn to_raw(&self) -> RawQuery {
        RawQuery {
            search: self.search.clone(),
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
            status: self.status.clone(),
            page: self.page.clone(),
            page_size: self.page_size.clone(),
        }
    }
}

impl Config {
    /// Resolve the user collection this run queries.
    ///
    /// The process-wide sample is reused when the default seed and size are
    /// requested; other combinations are generated on the spot.
    pub fn records(&self) -> Result<Cow<'static, [Record]>, LoadError> {
        if let Some(path) = &self.data {
            let records = load_records(path)?;
            info!("loaded {} users from {}", records.len(), path.display());
            return Ok(Cow::Owned(records));
        }

        if self.seed == DEFAULT_SEED && self.sample_size == SAMPLE_SIZE {
            return Ok(Cow::Borrowed(SAMPLE_USERS.as_slice()));
        }

        info!(
            "generating {} sample users with seed {}",
            self.sample_size, self.seed
        );
        Ok(Cow::Owned(generate_users(self.sample_size, self.seed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_users_command() {
        let config = Config::try_parse_from([
            "dashboard",
            "users",
            "--search",
            "am",
            "--sort-by",
            "id",
            "--page",
            "-1",
            "--page-size",
            "5",
            "--format",
            "csv",
        ])
        .unwrap();

        let Command::Users(args) = &config.command else {
            panic!("expected users command");
        };
        assert_eq!(args.format, OutputFormat::Csv);

        let raw = args.to_raw();
        assert_eq!(raw.search.as_deref(), Some("am"));
        assert_eq!(raw.sort_by.as_deref(), Some("id"));
        assert_eq!(raw.page.as_deref(), Some("-1"));
        assert_eq!(raw.page_size.as_deref(), Some("5"));
    }

    #[test]
    fn default_config_borrows_shared_sample() {
        let config = Config {
            data: None,
            seed: DEFAULT_SEED,
            sample_size: SAMPLE_SIZE,
            command: Command::Summary { top: 5 },
        };

        let records = config.records().unwrap();
        assert!(matches!(records, Cow::Borrowed(_)));
        assert_eq!(records.len(), SAMPLE_SIZE);
    }

    #[test]
    fn custom_sample_size_generates_fresh_users() {
        let config = Config {
            data: None,
            seed: 5,
            sample_size: 8,
            command: Command::Summary { top: 5 },
        };
        let records = config.records().unwrap();
        assert!(matches!(records, Cow::Owned(_)));
        assert_eq!(records.len(), 8);
    }

    #[test]
    fn missing_data_file_is_an_io_error() {
        let config = Config {
            data: Some(PathBuf::from("/nonexistent/users.json")),
            seed: DEFAULT_SEED,
            sample_size: SAMPLE_SIZE,
            command: Command::Summary { top: 5 },
        };
        assert!(matches!(config.records(), Err(LoadError::Io(_))));
    }
}
