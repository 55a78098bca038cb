pub mod adapters;
pub mod config;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::TomlConfig;

pub use adapters::{ConsoleNotifier, HttpSubscriptionClient, TracingNotifier};
pub use crate::core::{
    form::{SubmitOutcome, SubscriptionForm},
    service::SubscriptionService,
    validation::Field,
};
pub use data::{CaseCatalog, CaseQuery};
pub use utils::error::{PortfolioError, Result};
