use clap::Parser;
use counsel_portfolio::config::{CliArgs, Command, OutputFormat};
use counsel_portfolio::data::cases::{to_csv, to_json};
use counsel_portfolio::domain::model::CaseRecord;
use counsel_portfolio::domain::ports::Notifier;
use counsel_portfolio::utils::logger;
use counsel_portfolio::{
    CaseCatalog, ConsoleNotifier, HttpSubscriptionClient, PortfolioError, SubmitOutcome,
    SubscriptionService, TomlConfig, TracingNotifier,
};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(args.verbose);
            fail(&e);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_with_level(args.verbose, config.log_level());
    }
    tracing::debug!("CLI args: {:?}", args);

    let result = match &args.command {
        Command::Cases { format, .. } => {
            let query = args.command.case_query().unwrap_or_default();
            list_cases(&query, *format)
        }
        Command::Subscribe { name, email, phone } => {
            subscribe(config, name, email.as_deref(), phone.as_deref()).await
        }
    };

    if let Err(e) = result {
        fail(&e);
    }
}

fn load_config(args: &CliArgs) -> counsel_portfolio::Result<TomlConfig> {
    let mut config = match &args.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.clone());
    }
    // 後端設定留到 subscribe 再驗證，離線列出案件不受影響
    config.validate_monitoring()?;
    Ok(config)
}

fn list_cases(
    query: &counsel_portfolio::CaseQuery,
    format: OutputFormat,
) -> counsel_portfolio::Result<()> {
    let catalog = CaseCatalog::builtin()?;
    let records = catalog.filter(query);
    tracing::info!("📁 {} of {} cases match", records.len(), catalog.len());

    match format {
        OutputFormat::Json => println!("{}", to_json(&records)?),
        OutputFormat::Csv => print!("{}", to_csv(&records)?),
        OutputFormat::Table => {
            for record in records {
                println!("{}", table_row(record));
            }
        }
    }
    Ok(())
}

fn table_row(record: &CaseRecord) -> String {
    let status = record
        .outcome
        .as_deref()
        .or(record.stage.as_deref())
        .unwrap_or("-");
    let marker = if record.is_own_case { "*" } else { " " };
    format!(
        "{} {:<9} {} {:<14} {:<10} {}",
        marker, record.id, record.judgment_date, record.legal_area, status, record.title
    )
}

async fn subscribe(
    config: TomlConfig,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> counsel_portfolio::Result<()> {
    config.validate_backend()?;
    let json_logs = config.json_logs();
    let client = HttpSubscriptionClient::new(config);
    tracing::info!("🚀 Subscribing via {}", client.endpoint());

    let outcome = if json_logs {
        run_subscription(client, TracingNotifier, name, email, phone).await
    } else {
        run_subscription(client, ConsoleNotifier, name, email, phone).await
    };

    match outcome {
        SubmitOutcome::Subscribed(_) => Ok(()),
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in &errors {
                eprintln!("❌ {}: {}", field, message);
            }
            std::process::exit(1);
        }
        SubmitOutcome::Rejected(_) | SubmitOutcome::TransportFailed(_) | SubmitOutcome::Busy => {
            std::process::exit(2);
        }
    }
}

async fn run_subscription<N: Notifier>(
    client: HttpSubscriptionClient<TomlConfig>,
    notifier: N,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> SubmitOutcome {
    SubscriptionService::new(client, notifier)
        .subscribe(name, email, phone)
        .await
}

fn fail(e: &PortfolioError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}
