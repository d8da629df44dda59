use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use datareon_monitor::models::packet::{Priority, ResendOptions};
use datareon_monitor::models::service::SystemHealth;
use datareon_monitor::services::exchange::parse_severity_filter;
use datareon_monitor::services::log_filter::LogBrowser;
use datareon_monitor::{
    AppState, Config, DashboardClient, Fixtures, MonitorError, ResendForm, Result,
};

#[derive(Parser)]
#[command(name = "datareon-monitor", version, about = "Datareon bus monitoring API and client")]
struct Cli {
    /// Environment file loaded before reading MONITOR_* variables
    #[arg(long, env = "MONITOR_DOTENV", default_value = ".env")]
    dotenv: PathBuf,

    /// Port to listen on (server) or to target (client commands)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// JSON file replacing the built-in sample data
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// API base URL for client commands
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Print overall system status and per-service health
    Status,
    /// Print one page of logs
    Logs {
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        service: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List incidents, optionally by severity
    Incidents {
        #[arg(long, default_value = "all")]
        severity: String,
    },
    /// Ask the API to resend a packet
    Resend {
        #[arg(long)]
        id: String,
        #[arg(long)]
        service: String,
        #[arg(long, default_value = "normal")]
        priority: Priority,
        #[arg(long)]
        force: bool,
        #[arg(long)]
        skip_validation: bool,
        #[arg(long)]
        notify: bool,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv_loaded = dotenv::from_path(&cli.dotenv).is_ok();

    initialize_tracing();
    info!("Starting Datareon monitor v{}", env!("CARGO_PKG_VERSION"));
    if dotenv_loaded {
        info!("Loaded environment from {}", cli.dotenv.display());
    }

    let config = load_config(&cli);
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(MonitorError::Config(e));
    }

    let outcome = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Status => print_status(&config).await,
        Command::Logs {
            level,
            search,
            service,
            page,
        } => print_logs(&config, level, search, service, page).await,
        Command::Incidents { severity } => print_incidents(&config, &severity).await,
        Command::Resend {
            id,
            service,
            priority,
            force,
            skip_validation,
            notify,
        } => {
            let form = ResendForm::new(&id, &service)
                .with_priority(priority)
                .with_options(ResendOptions {
                    force_resend: force,
                    skip_validation,
                    notify_on_completion: notify,
                });
            resend(&config, &form).await
        }
    };

    if let Err(e) = &outcome {
        error!("{}", e);
    }
    outcome
}

fn load_config(cli: &Cli) -> Config {
    let mut config = Config::from_env();

    if let Some(port) = cli.port {
        config.port = port;
        if cli.api_url.is_none() && std::env::var("MONITOR_API_URL").is_err() {
            config.api_base_url = format!("http://127.0.0.1:{}", port);
        }
    }

    if let Some(data_file) = &cli.data_file {
        config.data_file = Some(data_file.clone());
    }

    if let Some(api_url) = &cli.api_url {
        config.api_base_url = api_url.trim_end_matches('/').to_string();
    }

    config
}

async fn serve(config: Config) -> Result<()> {
    let fixtures = Fixtures::load(config.data_file.as_deref())?;
    let state = web::Data::new(AppState::new(fixtures));

    info!("Server is live at http://{}:{}", config.host, config.port);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(datareon_monitor::controllers::configure)
    });

    if config.workers > 0 {
        server = server.workers(config.workers);
    }

    server.bind(config.bind_address())?.run().await?;
    Ok(())
}

async fn print_status(config: &Config) -> Result<()> {
    let client = DashboardClient::from_config(config)?;
    let services = client.services().await?;

    match client.system_health().await? {
        SystemHealth::Known(status) => {
            println!(
                "System status: {} ({}% operational)",
                status.status.label(),
                status.percentage
            )
        }
        SystemHealth::Unknown => println!("System status: unknown (no services reported)"),
        SystemHealth::Loading => println!("System status: loading"),
    }

    for service in services {
        println!("  {:<24} {}", service.name, service.status.label());
    }

    Ok(())
}

async fn print_logs(
    config: &Config,
    level: Option<String>,
    search: Option<String>,
    service: Option<String>,
    page: usize,
) -> Result<()> {
    let client = DashboardClient::from_config(config)?;
    let logs = client.logs().await?;

    let mut browser = LogBrowser::new(config.logs_per_page);
    browser.set_level(level.as_deref());
    browser.set_search(search.as_deref());
    browser.set_service(service.as_deref());
    browser.goto(page, &logs);

    let view = browser.view(&logs);
    for entry in &view.entries {
        println!(
            "{} {:<5} [{}] {}",
            entry.timestamp,
            entry.level.as_str().to_uppercase(),
            entry.service,
            entry.message
        );
    }
    println!("Page {} of {} ({} entries)", view.page, view.total_pages, view.total_items);

    Ok(())
}

async fn print_incidents(config: &Config, severity: &str) -> Result<()> {
    let client = DashboardClient::from_config(config)?;
    let incidents = client
        .incidents_by_severity(parse_severity_filter(severity))
        .await?;

    for incident in incidents {
        println!(
            "[{}] {} (since {}, {})",
            incident.severity.label(),
            incident.title,
            incident.start_time,
            incident.duration
        );
    }

    Ok(())
}

async fn resend(config: &Config, form: &ResendForm) -> Result<()> {
    let client = DashboardClient::from_config(config)?;
    let response = client.resend(form).await?;
    println!("{}", response.message);
    Ok(())
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .json();

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
