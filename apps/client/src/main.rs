//! `brawl` - command-line client for the reminder service.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use brawl_client::config::DEFAULT_API_URL;
use brawl_client::input::parse_event_time;
use brawl_client::{
    ClientConfig, ClientError, GatewayClient, NotificationScheduler, ReminderBoard, Session,
};
use brawl_core::ports::{Notifier, Permission};
use brawl_infra::{ConsoleNotifier, WebhookNotifier};
use brawl_shared::dto::ReminderResponse;

#[derive(Parser)]
#[command(name = "brawl")]
#[command(about = "Brawl reminders client", version)]
struct Cli {
    /// Base URL of the API server.
    #[arg(long, global = true, env = "BRAWL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Where the session token is kept.
    #[arg(long, global = true, env = "BRAWL_SESSION_FILE")]
    session_file: Option<PathBuf>,
    /// Post notifications to this webhook instead of the terminal.
    #[arg(long, global = true, env = "BRAWL_NOTIFY_WEBHOOK")]
    notify_webhook: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BRAWL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BRAWL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Show reminders, optionally only those on one local day (YYYY-MM-DD).
    List {
        #[arg(long)]
        day: Option<NaiveDate>,
    },
    Add {
        #[arg(long)]
        title: String,
        /// "YYYY-MM-DD HH:MM" in local time, or an RFC 3339 instant.
        #[arg(long)]
        at: String,
    },
    Delete { id: Uuid },
    /// Keep running, refreshing the list and firing notifications as reminders come due.
    Watch {
        #[arg(long, default_value_t = 60)]
        refresh_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,brawl_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::new(cli.api_url, cli.session_file, cli.notify_webhook);
    let session = Session::load(&config.session_file)
        .with_context(|| format!("loading {}", config.session_file.display()))?;
    let mut gateway = GatewayClient::new(config.api_url.clone(), session);

    let outcome = run(cli.command, &config, &mut gateway).await;
    if let Err(ClientError::SessionExpired) = &outcome {
        eprintln!("Session expired. Run `brawl login` again.");
    }
    outcome.map_err(Into::into)
}

async fn run(
    command: Commands,
    config: &ClientConfig,
    gateway: &mut GatewayClient,
) -> Result<(), ClientError> {
    match command {
        Commands::Register { email, password } => {
            gateway.register(&email, &password).await?;
            println!("Registered and logged in as {}", email.trim());
        }
        Commands::Login { email, password } => {
            gateway.login(&email, &password).await?;
            println!("Logged in as {}", email.trim());
        }
        Commands::Logout => {
            gateway.logout()?;
            println!("Logged out");
        }
        Commands::List { day } => {
            let mut board = ReminderBoard::new();
            board.replace(gateway.list().await?);
            let shown: Vec<&ReminderResponse> = match day {
                Some(day) => board.on_day(day),
                None => board.all().iter().collect(),
            };
            if shown.is_empty() {
                println!("No reminders");
            }
            for reminder in shown {
                print_reminder(reminder);
            }
        }
        Commands::Add { title, at } => {
            let event_time = parse_event_time(&at)?;
            let reminder = gateway.create(&title, event_time).await?;
            print_reminder(&reminder);
        }
        Commands::Delete { id } => {
            let msg = gateway.delete(id).await?;
            println!("{}", msg);
        }
        Commands::Watch { refresh_secs } => watch(config, gateway, refresh_secs).await?,
    }
    Ok(())
}

fn notifier_for(config: &ClientConfig) -> Arc<dyn Notifier> {
    match &config.notify_webhook {
        Some(url) => Arc::new(WebhookNotifier::new(url.clone())),
        None => Arc::new(ConsoleNotifier::new()),
    }
}

/// Refresh periodically and keep the scheduler in step until Ctrl-C.
async fn watch(
    config: &ClientConfig,
    gateway: &mut GatewayClient,
    refresh_secs: u64,
) -> Result<(), ClientError> {
    if !gateway.session().is_logged_in() {
        return Err(ClientError::NotLoggedIn);
    }

    let mut scheduler = NotificationScheduler::new(notifier_for(config));
    if scheduler.start().await == Permission::Denied {
        println!("Notifications are disabled; reminders will not alert.");
    }

    let mut board = ReminderBoard::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(refresh_secs.max(1)));

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    println!("Watching reminders. Press Ctrl-C to stop.");
    loop {
        tokio::select! {
            _ = ticker.tick() => match gateway.list().await {
                Ok(reminders) => {
                    board.replace(reminders);
                    let report = scheduler.sync(board.all());
                    tracing::info!(
                        reminders = board.len(),
                        pending = scheduler.pending(),
                        armed = report.armed,
                        cancelled = report.cancelled,
                        "Refreshed"
                    );
                }
                Err(ClientError::SessionExpired) => {
                    scheduler.cancel_all();
                    return Err(ClientError::SessionExpired);
                }
                Err(e) => tracing::warn!(error = %e, "Refresh failed, retrying on next tick"),
            },
            _ = &mut shutdown => break,
        }
    }

    scheduler.cancel_all();
    Ok(())
}

fn print_reminder(reminder: &ReminderResponse) {
    println!(
        "{}  {}  {}",
        reminder.id,
        reminder.event_time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        reminder.title
    );
}
