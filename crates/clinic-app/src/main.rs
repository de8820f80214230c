mod console;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use clinic_client::{ClinicApi, HttpApi};
use clinic_portal::surface::Field;
use clinic_portal::{BackendHandle, Outcome, Portal, PortalConfig};

use console::ConsolePage;

const HELP: &str = "\
Commands:
  /patients                                  reload the patient list
  /appointments                              reload the appointment list
  /register name|age|gender|phone|email      register a patient
  /schedule patient_id|doctor|datetime|notes schedule an appointment
  /as <patient_id>                           chat as a patient (empty for anonymous)
  /history <patient_id>                      show a patient's conversation
  /quit                                      exit
Anything else is sent as a chat message.";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "clinic_portal=debug,clinic_client=debug,clinic_app=info".into()
                }),
        )
        .init();

    let config = PortalConfig::from_env()?;
    let backend = BackendHandle::from_config(&config)?;

    if let Some(api) = backend.api() {
        match api.health().await {
            Ok(health) if health.is_ok() => info!("Backend at {} is healthy", api.origin()),
            Ok(health) => warn!(
                "Backend at {} reports {}: {}",
                api.origin(),
                health.status,
                health.detail.as_deref().unwrap_or("no detail")
            ),
            Err(e) => warn!("Backend health check failed: {}", e),
        }
    }

    let page = ConsolePage::new();
    let portal = Portal::new(backend, page.view(), &config);
    let refresh = portal.start().await;

    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    if !handle_line(&portal, &page, line.trim_end()).await {
                        break;
                    }
                }
                None => break,
            },
            _ = &mut shutdown => break,
        }
    }

    refresh.cancel();
    info!("Portal stopped");
    Ok(())
}

/// Run one console command. Returns false when the user asked to quit.
///
/// The first word must match a command exactly; any other line, including
/// one that merely starts with a command name, is a chat message.
async fn handle_line(portal: &Portal<HttpApi>, page: &ConsolePage, line: &str) -> bool {
    let (command, args) = line.split_once(' ').unwrap_or((line, ""));

    match command {
        "/quit" => return false,
        "/help" => println!("{HELP}"),
        "/patients" => portal.patients.load().await,
        "/appointments" => portal.appointments.load().await,
        "/register" => {
            fill(&[&page.name, &page.age, &page.gender, &page.phone, &page.email], args);
            log_outcome("register", portal.register.submit().await);
        }
        "/schedule" => {
            fill(
                &[&page.appt_patient_id, &page.doctor, &page.datetime, &page.notes],
                args,
            );
            log_outcome("schedule", portal.schedule.submit().await);
        }
        "/as" => page.chat_patient_id.set_value(args.trim()),
        "/history" => match args.trim().parse::<i64>() {
            Ok(id) => match portal.chat_history(id) {
                Some(loader) => loader.load().await,
                None => warn!("No conversation view"),
            },
            Err(_) => println!("usage: /history <patient_id>"),
        },
        _ => {
            page.chat_message.set_value(line);
            log_outcome("chat", portal.chat.send().await);
        }
    }

    true
}

/// Assign `|`-separated values to fields in order. Missing trailing values
/// leave their fields untouched so form defaults survive.
fn fill(fields: &[&std::sync::Arc<clinic_portal::memory::MemoryField>], args: &str) {
    let args = args.trim();
    if args.is_empty() {
        return;
    }
    for (field, value) in fields.iter().zip(args.split('|')) {
        field.set_value(value.trim());
    }
}

fn log_outcome(action: &str, outcome: Outcome) {
    match outcome {
        Outcome::Accepted(id) => info!(?id, "{} accepted", action),
        Outcome::Rejected(reason) => warn!("{} rejected: {}", action, reason),
        Outcome::Failed(reason) => warn!("{} failed: {}", action, reason),
        Outcome::Invalid(reason) => info!("{} not sent: {}", action, reason),
    }
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    ctrl_c.await.ok();
                    info!("Received Ctrl+C, shutting down...");
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
