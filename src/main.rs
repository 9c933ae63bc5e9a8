mod telemetry;

use daymark_reminders_api::{execute, SyncGroupRemindersUseCase};
use daymark_reminders_api_structs::dtos::ReminderTemplateGroupDTO;
use daymark_reminders_domain::ReminderTemplateGroup;
use daymark_reminders_infra::{setup_context, Config};
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("daymark_reminders".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context();

    let groups = load_groups(&context.config)?;
    info!("Loaded {} reminder group(s)", groups.len());
    for group in groups {
        let _ = execute(SyncGroupRemindersUseCase { group }, &context).await;
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    Ok(())
}

/// Loads the persisted reminder groups the daemon schedules on startup.
/// A missing file means an empty start, a present but unreadable file is
/// an error.
fn load_groups(config: &Config) -> anyhow::Result<Vec<ReminderTemplateGroup>> {
    let raw = match std::fs::read_to_string(&config.reminders_file) {
        Ok(raw) => raw,
        Err(_) => {
            info!(
                "No reminder file found at {}. Starting with no reminder groups.",
                config.reminders_file
            );
            return Ok(Vec::new());
        }
    };
    let dtos: Vec<ReminderTemplateGroupDTO> = serde_json::from_str(&raw)?;
    Ok(dtos.into_iter().map(|dto| dto.to_domain()).collect())
}
