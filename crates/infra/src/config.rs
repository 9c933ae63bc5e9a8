use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON file with persisted reminder groups that the
    /// daemon loads and schedules on startup
    pub reminders_file: String,
}

impl Config {
    pub fn new() -> Self {
        let default_reminders_file = "reminders.json";
        let reminders_file = match std::env::var("REMINDERS_FILE") {
            Ok(path) => path,
            Err(_) => {
                info!(
                    "Did not find REMINDERS_FILE environment variable. Falling back to the default path: {}.",
                    default_reminders_file
                );
                default_reminders_file.into()
            }
        };
        Self { reminders_file }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
