use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use roster_application::{DELETE_CONFIRMATION_PROMPT, DeleteConfirmation};
use roster_core::{AppError, AppResult};
use roster_domain::UserRecord;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::warn;

/// Line reader shared by the command loop and the delete prompt.
#[derive(Clone)]
pub struct ConsoleInput {
    lines: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl ConsoleInput {
    pub fn stdin() -> Self {
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        }
    }

    /// Prints `prompt` and waits for one line. `None` means end of input.
    pub async fn next_line(&self, prompt: &str) -> AppResult<Option<String>> {
        print!("{prompt}");
        std::io::stdout()
            .flush()
            .map_err(|error| AppError::Internal(format!("failed to flush stdout: {error}")))?;

        self.lines
            .lock()
            .await
            .next_line()
            .await
            .map_err(|error| AppError::Internal(format!("failed to read stdin: {error}")))
    }
}

/// Asks on the terminal before a delete request is sent.
pub struct StdinConfirmation {
    input: ConsoleInput,
    enabled: bool,
}

impl StdinConfirmation {
    /// With `enabled` off every delete is confirmed without asking.
    pub fn new(input: ConsoleInput, enabled: bool) -> Self {
        Self { input, enabled }
    }
}

#[async_trait]
impl DeleteConfirmation for StdinConfirmation {
    async fn confirm_delete(&self, user: &UserRecord) -> bool {
        if !self.enabled {
            return true;
        }

        let prompt = format!("{DELETE_CONFIRMATION_PROMPT} ({}) [y/N] ", user.name());
        match self.input.next_line(prompt.as_str()).await {
            Ok(Some(answer)) => is_affirmative(answer.as_str()),
            Ok(None) => false,
            Err(error) => {
                warn!(error = %error, "could not read delete confirmation");
                false
            }
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
