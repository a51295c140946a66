//! Roster interactive administration console.

#![forbid(unsafe_code)]

mod command;
mod console_config;
mod console_input;
mod render;

use std::sync::Arc;
use std::time::Duration;

use roster_application::{
    DashboardService, DeleteOutcome, SaveOutcome, UserAdminError, UserAdminService,
    UserDirectoryApi,
};
use roster_core::AppError;
use roster_domain::UserId;
use roster_infrastructure::{HttpUserDirectoryApi, TracingOperationNotifier};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::{ConsoleCommand, RowRef};
use crate::console_config::ConsoleConfig;
use crate::console_input::{ConsoleInput, StdinConfirmation};
use crate::render::{HELP, render_summary, render_view};

#[derive(Debug, Error)]
enum ConsoleError {
    #[error(transparent)]
    Admin(#[from] UserAdminError),
    #[error(transparent)]
    Input(#[from] AppError),
}

enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::load()?;
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let api: Arc<dyn UserDirectoryApi> = Arc::new(HttpUserDirectoryApi::new(
        http_client,
        config.api_base_url.clone(),
    ));
    let notifier = Arc::new(TracingOperationNotifier::new());
    let input = ConsoleInput::stdin();
    let confirmation = Arc::new(StdinConfirmation::new(
        input.clone(),
        config.confirm_deletes,
    ));
    let service = UserAdminService::new(api.clone(), notifier.clone(), confirmation);
    let dashboard = DashboardService::new(api, notifier);

    info!(
        api_base_url = %config.api_base_url,
        http_timeout_secs = config.http_timeout_secs,
        confirm_deletes = config.confirm_deletes,
        "roster-console started"
    );

    if let Err(error) = service.load().await {
        warn!(error = %error, "starting with an empty directory");
    }
    println!("{}", render_view(&service.view().await));

    while let Some(line) = input.next_line("> ").await? {
        let command = match ConsoleCommand::parse(line.as_str()) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                println!("{error}");
                continue;
            }
        };

        match execute(&service, &dashboard, command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(error) => println!("{error}"),
        }
    }

    Ok(())
}

async fn execute(
    service: &UserAdminService,
    dashboard: &DashboardService,
    command: ConsoleCommand,
) -> Result<Flow, ConsoleError> {
    match command {
        ConsoleCommand::List => {}
        ConsoleCommand::Search(term) => service.set_search_term(term).await,
        ConsoleCommand::Show(row) => {
            let user_id = resolve(service, row).await?;
            service.toggle_details(&user_id).await?;
        }
        ConsoleCommand::Edit(row) => {
            let user_id = resolve(service, row).await?;
            if let Some(discarded) = service.begin_edit(&user_id).await? {
                println!("unsaved changes to {discarded} were discarded");
            }
            if service.expanded_id().await.as_ref() != Some(&user_id) {
                service.toggle_details(&user_id).await?;
            }
        }
        ConsoleCommand::Set(update) => service.update_field(update).await?,
        ConsoleCommand::Save => {
            if service.save().await? == SaveOutcome::RecordGone {
                println!("the user was deleted before the save completed");
            }
        }
        ConsoleCommand::Cancel => {
            if service.cancel_edit().await?.is_none() {
                println!("nothing to cancel");
            }
        }
        ConsoleCommand::Delete(row) => {
            let user_id = resolve(service, row).await?;
            if service.request_delete(&user_id).await? == DeleteOutcome::Declined {
                println!("delete cancelled");
            }
        }
        ConsoleCommand::Reload => {
            service.load().await?;
        }
        ConsoleCommand::Dashboard => {
            println!("{}", render_summary(&dashboard.summary().await?));
            return Ok(Flow::Continue);
        }
        ConsoleCommand::Help => {
            println!("{HELP}");
            return Ok(Flow::Continue);
        }
        ConsoleCommand::Quit => return Ok(Flow::Quit),
    }

    println!("{}", render_view(&service.view().await));
    Ok(Flow::Continue)
}

async fn resolve(service: &UserAdminService, row: RowRef) -> Result<UserId, ConsoleError> {
    match row {
        RowRef::Id(user_id) => Ok(user_id),
        RowRef::Position(position) => service
            .view()
            .await
            .rows
            .into_iter()
            .find(|row| row.position == position)
            .map(|row| row.record.id().clone())
            .ok_or_else(|| {
                ConsoleError::Input(AppError::NotFound(format!(
                    "no visible row #{position}"
                )))
            }),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
