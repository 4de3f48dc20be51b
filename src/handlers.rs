use crate::compose::{compose, mailto_uri};
use crate::errors::AppError;
use crate::models::{DelayForm, EventType, JobConfig, LogEntry, SendRequest, SendResponse};
use crate::state::AppState;
use crate::storage::{persist_config, persist_log};
use crate::ui;
use axum::{
    Form, Json,
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect},
};
use chrono::Local;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let config = state.config.lock().await;
    Html(ui::render_index(config.as_ref()))
}

pub async fn service_worker() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], ui::SW_JS)
}

pub async fn get_config(State(state): State<AppState>) -> Json<Option<JobConfig>> {
    let config = state.config.lock().await;
    Json(config.clone())
}

pub async fn save_config(
    State(state): State<AppState>,
    Json(payload): Json<JobConfig>,
) -> Result<Json<JobConfig>, AppError> {
    let saved = apply_config(&state, payload).await?;
    Ok(Json(saved))
}

/// Scriptless settings form; lands back on the page so it can re-route.
pub async fn save_config_form(
    State(state): State<AppState>,
    Form(payload): Form<JobConfig>,
) -> Result<Redirect, AppError> {
    apply_config(&state, payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_log(State(state): State<AppState>) -> Json<Vec<LogEntry>> {
    let log = state.log.lock().await;
    Json(log.day(&today_key()).to_vec())
}

pub async fn send(
    State(state): State<AppState>,
    Json(payload): Json<SendRequest>,
) -> Result<Json<SendResponse>, AppError> {
    let event = EventType::from_action(payload.action.trim())
        .ok_or_else(|| AppError::bad_request("action must be 'start', 'end', or 'delay'"))?;

    let response = dispatch(&state, event, payload.reason).await?;
    Ok(Json(response))
}

pub async fn send_start_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let response = dispatch(&state, EventType::StartOfDay, None).await?;
    Ok(Redirect::to(&response.mailto))
}

pub async fn send_end_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let response = dispatch(&state, EventType::EndOfDay, None).await?;
    Ok(Redirect::to(&response.mailto))
}

pub async fn send_delay_form(
    State(state): State<AppState>,
    Form(payload): Form<DelayForm>,
) -> Result<Redirect, AppError> {
    let response = dispatch(&state, EventType::DelayReport, payload.reason).await?;
    Ok(Redirect::to(&response.mailto))
}

async fn apply_config(state: &AppState, payload: JobConfig) -> Result<JobConfig, AppError> {
    let cfg = payload.trimmed();
    {
        let mut config = state.config.lock().await;
        *config = Some(cfg.clone());
        persist_config(&state.paths.config, &cfg).await?;
    }

    info!("saved job configuration for {} / {}", cfg.client, cfg.jobsite);
    Ok(cfg)
}

/// Compose the email, record it under today's date-key, and hand back the
/// mailto URI for the page to navigate to.
async fn dispatch(
    state: &AppState,
    event: EventType,
    reason: Option<String>,
) -> Result<SendResponse, AppError> {
    let cfg = {
        let config = state.config.lock().await;
        match config.as_ref().filter(|cfg| cfg.is_complete()) {
            Some(cfg) => cfg.clone(),
            None => {
                return Err(AppError::conflict(
                    "complete the job configuration before sending",
                ));
            }
        }
    };

    let reason = match event {
        EventType::DelayReport => Some(delay_reason(reason)),
        _ => None,
    };
    let email = compose(event, &cfg, reason.as_deref());
    let mailto = mailto_uri(&email.subject, &email.body);

    let entry = LogEntry {
        kind: event,
        time: email.time,
    };
    {
        let mut log = state.log.lock().await;
        log.append(today_key(), entry.clone());
        persist_log(&state.paths.log, &log).await?;
    }

    info!("{} email composed for {}", event.label(), cfg.client);
    Ok(SendResponse { mailto, entry })
}

fn delay_reason(reason: Option<String>) -> String {
    reason
        .map(|reason| reason.trim().to_string())
        .filter(|reason| !reason.is_empty())
        .unwrap_or_else(|| "No reason provided".to_string())
}

fn today_key() -> String {
    Local::now().date_naive().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_delay_reasons_fall_back_to_the_fixed_text() {
        assert_eq!(delay_reason(None), "No reason provided");
        assert_eq!(delay_reason(Some("   ".to_string())), "No reason provided");
        assert_eq!(delay_reason(Some(String::new())), "No reason provided");
        assert_eq!(
            delay_reason(Some(" flat tire ".to_string())),
            "flat tire"
        );
    }
}
