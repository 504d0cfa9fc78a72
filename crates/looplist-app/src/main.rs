use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;

use looplist_app::application::config::AppConfig;
use looplist_app::application::dtos::{LoginInput, UpdateDayStatusInput};
use looplist_app::presentation::commands::*;
use looplist_app::presentation::state::AppState;
use looplist_domain::habit_loop::DayStatus;
use looplist_infrastructure::clock::SystemClock;

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid LOOPLIST_* configuration")?;
    init_logging(&config);

    tracing::info!("🚀 Starting app state initialization...");
    let state = AppState::new(&config, Arc::new(SystemClock))
        .await
        .context("Failed to initialize app state")?;
    tracing::info!("✅ App state initialized successfully");

    let session = login(
        LoginInput {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        },
        &state,
    )
    .await?;
    tracing::info!("Signed in as {} ({})", session.user.name, session.user.id);

    check_in_first_pending(&state).await?;

    print_json("dashboard", &get_dashboard_stats(&state).await?)?;
    print_json("loops", &get_loops(&state).await?)?;
    print_json("public", &get_public_loops(&state).await?)?;
    print_json("notifications", &take_notifications(&state).await?)?;

    Ok(())
}

/// Check in today on the first loop still waiting for it
async fn check_in_first_pending(state: &AppState) -> anyhow::Result<()> {
    let today = state.runtime.clock.today();
    let loops = get_loops(state).await?;
    let Some(pending) = loops
        .iter()
        .find(|l| l.days.get(&today) == Some(DayStatus::Pending))
    else {
        tracing::info!("Nothing to check in for {}", today);
        return Ok(());
    };

    let updated = update_day_status(
        UpdateDayStatusInput {
            loop_id: pending.id.clone(),
            date: None,
            status: DayStatus::Checked.to_string(),
        },
        state,
    )
    .await?;
    tracing::info!(
        "Checked in \"{}\": streak={} rate={:.1}",
        updated.title,
        updated.current_streak,
        updated.completion_rate
    );
    Ok(())
}

fn print_json<T: serde::Serialize>(label: &str, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("== {label} ==\n{json}");
    Ok(())
}

fn init_logging(config: &AppConfig) {
    let log_dir = config.log_dir.clone().unwrap_or_else(default_log_dir);

    match looplist_infrastructure::logging::init_logger(log_dir.clone()) {
        Ok(_) => {
            tracing::info!("🚀 LoopList starting...");
            tracing::info!("📝 File logging initialized at: {}", log_dir.display());
        }
        Err(e) => {
            eprintln!("⚠️  Failed to initialize file logging: {}", e);
            eprintln!("   Falling back to console logging only");

            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .try_init();
        }
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("looplist")
        .join("logs")
}
