use chrono::NaiveDate;
use std::sync::Arc;

use looplist_app::application::config::{AppConfig, BackfillMode};
use looplist_app::application::dtos::{
    CreateLoopInput, LoginInput, RegisterInput, UpdateDayStatusInput, UpdateLoopInput,
};
use looplist_app::presentation::commands::*;
use looplist_app::presentation::state::AppState;
use looplist_domain::shared::FixedClock;

// A Friday
const TODAY: &str = "2024-05-10";

async fn app() -> AppState {
    let config = AppConfig::default()
        .without_latency()
        .with_backfill(BackfillMode::Checked, None);
    let clock = Arc::new(FixedClock::new(
        NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").unwrap(),
    ));
    AppState::new(&config, clock).await.unwrap()
}

async fn sign_in(state: &AppState, email: &str) {
    login(
        LoginInput {
            email: email.to_string(),
            password: "password123".to_string(),
        },
        state,
    )
    .await
    .unwrap();
}

fn new_loop(title: &str) -> CreateLoopInput {
    CreateLoopInput {
        title: title.to_string(),
        emoji: Some("💧".to_string()),
        cover_image: None,
        frequency: "daily".to_string(),
        start_date: Some("2024-05-06".to_string()),
        end_date: None,
        visibility: "public".to_string(),
        history: None,
    }
}

#[tokio::test]
async fn test_commands_require_a_session() {
    let state = app().await;

    let err = get_loops(&state).await.unwrap_err();
    assert_eq!(err.code, 1002);

    // The public feed is open to everyone
    let feed = get_public_loops(&state).await.unwrap();
    assert_eq!(feed.len(), 6);
    assert!(get_current_user(&state).await.unwrap().is_none());
}

#[tokio::test]
async fn test_demo_user_dashboard() {
    let state = app().await;
    sign_in(&state, "demo@example.com").await;

    let loops = get_loops(&state).await.unwrap();
    assert_eq!(loops.len(), 3);

    let stats = get_dashboard_stats(&state).await.unwrap();
    assert_eq!(stats.total_loops, 3);
    assert_eq!(stats.broken_loops, 0);
    assert_eq!(stats.pending_today, 3);
}

#[tokio::test]
async fn test_create_check_in_and_edit_flow() {
    let state = app().await;
    sign_in(&state, "demo@example.com").await;

    let created = create_loop(new_loop("Drink 8 glasses of water"), &state)
        .await
        .unwrap();
    assert_eq!(created.days.len(), 5);
    assert_eq!(created.current_streak, 5);

    let checked = update_day_status(
        UpdateDayStatusInput {
            loop_id: created.id.clone(),
            date: None,
            status: "checked".to_string(),
        },
        &state,
    )
    .await
    .unwrap();
    assert_eq!(checked.completion_rate, 100.0);

    let notices = take_notifications(&state).await.unwrap();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0], "Loop created successfully");
    assert!(notices[1].starts_with("Great job!"));

    let renamed = update_loop(
        UpdateLoopInput {
            loop_id: created.id.clone(),
            title: Some("Drink 10 glasses of water".to_string()),
            ..Default::default()
        },
        &state,
    )
    .await
    .unwrap();
    assert_eq!(renamed.title, "Drink 10 glasses of water");
    assert_eq!(renamed.current_streak, 5);

    let heatmap = get_heatmap(created.id.clone(), Some(3), &state).await.unwrap();
    assert_eq!(heatmap.days.len(), 4);
    assert_eq!(heatmap.days.last().unwrap().status, "checked");

    assert!(delete_loop(created.id.clone(), &state).await.unwrap());
    let gone = get_loop(created.id, &state).await.unwrap_err();
    assert_eq!(gone.code, 2001);
}

#[tokio::test]
async fn test_validation_errors_surface_with_codes() {
    let state = app().await;
    sign_in(&state, "demo@example.com").await;

    let err = create_loop(new_loop("ab"), &state).await.unwrap_err();
    assert_eq!(err.code, 6001);

    let mut bad_frequency = new_loop("Stretch every hour");
    bad_frequency.frequency = "hourly".to_string();
    let err = create_loop(bad_frequency, &state).await.unwrap_err();
    assert_eq!(err.code, 3002);
}

#[tokio::test]
async fn test_cheer_and_clone_between_users() {
    let state = app().await;

    sign_in(&state, "demo@example.com").await;
    let created = create_loop(new_loop("Walk 5000 steps"), &state).await.unwrap();
    logout(&state).await.unwrap();

    sign_in(&state, "JANE@example.com").await;
    let cheer = toggle_cheer(created.id.clone(), "🔥".to_string(), &state)
        .await
        .unwrap();
    assert!(cheer.added);
    assert_eq!(cheer.cheers[0].user_name, "Jane Smith");

    // Not Jane's loop
    assert_eq!(get_loop(created.id.clone(), &state).await.unwrap_err().code, 2001);

    let copy = clone_loop(created.id.clone(), &state).await.unwrap();
    assert_eq!(copy.visibility, "private");
    assert_eq!(copy.start_date, TODAY);

    let feed = get_public_loops(&state).await.unwrap();
    let original = feed.iter().find(|l| l.id == created.id).unwrap();
    assert_eq!(original.user.name, "Demo User");
    assert_eq!(original.cheers.len(), 1);
    assert!(feed.iter().all(|l| l.id != copy.id));
}

#[tokio::test]
async fn test_register_and_update_profile() {
    let state = app().await;

    let session = register(
        RegisterInput {
            name: "Sam Lee".to_string(),
            email: "sam@example.com".to_string(),
            password: "hunter22".to_string(),
        },
        &state,
    )
    .await
    .unwrap();
    assert_eq!(session.token, format!("mock-jwt-token-{}", session.user.id));
    assert!(get_loops(&state).await.unwrap().is_empty());

    let updated = update_profile(
        looplist_app::application::dtos::UpdateProfileInput {
            name: Some("Samantha Lee".to_string()),
            avatar: None,
        },
        &state,
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Samantha Lee");

    let current = get_current_user(&state).await.unwrap().unwrap();
    assert_eq!(current.name, "Samantha Lee");
}
