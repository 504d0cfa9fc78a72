use chrono::Duration;
use log::info;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::application::commands::handlers::SharedBackfill;
use crate::application::config::BackfillMode;
use crate::application::services::auth_service::hash_password;
use looplist_domain::habit_loop::{HabitLoop, LoopDraft, LoopRepository};
use looplist_domain::shared::{Clock, DomainError, UserId};
use looplist_domain::user::{User, UserRepository, DEFAULT_AVATAR_BASE};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoData {
    users: Vec<DemoUser>,
    loops: Vec<DemoLoop>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoUser {
    id: String,
    name: String,
    email: String,
    /// Accounts without one cannot log in
    password: Option<String>,
    avatar_seed: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoLoop {
    owner: String,
    title: String,
    emoji: Option<String>,
    frequency: String,
    start_days_ago: i64,
    visibility: String,
    /// Falls back to the configured policy
    backfill: Option<String>,
    #[serde(default)]
    cheers: Vec<DemoCheer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoCheer {
    user_id: String,
    emoji: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoSeedReport {
    pub users_seeded: usize,
    pub loops_seeded: usize,
}

fn demo_data() -> Result<DemoData, DomainError> {
    const RAW_DATA: &str = include_str!("../../../config/demo/demo_data.json");
    serde_json::from_str(RAW_DATA)
        .map_err(|e| DomainError::Deserialization(format!("Failed to parse demo data: {e}")))
}

/// Ensure the demo accounts and their loops exist.
///
/// Users are matched by id and loops by owner and title, so running it again
/// only fills in what is missing.
pub async fn seed_demo_data(
    user_repo: Arc<dyn UserRepository>,
    loop_repo: Arc<dyn LoopRepository>,
    clock: Arc<dyn Clock>,
    backfill: SharedBackfill,
    seed: Option<u64>,
) -> Result<DemoSeedReport, DomainError> {
    let data = demo_data()?;
    let mut report = DemoSeedReport::default();

    let mut names: HashMap<String, String> = HashMap::new();
    for demo in &data.users {
        names.insert(demo.id.clone(), demo.name.clone());

        let id = UserId::from_string(&demo.id);
        if user_repo.find_by_id(&id).await?.is_some() {
            continue;
        }

        let user = User::with_id(
            id,
            demo.name.clone(),
            demo.email.clone(),
            demo.password.as_deref().map(hash_password).unwrap_or_default(),
            Some(format!("{DEFAULT_AVATAR_BASE}{}", demo.avatar_seed)),
        )?;
        user_repo.save(&user).await?;
        report.users_seeded += 1;
        info!("Seeded demo user: {} ({})", demo.name, demo.id);
    }

    let today = clock.today();
    let now = clock.now();

    for demo in &data.loops {
        let owner = UserId::from_string(&demo.owner);
        let existing: HashSet<String> = loop_repo
            .find_by_user(&owner)
            .await?
            .iter()
            .map(|l| l.title().to_string())
            .collect();
        if existing.contains(&demo.title) {
            continue;
        }

        let draft = LoopDraft {
            user_id: owner,
            title: demo.title.clone(),
            emoji: demo.emoji.clone(),
            cover_image: None,
            frequency: demo.frequency.parse()?,
            start_date: today - Duration::days(demo.start_days_ago),
            end_date: None,
            visibility: demo.visibility.parse()?,
        };

        let mut habit_loop = match demo.backfill.as_deref() {
            Some(mode) => {
                let mut policy = mode.parse::<BackfillMode>()?.policy(seed);
                HabitLoop::new(draft, today, now, &mut *policy)?
            }
            None => {
                let mut policy = backfill.lock().await;
                HabitLoop::new(draft, today, now, &mut **policy)?
            }
        };

        for cheer in &demo.cheers {
            let user_name = names.get(&cheer.user_id).ok_or_else(|| {
                DomainError::Validation(format!("Unknown demo cheer user: {}", cheer.user_id))
            })?;
            habit_loop.toggle_cheer(
                &UserId::from_string(&cheer.user_id),
                user_name,
                &cheer.emoji,
                now,
            )?;
        }

        loop_repo.save(&habit_loop).await?;
        report.loops_seeded += 1;
        info!(
            "Seeded demo loop: {} owner={} streak={} status={}",
            habit_loop.title(),
            habit_loop.user_id(),
            habit_loop.current_streak(),
            habit_loop.status()
        );
    }

    if report.users_seeded + report.loops_seeded > 0 {
        info!(
            "Demo data ready: {} user(s), {} loop(s) added",
            report.users_seeded, report.loops_seeded
        );
    }

    Ok(report)
}
