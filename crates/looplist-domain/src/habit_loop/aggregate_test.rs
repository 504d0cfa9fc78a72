#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::shared::{DomainError, UserId};
    use chrono::{DateTime, NaiveDate, Utc};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn draft(frequency: Frequency, start: &str) -> LoopDraft {
        LoopDraft {
            user_id: UserId::from_string("user1"),
            title: "Read 10 pages".to_string(),
            emoji: Some("📚".to_string()),
            cover_image: None,
            frequency,
            start_date: date(start),
            end_date: None,
            visibility: Visibility::Public,
        }
    }

    fn create(frequency: Frequency, start: &str, today: &str) -> HabitLoop {
        HabitLoop::new(
            draft(frequency, start),
            date(today),
            now(),
            &mut UniformBackfill(DayStatus::Checked),
        )
        .unwrap()
    }

    #[test]
    fn test_new_loop_seeds_days_and_metrics() {
        let habit_loop = create(Frequency::Daily, "2024-01-01", "2024-01-05");

        assert_eq!(habit_loop.days().len(), 5);
        assert_eq!(habit_loop.days().get(&date("2024-01-05")), Some(DayStatus::Pending));
        assert_eq!(habit_loop.current_streak(), 5);
        assert_eq!(habit_loop.longest_streak(), 5);
        assert_eq!(habit_loop.completion_rate(), 80.0);
        assert_eq!(habit_loop.status(), LoopStatus::Active);
        assert!(habit_loop.cheers().is_empty());
    }

    #[test]
    fn test_new_loop_rejects_short_title() {
        let mut d = draft(Frequency::Daily, "2024-01-01");
        d.title = "  ab ".to_string();
        let result = HabitLoop::new(
            d,
            date("2024-01-05"),
            now(),
            &mut UniformBackfill(DayStatus::Checked),
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_new_loop_rejects_future_start() {
        let result = HabitLoop::new(
            draft(Frequency::Daily, "2024-02-01"),
            date("2024-01-05"),
            now(),
            &mut UniformBackfill(DayStatus::Checked),
        );
        assert!(matches!(result, Err(DomainError::InvalidSchedule(_))));
    }

    #[test]
    fn test_new_loop_rejects_end_before_start() {
        let mut d = draft(Frequency::Daily, "2024-01-10");
        d.end_date = Some(date("2024-01-09"));
        let result = HabitLoop::new(
            d,
            date("2024-01-12"),
            now(),
            &mut UniformBackfill(DayStatus::Checked),
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_check_in_today_recomputes() {
        let mut habit_loop = HabitLoop::new(
            draft(Frequency::Daily, "2024-01-01"),
            date("2024-01-04"),
            now(),
            &mut UniformBackfill(DayStatus::Missed),
        )
        .unwrap();
        assert_eq!(habit_loop.current_streak(), 1);
        assert_eq!(habit_loop.completion_rate(), 0.0);

        let previous = habit_loop
            .apply_day_status(date("2024-01-04"), DayStatus::Checked, date("2024-01-04"), now())
            .unwrap();

        assert_eq!(previous, Some(DayStatus::Pending));
        assert_eq!(habit_loop.current_streak(), 1);
        assert_eq!(habit_loop.completion_rate(), 25.0);
        assert_eq!(habit_loop.status(), LoopStatus::Active);
    }

    #[test]
    fn test_marking_today_missed_breaks_the_loop() {
        let mut habit_loop = create(Frequency::Daily, "2024-01-01", "2024-01-03");
        habit_loop
            .apply_day_status(date("2024-01-03"), DayStatus::Missed, date("2024-01-03"), now())
            .unwrap();
        assert_eq!(habit_loop.current_streak(), 0);
        assert_eq!(habit_loop.longest_streak(), 2);
        assert_eq!(habit_loop.status(), LoopStatus::Broken);
    }

    #[test]
    fn test_replaying_a_past_day_is_allowed() {
        let mut habit_loop = create(Frequency::Daily, "2024-01-01", "2024-01-05");
        habit_loop
            .apply_day_status(date("2024-01-02"), DayStatus::Missed, date("2024-01-05"), now())
            .unwrap();
        assert_eq!(habit_loop.current_streak(), 3);
        assert_eq!(habit_loop.longest_streak(), 3);
        assert_eq!(habit_loop.status(), LoopStatus::Active);
    }

    #[test]
    fn test_check_in_rejects_untracked_future_and_pre_start_days() {
        // 2024-01-06 is a Saturday
        let mut habit_loop = create(Frequency::Weekdays, "2024-01-01", "2024-01-08");
        let today = date("2024-01-08");

        let weekend =
            habit_loop.apply_day_status(date("2024-01-06"), DayStatus::Checked, today, now());
        assert!(matches!(weekend, Err(DomainError::Validation(_))));

        let tomorrow =
            habit_loop.apply_day_status(date("2024-01-09"), DayStatus::Checked, today, now());
        assert!(matches!(tomorrow, Err(DomainError::Validation(_))));

        let before_start =
            habit_loop.apply_day_status(date("2023-12-29"), DayStatus::Checked, today, now());
        assert!(matches!(before_start, Err(DomainError::Validation(_))));

        let future_status =
            habit_loop.apply_day_status(today, DayStatus::Future, today, now());
        assert!(matches!(future_status, Err(DomainError::Validation(_))));

        assert!(!habit_loop.days().contains(&date("2024-01-06")));
    }

    #[test]
    fn test_graduation_after_thirty_strong_days() {
        let mut habit_loop = HabitLoop::new(
            draft(Frequency::Daily, "2024-01-01"),
            date("2024-01-30"),
            now(),
            &mut UniformBackfill(DayStatus::Checked),
        )
        .unwrap();
        // 29 checked + today's pending: 96.7% over 30 tracked days
        assert_eq!(habit_loop.status(), LoopStatus::Completed);

        habit_loop
            .apply_day_status(date("2024-01-30"), DayStatus::Checked, date("2024-01-30"), now())
            .unwrap();
        assert_eq!(habit_loop.status(), LoopStatus::Completed);
        assert_eq!(habit_loop.completion_rate(), 100.0);
    }

    #[test]
    fn test_merge_days_keeps_existing_dates_and_recomputes() {
        let mut habit_loop = create(Frequency::Daily, "2024-01-01", "2024-01-03");
        let days = DayMap::from_iso_entries([
            ("2024-01-01", DayStatus::Missed),
            ("2024-01-02", DayStatus::Missed),
        ])
        .unwrap();
        habit_loop.merge_days(days, date("2024-01-03"), now()).unwrap();

        assert_eq!(habit_loop.days().len(), 3);
        assert_eq!(habit_loop.days().get(&date("2024-01-03")), Some(DayStatus::Pending));
        assert_eq!(habit_loop.longest_streak(), 1);
        assert_eq!(habit_loop.current_streak(), 1);
        assert_eq!(habit_loop.completion_rate(), 0.0);
    }

    #[test]
    fn test_merge_days_rejects_untracked_dates() {
        let mut habit_loop = create(Frequency::Daily, "2024-01-01", "2024-01-03");
        let bad = DayMap::from_iso_entries([("2023-12-31", DayStatus::Checked)]).unwrap();
        assert!(matches!(
            habit_loop.merge_days(bad, date("2024-01-03"), now()),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(habit_loop.days().len(), 3);
    }

    #[test]
    fn test_merge_days_never_stores_future_days() {
        let mut habit_loop = create(Frequency::Daily, "2024-01-01", "2024-01-05");
        let before = habit_loop.days().clone();

        let ahead = DayMap::from_iso_entries([
            ("2024-01-01", DayStatus::Checked),
            ("2030-06-01", DayStatus::Checked),
        ])
        .unwrap();
        assert!(matches!(
            habit_loop.merge_days(ahead, date("2024-01-05"), now()),
            Err(DomainError::Validation(_))
        ));

        let future_status = DayMap::from_iso_entries([("2024-01-02", DayStatus::Future)]).unwrap();
        assert!(matches!(
            habit_loop.merge_days(future_status, date("2024-01-05"), now()),
            Err(DomainError::Validation(_))
        ));

        // a rejected batch writes nothing, not even its valid entries
        assert_eq!(habit_loop.days(), &before);
        assert!(!habit_loop.days().contains(&date("2030-06-01")));
    }

    #[test]
    fn test_update_details_keeps_metrics() {
        let mut habit_loop = create(Frequency::Daily, "2024-01-01", "2024-01-05");
        let streak = habit_loop.current_streak();
        habit_loop
            .update_details(
                LoopDetailsUpdate {
                    title: Some("Read 20 pages".to_string()),
                    visibility: Some(Visibility::Private),
                    emoji: Some("   ".to_string()),
                    ..Default::default()
                },
                now(),
            )
            .unwrap();
        assert_eq!(habit_loop.title(), "Read 20 pages");
        assert_eq!(habit_loop.visibility(), Visibility::Private);
        assert_eq!(habit_loop.emoji(), None);
        assert_eq!(habit_loop.current_streak(), streak);
    }

    #[test]
    fn test_cheer_toggles_per_user_and_emoji() {
        let mut habit_loop = create(Frequency::Daily, "2024-01-01", "2024-01-05");
        let jane = UserId::from_string("user2");

        assert_eq!(
            habit_loop.toggle_cheer(&jane, "Jane Smith", "🔥", now()).unwrap(),
            CheerToggle::Added
        );
        assert_eq!(
            habit_loop.toggle_cheer(&jane, "Jane Smith", "👏", now()).unwrap(),
            CheerToggle::Added
        );
        assert_eq!(habit_loop.cheers().len(), 2);

        assert_eq!(
            habit_loop.toggle_cheer(&jane, "Jane Smith", "🔥", now()).unwrap(),
            CheerToggle::Removed
        );
        assert_eq!(habit_loop.cheers().len(), 1);
        assert_eq!(habit_loop.cheers()[0].emoji(), "👏");
    }

    #[test]
    fn test_cheer_requires_public_loop() {
        let mut d = draft(Frequency::Daily, "2024-01-01");
        d.visibility = Visibility::Friends;
        let mut habit_loop = HabitLoop::new(
            d,
            date("2024-01-02"),
            now(),
            &mut UniformBackfill(DayStatus::Checked),
        )
        .unwrap();
        let result = habit_loop.toggle_cheer(&UserId::from_string("user2"), "Jane", "🔥", now());
        assert!(matches!(result, Err(DomainError::LoopNotPublic(_))));
    }

    #[test]
    fn test_clone_starts_fresh_and_private() {
        let source = create(Frequency::Daily, "2024-01-01", "2024-01-05");
        let copy = HabitLoop::clone_for(
            &source,
            UserId::from_string("user2"),
            date("2024-02-01"),
            now(),
        );

        assert_ne!(copy.id(), source.id());
        assert_eq!(copy.title(), source.title());
        assert_eq!(copy.frequency(), source.frequency());
        assert_eq!(copy.start_date(), date("2024-02-01"));
        assert_eq!(copy.visibility(), Visibility::Private);
        assert_eq!(copy.days().len(), 1);
        assert_eq!(copy.days().get(&date("2024-02-01")), Some(DayStatus::Pending));
        assert_eq!(copy.current_streak(), 1);
        assert!(copy.cheers().is_empty());
    }

    #[test]
    fn test_clone_on_untracked_day_has_empty_record() {
        // 2024-02-03 is a Saturday
        let source = create(Frequency::Weekdays, "2024-01-01", "2024-01-05");
        let copy = HabitLoop::clone_for(
            &source,
            UserId::from_string("user2"),
            date("2024-02-03"),
            now(),
        );
        assert!(copy.days().is_empty());
        assert_eq!(copy.status(), LoopStatus::Active);
    }

    #[test]
    fn test_serde_round_trip_keeps_derived_fields() {
        let habit_loop = create(Frequency::Custom, "2024-01-01", "2024-01-09");
        let json = serde_json::to_value(&habit_loop).unwrap();
        assert_eq!(json["frequency"], "custom");
        assert_eq!(json["currentStreak"], 5);
        assert!(json["days"].get("2024-01-03").is_some());

        let back: HabitLoop = serde_json::from_value(json).unwrap();
        assert_eq!(back.id(), habit_loop.id());
        assert_eq!(back.days(), habit_loop.days());
        assert_eq!(back.status(), habit_loop.status());
    }

    #[test]
    fn test_days_count_tallies_statuses() {
        let habit_loop = create(Frequency::Daily, "2024-01-01", "2024-01-05");
        let counts = habit_loop.days_count();
        assert_eq!(counts.checked, 4);
        assert_eq!(counts.missed, 0);
        assert_eq!(counts.pending, 1);
    }
}
