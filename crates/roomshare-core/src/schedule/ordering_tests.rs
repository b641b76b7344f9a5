//! Tests for the ordering module.

#[cfg(test)]
mod tests {
    use super::super::ordering::*;
    use crate::error::TaskError;
    use crate::task::{Priority, Task, TaskKind};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap()
    }

    fn task(name: &str, priority: Priority, done: bool) -> Task {
        let mut t = Task::assignment(name, base()).unwrap().with_priority(priority);
        t.done = done;
        t
    }

    fn names(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn priority_puts_done_last() {
        let mut tasks = vec![
            task("low-done", Priority::Low, true),
            task("high-notdone", Priority::High, false),
            task("medium-notdone", Priority::Medium, false),
        ];
        sort(&mut tasks, SortPolicy::Priority);
        assert_eq!(names(&tasks), ["high-notdone", "medium-notdone", "low-done"]);
    }

    #[test]
    fn done_high_priority_still_sorts_after_pending_low() {
        let mut tasks = vec![
            task("high-done", Priority::High, true),
            task("low", Priority::Low, false),
        ];
        sort(&mut tasks, SortPolicy::Priority);
        assert_eq!(names(&tasks), ["low", "high-done"]);
    }

    #[test]
    fn alphabetical_is_case_sensitive_byte_order() {
        let mut tasks = vec![
            task("banana", Priority::Low, false),
            task("Cherry", Priority::Low, false),
            task("apple", Priority::Low, false),
        ];
        sort(&mut tasks, SortPolicy::Alphabetical);
        assert_eq!(names(&tasks), ["Cherry", "apple", "banana"]);
    }

    #[test]
    fn deadline_orders_by_instant() {
        let mut late = task("late", Priority::High, false);
        late.scheduled_at = base() + Duration::days(2);
        let mut early = task("early", Priority::Low, false);
        early.scheduled_at = base() - Duration::days(2);
        let mut tasks = vec![late, task("middle", Priority::Medium, false), early];
        sort(&mut tasks, SortPolicy::Deadline);
        assert_eq!(names(&tasks), ["early", "middle", "late"]);
    }

    #[test]
    fn type_orders_meetings_assignments_leaves() {
        let mut tasks = vec![
            Task::leave("leave", "harry", base(), base()).unwrap(),
            Task::assignment("assignment-1", base()).unwrap(),
            Task::meeting("meeting", base()).unwrap(),
            Task::assignment("assignment-2", base()).unwrap(),
        ];
        sort(&mut tasks, SortPolicy::Type);
        let kinds: Vec<_> = tasks.iter().map(Task::kind).collect();
        assert_eq!(
            kinds,
            [TaskKind::Meeting, TaskKind::Assignment, TaskKind::Assignment, TaskKind::Leave]
        );
        assert_eq!(tasks[1].description, "assignment-1");
        assert_eq!(tasks[2].description, "assignment-2");
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("Deadline".parse::<SortPolicy>().unwrap(), SortPolicy::Deadline);
        assert_eq!(SortPolicy::default(), SortPolicy::Priority);
        assert_eq!(
            "size".parse::<SortPolicy>(),
            Err(TaskError::InvalidSortPolicy("size".into()))
        );
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        let priority = prop_oneof![
            Just(Priority::High),
            Just(Priority::Medium),
            Just(Priority::Low)
        ];
        proptest::collection::vec((priority, any::<bool>(), 0i64..5, 0u8..3), 0..16).prop_map(
            |specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (priority, done, day, name))| {
                        let at = base() + Duration::days(day);
                        let mut t = match i % 3 {
                            0 => Task::meeting(format!("n{name}"), at).unwrap(),
                            1 => Task::assignment(format!("n{name}"), at).unwrap(),
                            _ => Task::leave(format!("n{name}"), "harry", at, at).unwrap(),
                        };
                        t.priority = priority;
                        t.done = done;
                        t
                    })
                    .collect()
            },
        )
    }

    fn arb_policy() -> impl Strategy<Value = SortPolicy> {
        prop_oneof![
            Just(SortPolicy::Priority),
            Just(SortPolicy::Alphabetical),
            Just(SortPolicy::Deadline),
            Just(SortPolicy::Type)
        ]
    }

    proptest! {
        #[test]
        fn unfinished_always_precede_finished(mut tasks in arb_tasks(), policy in arb_policy()) {
            sort(&mut tasks, policy);
            for pair in tasks.windows(2) {
                prop_assert!(pair[0].done <= pair[1].done);
            }
        }

        #[test]
        fn equal_keys_keep_relative_order(tasks in arb_tasks(), policy in arb_policy()) {
            let original: Vec<String> = tasks.iter().map(|t| t.id.clone()).collect();
            let mut sorted = tasks.clone();
            sort(&mut sorted, policy);

            for (i, a) in sorted.iter().enumerate() {
                for b in &sorted[i + 1..] {
                    if compare(a, b, policy) == std::cmp::Ordering::Equal {
                        let pos_a = original.iter().position(|id| *id == a.id).unwrap();
                        let pos_b = original.iter().position(|id| *id == b.id).unwrap();
                        prop_assert!(pos_a < pos_b);
                    }
                }
            }
        }
    }
}
