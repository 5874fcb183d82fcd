use chrono::{DateTime, Duration, Utc};
use taskdeck_core::access::role_permissions;
use taskdeck_core::config::DisplayConfig;
use taskdeck_core::derive::{calculate_progress, user_initials, workload_for};
use taskdeck_core::fixture::Fixture;
use taskdeck_core::model::{Role, TaskStatus};
use taskdeck_core::nav::{ViewId, menu_for, sidebar};
use taskdeck_core::store::{Intent, ViewState};
use taskdeck_core::views::{Session, TaskFilter, selected_detail, task_board};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-06-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn board_of_four() -> Vec<taskdeck_core::model::Task> {
    let mut fixture = Fixture::demo(now());
    fixture.tasks.truncate(4);
    for (task, status) in fixture.tasks.iter_mut().zip(TaskStatus::ALL) {
        task.status = status;
        task.assigned_to = vec!["u3".into()];
    }
    fixture.tasks
}

#[test]
fn completed_filter_and_progress_drop() {
    let tasks = board_of_four();
    let fixture = Fixture::demo(now());
    let user = fixture.resolve_user(Some("u3")).unwrap();
    let session = Session::new(&fixture, user, DisplayConfig::default(), now());
    let state = ViewState::for_user(tasks, vec![], user);

    let only_done = TaskFilter {
        status: Some(TaskStatus::Completed),
        ..TaskFilter::default()
    };
    let view = task_board(&state, &session, only_done);
    assert_eq!(view.shown, 1);
    assert_eq!(calculate_progress(state.tasks()), 25);

    let done_id = view.columns[3].tasks[0].id.clone();
    let state = state.change_status(&done_id, TaskStatus::Todo, now());
    assert_eq!(calculate_progress(state.tasks()), 0);
    assert_eq!(task_board(&state, &session, only_done).shown, 0);
}

#[test]
fn workload_of_three_tasks() {
    let mut fixture = Fixture::demo(now());
    fixture.tasks.truncate(3);
    let statuses = [
        (TaskStatus::Completed, Duration::days(-3)),
        (TaskStatus::InProgress, Duration::days(-1)),
        (TaskStatus::Todo, Duration::days(5)),
    ];
    for (task, (status, offset)) in fixture.tasks.iter_mut().zip(statuses) {
        task.status = status;
        task.due_date = now() + offset;
        task.assigned_to = vec!["u9".into()];
    }

    let stats = workload_for("u9", &fixture.tasks, now());
    assert_eq!(stats.total_tasks, 3);
    assert_eq!(stats.completed_tasks, 1);
    assert_eq!(stats.overdue_tasks, 1);
    assert_eq!(stats.in_progress_tasks, 1);
}

#[test]
fn initials_examples() {
    assert_eq!(user_initials("Jordan Lee"), "JL");
    assert_eq!(user_initials("Madonna"), "M");
    assert_eq!(user_initials(""), "");
}

#[test]
fn overlay_follows_intents_through_the_store() {
    let fixture = Fixture::demo(now());
    let user = fixture.resolve_user(None).unwrap();
    let session = Session::new(&fixture, user, DisplayConfig::default(), now());
    let mut state = ViewState::for_user(fixture.tasks.clone(), fixture.notifications.clone(), user);

    let later = now() + Duration::minutes(5);
    for intent in [
        Intent::SetActiveView { view: ViewId::Tasks },
        Intent::SelectTask { task_id: Some("t1".into()) },
        Intent::ChangeStatus { task_id: "t1".into(), status: TaskStatus::Review },
        Intent::ToggleSubtask { task_id: "t1".into(), subtask_id: "s2".into() },
        Intent::MarkNotificationRead { id: "n1".into() },
    ] {
        state = state.apply(&intent, later);
    }

    let detail = selected_detail(&state, &session).unwrap();
    assert_eq!(detail.status, TaskStatus::Review);
    assert_eq!(detail.updated_at, later);
    assert_eq!(detail.subtask_progress, 67);
    assert_eq!(state.unread_count(), 1);

    let bar = sidebar(user, state.active_view(), state.unread_count());
    assert!(bar.items.iter().any(|i| i.view == ViewId::Tasks && i.active));
}

#[test]
fn enforced_navigation_rejects_hidden_screens() {
    let fixture = Fixture::demo(now());
    let viewer = fixture.resolve_user(Some("u6")).unwrap();
    let caps = role_permissions(viewer.role);
    let state = ViewState::for_user(vec![], vec![], viewer);

    assert_eq!(menu_for(Role::Viewer).first(), Some(&ViewId::Viewer));
    assert!(state.try_set_active_view(ViewId::Analytics, &caps).is_err());
    // Advisory path still switches.
    assert_eq!(
        state.set_active_view(ViewId::Analytics).active_view(),
        ViewId::Analytics
    );
}
