//! Analytics dashboard — joined fetch plus aggregate derivations.
//!
//! On refresh, patients, notes, and appointments are fetched concurrently and
//! joined all-or-nothing: if any one call fails, all three collections keep
//! their previous values for that cycle. Tasks are never fetched here — the
//! shell owns them and passes a read-only snapshot, and every aggregate is
//! recomputed fresh from that snapshot rather than cached.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::api::ClinicApi;
use crate::models::{parse_wire_timestamp, Appointment, NoteSummary, Patient, Task, TaskPriority, TaskStatus};

/// Cap on the recent-notes, upcoming-appointments, and todo-panel lists.
const FEED_LIMIT: usize = 5;

/// Navigation targets of the parent shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Dashboard,
    Patients,
    Notes,
    Tasks,
    Analytics,
    Calendar,
}

/// Shell-owned navigation callback injected into the dashboard.
pub trait Navigator: Send + Sync {
    fn set_active_tab(&self, tab: Tab);
}

/// The four stat tiles, recomputed on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_patients: usize,
    pub total_notes: usize,
    pub recent_notes: usize,
    pub appointments_today: usize,
    pub upcoming_appointments: usize,
    pub pending_tasks: usize,
}

/// One row of the todo panel, with presentational flags derived at read time.
#[derive(Debug, Clone)]
pub struct TodoEntry<'a> {
    pub task: &'a Task,
    pub is_overdue: bool,
    pub is_today: bool,
    pub high_priority: bool,
}

/// Dashboard view state: the three fetched collections and a loading flag.
pub struct AnalyticsView {
    api: Arc<dyn ClinicApi>,
    pub patients: Vec<Patient>,
    pub notes: Vec<NoteSummary>,
    pub appointments: Vec<Appointment>,
    pub loading: bool,
}

impl AnalyticsView {
    pub fn new(api: Arc<dyn ClinicApi>) -> Self {
        Self {
            api,
            patients: Vec::new(),
            notes: Vec::new(),
            appointments: Vec::new(),
            loading: true,
        }
    }

    /// Concurrent three-way fetch, joined all-or-nothing.
    ///
    /// Any single failure discards all three results for this cycle and
    /// leaves the collections at their last successful values (empty on first
    /// load). The loading flag clears regardless.
    pub async fn refresh(&mut self) {
        self.loading = true;
        let api = Arc::clone(&self.api);
        match tokio::try_join!(api.get_patients(), api.get_notes(), api.get_appointments()) {
            Ok((patients, notes, appointments)) => {
                self.patients = patients;
                self.notes = notes;
                self.appointments = appointments;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard fetch failed, keeping previous data");
            }
        }
        self.loading = false;
    }

    /// First five notes in received order — no re-sort here.
    pub fn recent_notes(&self) -> &[NoteSummary] {
        &self.notes[..self.notes.len().min(FEED_LIMIT)]
    }

    /// Appointments strictly after `now`, soonest first, capped at five.
    /// Equal timestamps keep their received order.
    pub fn upcoming_appointments(&self, now: NaiveDateTime) -> Vec<&Appointment> {
        let mut upcoming: Vec<(&Appointment, NaiveDateTime)> = self
            .appointments
            .iter()
            .filter_map(|a| parse_wire_timestamp(&a.start_time).map(|dt| (a, dt)))
            .filter(|(_, dt)| *dt > now)
            .collect();
        upcoming.sort_by_key(|(_, dt)| *dt);
        upcoming.truncate(FEED_LIMIT);
        upcoming.into_iter().map(|(a, _)| a).collect()
    }

    /// Appointments whose start falls on `today`'s local calendar date.
    pub fn today_appointments(&self, today: NaiveDate) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| {
                parse_wire_timestamp(&a.start_time).is_some_and(|dt| dt.date() == today)
            })
            .collect()
    }

    /// All four stat-tile values, derived fresh from current state.
    pub fn stats(&self, tasks: &[Task], now: NaiveDateTime) -> DashboardStats {
        DashboardStats {
            total_patients: self.patients.len(),
            total_notes: self.notes.len(),
            recent_notes: self.recent_notes().len(),
            appointments_today: self.today_appointments(now.date()).len(),
            upcoming_appointments: self.upcoming_appointments(now).len(),
            pending_tasks: pending_count(tasks),
        }
    }

    /// Todo panel interaction: hand control back to the shell's task screen.
    pub fn open_task_list(&self, navigator: &dyn Navigator) {
        navigator.set_active_tab(Tab::Tasks);
    }
}

/// Count of tasks still pending.
pub fn pending_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.status == TaskStatus::Pending).count()
}

/// Pending tasks in original order, capped at five, with due-time flags.
pub fn todo_entries(tasks: &[Task], now: NaiveDateTime) -> Vec<TodoEntry<'_>> {
    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Pending)
        .take(FEED_LIMIT)
        .map(|task| {
            let due = task_due_datetime(task);
            TodoEntry {
                task,
                is_overdue: due.is_some_and(|dt| dt < now),
                is_today: due.is_some_and(|dt| dt.date() == now.date()),
                high_priority: task.priority == TaskPriority::High,
            }
        })
        .collect()
}

/// Combine a task's dueDate + dueTime into a local date-time.
fn task_due_datetime(task: &Task) -> Option<NaiveDateTime> {
    let combined = format!("{}T{}", task.due_date, task.due_time);
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&combined, format) {
            return Some(dt);
        }
    }
    tracing::warn!(task = %task.id, due = %combined, "Unparseable task due time");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;
    use std::sync::Mutex;

    fn patient(id: i64) -> Patient {
        Patient {
            id,
            first_name: "Pat".into(),
            last_name: format!("Client {id}"),
        }
    }

    fn summary(id: i64, title: &str) -> NoteSummary {
        NoteSummary {
            id,
            title: title.into(),
            note_type: "doctor_note".into(),
            summary: None,
            patient_name: "Maria Santos".into(),
            author_name: "Dr. Chen".into(),
            created_at: "2024-03-01T09:00:00".into(),
            risk_level: None,
        }
    }

    fn appointment(id: i64, start_time: &str) -> Appointment {
        Appointment {
            id,
            start_time: start_time.into(),
        }
    }

    fn task(id: &str, status: TaskStatus, due_date: &str, due_time: &str) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            description: String::new(),
            priority: TaskPriority::Medium,
            due_date: due_date.into(),
            due_time: due_time.into(),
            status,
            created_at: "2024-05-30T08:00:00".into(),
            completed_at: None,
        }
    }

    fn noon(date: &str) -> NaiveDateTime {
        parse_wire_timestamp(&format!("{date}T12:00:00")).unwrap()
    }

    #[tokio::test]
    async fn refresh_populates_all_three_collections() {
        let api = MockApi::new()
            .with_patients(vec![patient(1), patient(2)])
            .with_notes(vec![summary(1, "a")])
            .with_appointments(vec![appointment(1, "2024-06-01T10:00:00")]);
        let mut view = AnalyticsView::new(Arc::new(api));

        view.refresh().await;
        assert!(!view.loading);
        assert_eq!(view.patients.len(), 2);
        assert_eq!(view.notes.len(), 1);
        assert_eq!(view.appointments.len(), 1);
    }

    #[tokio::test]
    async fn one_failed_fetch_discards_all_three() {
        let api = MockApi::new()
            .with_patients(vec![patient(1)])
            .with_notes(vec![summary(1, "a")])
            .failing_appointments();
        let mut view = AnalyticsView::new(Arc::new(api));

        view.refresh().await;
        assert!(!view.loading, "loading must clear on failure");
        assert!(view.patients.is_empty());
        assert!(view.notes.is_empty());
        assert!(view.appointments.is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_last_successful_values() {
        let api = MockApi::new().with_patients(vec![patient(1)]);
        let mut view = AnalyticsView::new(Arc::new(api));
        view.refresh().await;
        assert_eq!(view.patients.len(), 1);

        view.api = Arc::new(MockApi::new().failing_notes());
        view.refresh().await;
        assert_eq!(view.patients.len(), 1, "stale-but-valid data preserved");
    }

    #[test]
    fn recent_notes_takes_first_five_in_received_order() {
        let api = Arc::new(MockApi::new());
        let mut view = AnalyticsView::new(api);
        view.notes = (0..7).map(|i| summary(i, &format!("n{i}"))).collect();

        let recent = view.recent_notes();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].title, "n0");
        assert_eq!(recent[4].title, "n4");
    }

    #[test]
    fn upcoming_excludes_exactly_now_and_sorts_ascending() {
        let now = noon("2024-06-01");
        let api = Arc::new(MockApi::new());
        let mut view = AnalyticsView::new(api);
        view.appointments = vec![
            appointment(1, "2024-06-02T09:00:00"),
            appointment(2, "2024-06-01T12:00:00"), // exactly now — excluded
            appointment(3, "2024-06-01T15:00:00"),
            appointment(4, "2024-05-31T15:00:00"), // past
        ];

        let upcoming = view.upcoming_appointments(now);
        let ids: Vec<_> = upcoming.iter().map(|a| a.id).collect();
        assert_eq!(ids, [3, 1]);
    }

    #[test]
    fn upcoming_is_capped_and_stable_for_ties() {
        let now = noon("2024-06-01");
        let api = Arc::new(MockApi::new());
        let mut view = AnalyticsView::new(api);
        view.appointments = (1..=7)
            .map(|id| appointment(id, "2024-06-02T09:00:00"))
            .collect();

        let upcoming = view.upcoming_appointments(now);
        let ids: Vec<_> = upcoming.iter().map(|a| a.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn today_matches_calendar_date_including_past_hours() {
        let api = Arc::new(MockApi::new());
        let mut view = AnalyticsView::new(api);
        view.appointments = vec![
            appointment(1, "2024-06-01T08:00:00"),
            appointment(2, "2024-06-01T12:00:00"),
            appointment(3, "2024-06-02T00:30:00"),
            appointment(4, "not a date"),
        ];

        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let ids: Vec<_> = view.today_appointments(today).iter().map(|a| a.id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn stats_recompute_from_current_state() {
        let api = Arc::new(MockApi::new());
        let mut view = AnalyticsView::new(api);
        view.patients = vec![patient(1), patient(2), patient(3)];
        view.notes = (0..6).map(|i| summary(i, "n")).collect();
        view.appointments = vec![
            appointment(1, "2024-06-01T08:00:00"),
            appointment(2, "2024-06-02T09:00:00"),
        ];
        let tasks = vec![
            task("a", TaskStatus::Pending, "2024-06-01", "09:00"),
            task("b", TaskStatus::Completed, "2024-06-01", "09:00"),
        ];

        let stats = view.stats(&tasks, noon("2024-06-01"));
        assert_eq!(
            stats,
            DashboardStats {
                total_patients: 3,
                total_notes: 6,
                recent_notes: 5,
                appointments_today: 1,
                upcoming_appointments: 1,
                pending_tasks: 1,
            }
        );
    }

    #[test]
    fn todo_panel_is_pending_only_in_order_capped() {
        let mut tasks: Vec<Task> = (0..8)
            .map(|i| task(&i.to_string(), TaskStatus::Pending, "2024-06-02", "09:00"))
            .collect();
        tasks[1].status = TaskStatus::Completed;

        let entries = todo_entries(&tasks, noon("2024-06-01"));
        let ids: Vec<_> = entries.iter().map(|e| e.task.id.as_str()).collect();
        assert_eq!(ids, ["0", "2", "3", "4", "5"]);
    }

    #[test]
    fn overdue_and_today_flags() {
        let now = noon("2024-06-01");
        let tasks = vec![
            task("past", TaskStatus::Pending, "2024-05-31", "10:00"),
            task("later-today", TaskStatus::Pending, "2024-06-01", "17:00"),
            task("earlier-today", TaskStatus::Pending, "2024-06-01", "09:00"),
            task("tomorrow", TaskStatus::Pending, "2024-06-02", "09:00"),
        ];

        let entries = todo_entries(&tasks, now);
        let by_id = |id: &str| entries.iter().find(|e| e.task.id == id).unwrap();

        assert!(by_id("past").is_overdue);
        assert!(!by_id("past").is_today);

        assert!(!by_id("later-today").is_overdue);
        assert!(by_id("later-today").is_today);

        assert!(by_id("earlier-today").is_overdue);
        assert!(by_id("earlier-today").is_today);

        assert!(!by_id("tomorrow").is_overdue);
        assert!(!by_id("tomorrow").is_today);
    }

    #[test]
    fn high_priority_flag_follows_task_priority() {
        let mut urgent = task("u", TaskStatus::Pending, "2024-06-02", "09:00");
        urgent.priority = TaskPriority::High;
        let tasks = vec![urgent, task("m", TaskStatus::Pending, "2024-06-02", "09:00")];

        let entries = todo_entries(&tasks, noon("2024-06-01"));
        assert!(entries[0].high_priority);
        assert!(!entries[1].high_priority);
    }

    #[test]
    fn unparseable_due_time_sets_no_flags() {
        let tasks = vec![task("bad", TaskStatus::Pending, "someday", "late")];
        let entries = todo_entries(&tasks, noon("2024-06-01"));
        assert!(!entries[0].is_overdue);
        assert!(!entries[0].is_today);
    }

    #[test]
    fn open_task_list_navigates_to_tasks_tab() {
        struct Recorder(Mutex<Vec<Tab>>);
        impl Navigator for Recorder {
            fn set_active_tab(&self, tab: Tab) {
                self.0.lock().unwrap().push(tab);
            }
        }

        let view = AnalyticsView::new(Arc::new(MockApi::new()));
        let recorder = Recorder(Mutex::new(Vec::new()));
        view.open_task_list(&recorder);
        assert_eq!(*recorder.0.lock().unwrap(), [Tab::Tasks]);
    }
}
