//! Pure derivations over a snapshot of entities.
//!
//! # Overview
//!
//! Every function here is total and deterministic: `now` is always passed in,
//! inputs are only borrowed, and every ratio special-cases a zero denominator
//! to yield 0. They are cheap enough to recompute on every redraw.
//!
//! - [`due`]: overdue / due-soon / due-today classification and status filters.
//! - [`progress`]: completion percentages and project/milestone rollups.
//! - [`workload`]: per-user task counts and estimated hours.
//! - [`analytics`]: type/priority breakdowns and time efficiency.
//! - [`display`]: tone classification for statuses, priorities, and due dates,
//!   plus user initials.

pub mod analytics;
pub mod display;
pub mod due;
pub mod progress;
pub mod workload;

pub use analytics::{AnalyticsSummary, Breakdown, MemberStats, TimeSummary, summarize};
pub use display::{DueIndicator, Tone, due_indicator, priority_tone, status_tone, user_initials};
pub use due::{
    DEFAULT_DUE_SOON_DAYS, is_due_soon, is_overdue, is_task_overdue, overdue_tasks,
    tasks_by_status, tasks_due_today,
};
pub use progress::{Rollup, calculate_progress, milestone_rollup, project_rollup, ratio_percent};
pub use workload::{WorkloadStats, team_members, workload_for};
