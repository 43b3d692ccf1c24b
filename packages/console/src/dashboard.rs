//! Dashboard figures, derived from the user and log collections.
//!
//! Both collections are fetched concurrently and both must settle before
//! anything is shown. If either fails the dashboard shows one error and no
//! numbers, rather than a half-populated page.

use api::{AdminApi, SyncLog, User};

use crate::dates::sort_key;
use crate::logs::StatusTone;

pub const DASHBOARD_LOAD_FAILED: &str = "Failed to load dashboard data";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub users: Vec<User>,
    pub logs: Vec<SyncLog>,
    pub error: Option<String>,
}

pub async fn load_dashboard(api: &impl AdminApi) -> DashboardData {
    let (users, logs) = futures::join!(api.list_users(), api.sync_logs());
    match (users, logs) {
        (Ok(users), Ok(logs)) => DashboardData {
            users,
            logs,
            error: None,
        },
        (users, logs) => {
            if let Err(err) = users {
                tracing::warn!("dashboard users fetch failed: {err}");
            }
            if let Err(err) = logs {
                tracing::warn!("dashboard logs fetch failed: {err}");
            }
            DashboardData {
                error: Some(DASHBOARD_LOAD_FAILED.to_string()),
                ..Default::default()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_users: usize,
    pub total_syncs: usize,
    pub successful_syncs: usize,
    pub failed_syncs: usize,
}

impl DashboardSummary {
    pub fn of(users: &[User], logs: &[SyncLog]) -> Self {
        let count = |tone| {
            logs.iter()
                .filter(|log| StatusTone::of(&log.status) == tone)
                .count()
        };
        Self {
            total_users: users.len(),
            total_syncs: logs.len(),
            successful_syncs: count(StatusTone::Success),
            failed_syncs: count(StatusTone::Error),
        }
    }
}

/// The `limit` most recent logs, newest first.
pub fn recent_logs(logs: &[SyncLog], limit: usize) -> Vec<&SyncLog> {
    let mut recent: Vec<&SyncLog> = logs.iter().collect();
    recent.sort_by(|a, b| sort_key(&b.sync_date).cmp(&sort_key(&a.sync_date)));
    recent.truncate(limit);
    recent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::log;
    use api::MemoryBackend;

    fn user(id: &str) -> User {
        User {
            client_id: id.to_string(),
            db_name: format!("db_{id}"),
            db_user: "sa".to_string(),
            created_at: None,
            client_name: None,
            address: None,
            phone_number: None,
            username: None,
            password: None,
        }
    }

    fn backend() -> MemoryBackend {
        MemoryBackend::new()
            .with_user(user("C1"), "t1")
            .with_user(user("C2"), "t2")
            .with_user(user("C3"), "t3")
            .with_logs(vec![
                log(1, "C1", "2024-01-01T00:00:00Z", "Success"),
                log(2, "C2", "2024-01-02T00:00:00Z", "Error"),
                log(3, "C3", "2024-01-03T00:00:00Z", "Success"),
            ])
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let data = load_dashboard(&backend()).await;
        assert!(data.error.is_none());
        let summary = DashboardSummary::of(&data.users, &data.logs);
        assert_eq!(
            summary,
            DashboardSummary {
                total_users: 3,
                total_syncs: 3,
                successful_syncs: 2,
                failed_syncs: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_any_failure_blanks_dashboard() {
        let backend = backend();
        backend.fail_path("/api/admin/logs");
        let data = load_dashboard(&backend).await;
        assert!(data.users.is_empty());
        assert!(data.logs.is_empty());
        assert_eq!(data.error.as_deref(), Some(DASHBOARD_LOAD_FAILED));

        // both requests were still issued
        let requests = backend.requests();
        assert!(requests.contains(&"GET /api/admin/list-users".to_string()));
        assert!(requests.contains(&"GET /api/admin/logs".to_string()));
    }

    #[test]
    fn test_recent_logs() {
        let logs: Vec<_> = (1..=7)
            .map(|day| log(day, "C1", &format!("2024-01-0{day}"), "success"))
            .collect();
        let ids: Vec<_> = recent_logs(&logs, 5).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
        assert_eq!(recent_logs(&logs[..2], 5).len(), 2);
    }
}
