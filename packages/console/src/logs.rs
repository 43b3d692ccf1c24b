//! Sync log listing: ordering, filtering and status badges.

use api::{AdminApi, SyncLog};

use crate::dates::sort_key;
use crate::listing::Listing;

pub const LOGS_LOAD_FAILED: &str = "Failed to load sync logs";

/// Badge colour for a sync status. Statuses are free text on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Success,
    Error,
    Warning,
    Other,
}

impl StatusTone {
    pub const ALL: [StatusTone; 4] = [
        StatusTone::Success,
        StatusTone::Error,
        StatusTone::Warning,
        StatusTone::Other,
    ];

    pub fn of(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "success" => StatusTone::Success,
            "error" => StatusTone::Error,
            "warning" => StatusTone::Warning,
            _ => StatusTone::Other,
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            StatusTone::Success => "status-badge status-badge--success",
            StatusTone::Error => "status-badge status-badge--error",
            StatusTone::Warning => "status-badge status-badge--warning",
            StatusTone::Other => "status-badge status-badge--other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusTone::Success => "Success",
            StatusTone::Error => "Error",
            StatusTone::Warning => "Warning",
            StatusTone::Other => "Other",
        }
    }
}

pub async fn load_logs(api: &impl AdminApi) -> Listing<SyncLog> {
    let mut listing = Listing::from_result(api.sync_logs().await, LOGS_LOAD_FAILED);
    sort_recent_first(&mut listing.items);
    listing
}

/// Newest first. Equal timestamps keep server order.
pub fn sort_recent_first(logs: &mut [SyncLog]) {
    logs.sort_by(|a, b| sort_key(&b.sync_date).cmp(&sort_key(&a.sync_date)));
}

/// Filter chosen on the log page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub tone: Option<StatusTone>,
    /// Case-insensitive substring of client id or database name.
    pub query: String,
}

impl LogFilter {
    pub fn matches(&self, log: &SyncLog) -> bool {
        if let Some(tone) = self.tone {
            if StatusTone::of(&log.status) != tone {
                return false;
            }
        }
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        log.client_id.to_lowercase().contains(&query)
            || log
                .db_name
                .as_deref()
                .is_some_and(|db| db.to_lowercase().contains(&query))
    }

    pub fn is_active(&self) -> bool {
        self.tone.is_some() || !self.query.trim().is_empty()
    }
}

pub fn visible_logs<'a>(logs: &'a [SyncLog], filter: &LogFilter) -> Vec<&'a SyncLog> {
    logs.iter().filter(|log| filter.matches(log)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub success: usize,
    pub error: usize,
    pub warning: usize,
    pub other: usize,
}

impl StatusCounts {
    pub fn tally(logs: &[SyncLog]) -> Self {
        logs.iter().fold(Self::default(), |mut counts, log| {
            match StatusTone::of(&log.status) {
                StatusTone::Success => counts.success += 1,
                StatusTone::Error => counts.error += 1,
                StatusTone::Warning => counts.warning += 1,
                StatusTone::Other => counts.other += 1,
            }
            counts
        })
    }

    pub fn get(&self, tone: StatusTone) -> usize {
        match tone {
            StatusTone::Success => self.success,
            StatusTone::Error => self.error,
            StatusTone::Warning => self.warning,
            StatusTone::Other => self.other,
        }
    }
}

#[cfg(test)]
pub(crate) fn log(id: i64, client_id: &str, sync_date: &str, status: &str) -> SyncLog {
    SyncLog {
        id,
        client_id: client_id.to_string(),
        sync_date: sync_date.to_string(),
        records_synced: 10,
        status: status.to_string(),
        message: None,
        db_name: Some(format!("db_{}", client_id.to_lowercase())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryBackend;

    #[test]
    fn test_tone_is_case_insensitive() {
        assert_eq!(StatusTone::of("SUCCESS"), StatusTone::Success);
        assert_eq!(StatusTone::of("Error"), StatusTone::Error);
        assert_eq!(StatusTone::of("warning"), StatusTone::Warning);
        assert_eq!(StatusTone::of("partial"), StatusTone::Other);
        assert_eq!(StatusTone::of("partial").badge_class(), "status-badge status-badge--other");
    }

    #[tokio::test]
    async fn test_load_sorts_newest_first() {
        let backend = MemoryBackend::new().with_logs(vec![
            log(1, "C1", "2024-01-01T10:00:00Z", "success"),
            log(2, "C1", "not a date", "error"),
            log(3, "C2", "2024-02-01 08:00:00", "success"),
        ]);
        let listing = load_logs(&backend).await;
        let ids: Vec<_> = listing.items.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_failed_load_is_empty() {
        let backend = MemoryBackend::new().with_logs(vec![log(1, "C1", "2024-01-01", "success")]);
        backend.fail_path("/api/admin/logs");
        let listing = load_logs(&backend).await;
        assert!(listing.items.is_empty());
        assert_eq!(listing.error.as_deref(), Some(LOGS_LOAD_FAILED));
    }

    #[test]
    fn test_filter_by_tone_and_query() {
        let logs = vec![
            log(1, "ACME", "2024-01-01", "success"),
            log(2, "ACME", "2024-01-02", "error"),
            log(3, "Beta", "2024-01-03", "error"),
        ];

        let errors = LogFilter {
            tone: Some(StatusTone::Error),
            query: String::new(),
        };
        assert_eq!(visible_logs(&logs, &errors).len(), 2);

        let acme_errors = LogFilter {
            tone: Some(StatusTone::Error),
            query: "acme".to_string(),
        };
        let ids: Vec<_> = visible_logs(&logs, &acme_errors).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2]);

        let by_db = LogFilter {
            tone: None,
            query: "DB_BETA".to_string(),
        };
        assert_eq!(visible_logs(&logs, &by_db).len(), 1);
        assert!(!LogFilter::default().is_active());
        assert_eq!(visible_logs(&logs, &LogFilter::default()).len(), 3);
    }

    #[test]
    fn test_status_counts() {
        let logs = vec![
            log(1, "C1", "2024-01-01", "Success"),
            log(2, "C1", "2024-01-01", "error"),
            log(3, "C1", "2024-01-01", "warning"),
            log(4, "C1", "2024-01-01", "queued"),
            log(5, "C1", "2024-01-01", "success"),
        ];
        let counts = StatusCounts::tally(&logs);
        assert_eq!(counts.get(StatusTone::Success), 2);
        assert_eq!(counts.error, 1);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.other, 1);
    }
}
