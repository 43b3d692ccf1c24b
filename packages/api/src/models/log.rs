use serde::{Deserialize, Deserializer, Serialize};

/// One synchronization run reported by a client.
///
/// `status` is free text; the server normally writes `success`, `error` or
/// `warning` but older clients use other capitalisations. Clients that crash
/// mid-run leave `status` and `records_synced` as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncLog {
    pub id: i64,
    pub client_id: String,
    pub sync_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub records_synced: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub db_name: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_counters_and_status_decode() {
        let json = r#"{"id": 4, "client_id": "C1", "sync_date": "2024-03-01T10:00:00Z",
            "records_synced": null, "status": null, "message": null, "db_name": null}"#;
        let log: SyncLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.records_synced, 0);
        assert_eq!(log.status, "");
        assert_eq!(log.message, None);
    }
}
