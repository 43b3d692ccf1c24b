use api::AdminApi;

/// Result of asking the server to prepare its database on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    Pending,
    Ready,
    Unavailable,
}

pub async fn check_database(api: &impl AdminApi) -> InitStatus {
    match api.initialize().await {
        Ok(true) => {
            tracing::debug!("database ready");
            InitStatus::Ready
        }
        Ok(false) => {
            tracing::error!("server reported the database as unavailable");
            InitStatus::Unavailable
        }
        Err(err) => {
            tracing::error!("database initialization check failed: {err}");
            InitStatus::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryBackend;

    #[tokio::test]
    async fn test_check_database() {
        let backend = MemoryBackend::new();
        assert_eq!(check_database(&backend).await, InitStatus::Ready);

        backend.set_database_ready(false);
        assert_eq!(check_database(&backend).await, InitStatus::Unavailable);

        backend.set_database_ready(true);
        backend.set_offline(true);
        assert_eq!(check_database(&backend).await, InitStatus::Unavailable);
    }
}
