use async_trait::async_trait;

use crate::error::FetchError;

use super::{ProviderId, SearchProvider};

/// Never reaches the network; every fetch falls back to placeholder data.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

#[async_trait]
impl SearchProvider for OfflineProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Offline
    }

    async fn search(&self, _prompt: &str) -> Result<String, FetchError> {
        Err(FetchError::Offline)
    }
}
