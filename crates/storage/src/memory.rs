use async_trait::async_trait;
use domain::Credential;
use tokio::sync::RwLock;

use crate::CredentialStore;

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Option<Credential>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            inner: RwLock::new(Some(credential)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self) -> anyhow::Result<Option<Credential>> {
        Ok(self.inner.read().await.clone())
    }

    async fn set(&self, credential: &Credential) -> anyhow::Result<()> {
        *self.inner.write().await = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.inner.write().await = None;
        Ok(())
    }
}
