use anyhow::Context;
use async_trait::async_trait;
use domain::Credential;
use tracing::debug;

use crate::repo::meta::TOKEN_KEY;
use crate::Db;

/// Holds at most one bearer credential across sessions.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self) -> anyhow::Result<Option<Credential>>;
    async fn set(&self, credential: &Credential) -> anyhow::Result<()>;
    async fn clear(&self) -> anyhow::Result<()>;
}

#[async_trait]
impl CredentialStore for Db {
    async fn get(&self) -> anyhow::Result<Option<Credential>> {
        let token = self
            .get_meta(TOKEN_KEY)
            .await
            .context("Failed to read stored credential")?;
        Ok(token.filter(|t| !t.is_empty()).map(Credential::new))
    }

    async fn set(&self, credential: &Credential) -> anyhow::Result<()> {
        self.save_meta(TOKEN_KEY, &credential.token)
            .await
            .context("Failed to persist credential")?;
        debug!("Credential stored under '{}'", TOKEN_KEY);
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.delete_meta(TOKEN_KEY)
            .await
            .context("Failed to clear credential")
    }
}
