use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use super::{Capability, Identity};
use crate::errors::AppError;

/// Resolves API tokens to identities. Implement this to plug in another
/// credential store without touching the handlers.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` for tokens the store does not know.
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, AppError>;
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
}

/// Reads `auth_tokens`, `users` and `user_capabilities`.
#[derive(Clone)]
pub struct PgIdentityProvider {
    pool: PgPool,
}

impl PgIdentityProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates or refreshes a fixture user, replaces its capability grants and
    /// returns a new API token for it.
    pub async fn seed_user(
        &self,
        username: &str,
        email: &str,
        capabilities: &[Capability],
    ) -> Result<String> {
        let mut tx = self.pool.begin().await?;

        let user_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO users (id, username, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO UPDATE SET email = EXCLUDED.email
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM user_capabilities WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for capability in capabilities {
            sqlx::query("INSERT INTO user_capabilities (user_id, capability) VALUES ($1, $2)")
                .bind(user_id)
                .bind(capability.as_str())
                .execute(&mut *tx)
                .await?;
        }

        let token = Uuid::new_v4().simple().to_string();
        sqlx::query("INSERT INTO auth_tokens (key, user_id) VALUES ($1, $2)")
            .bind(&token)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Seeded user {username} with {} capabilities", capabilities.len());
        Ok(token)
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, AppError> {
        let user: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT u.id, u.username
            FROM auth_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.key = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let granted: Vec<String> =
            sqlx::query_scalar("SELECT capability FROM user_capabilities WHERE user_id = $1")
                .bind(user.id)
                .fetch_all(&self.pool)
                .await?;

        let capabilities = granted
            .iter()
            .filter_map(|name| match name.parse::<Capability>() {
                Ok(capability) => Some(capability),
                Err(e) => {
                    warn!("Ignoring grant for user {}: {e}", user.username);
                    None
                }
            })
            .collect::<HashSet<_>>();

        Ok(Some(Identity {
            user_id: user.id,
            username: user.username,
            capabilities,
        }))
    }
}

#[cfg(test)]
pub use memory::InMemoryIdentityProvider;
