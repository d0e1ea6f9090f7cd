//! Link and creator moderation.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::Creator;
use crate::domain::repositories::{CreatorRepository, LinkRepository};
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, LocalCache};

/// Stored when a link or creator is disabled without a reason.
pub const DEFAULT_DISABLE_REASON: &str = "No reason provided.";

/// Disables and deletes links, bans and unbans creators.
///
/// # Ordering
///
/// Link mutations always invalidate both cache tiers before touching the store. If
/// the distributed cache cannot be invalidated the operation fails and the store is
/// left unchanged. Only the local cache of this instance is cleared.
pub struct ModerationService {
    local_cache: Arc<LocalCache>,
    cache: Arc<dyn CacheService>,
    link_repository: Arc<dyn LinkRepository>,
    creator_repository: Arc<dyn CreatorRepository>,
}

impl ModerationService {
    pub fn new(
        local_cache: Arc<LocalCache>,
        cache: Arc<dyn CacheService>,
        link_repository: Arc<dyn LinkRepository>,
        creator_repository: Arc<dyn CreatorRepository>,
    ) -> Self {
        Self {
            local_cache,
            cache,
            link_repository,
            creator_repository,
        }
    }

    /// Disables a link so it resolves to `Disabled` from now on.
    ///
    /// An empty or missing `reason` stores [`DEFAULT_DISABLE_REASON`].
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link has this id
    /// - [`AppError::Internal`] if invalidation or the store update fails
    pub async fn disable(&self, shortlink_id: &str, reason: Option<&str>) -> Result<(), AppError> {
        self.invalidate(shortlink_id).await?;

        let reason = reason
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_DISABLE_REASON);

        if !self.link_repository.disable(shortlink_id, reason).await? {
            return Err(AppError::not_found(format!(
                "SmolLink {} not found.",
                shortlink_id
            )));
        }

        info!(id = %shortlink_id, reason = %reason, "Disabled shortlink");
        Ok(())
    }

    /// Deletes a link. Deleting an unknown id succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if invalidation or the store delete fails.
    pub async fn delete(&self, shortlink_id: &str) -> Result<(), AppError> {
        self.invalidate(shortlink_id).await?;

        if self.link_repository.delete(shortlink_id).await? {
            info!(id = %shortlink_id, "Deleted shortlink");
        }

        Ok(())
    }

    /// Clears this instance's local cache and returns the number of dropped entries.
    pub fn clear_local_cache(&self) -> usize {
        let cleared = self.local_cache.clear();
        info!("Cleared {} local cache entries", cleared);
        cleared
    }

    /// Forbids the creator at `ip_address` from creating links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn ban_creator(
        &self,
        ip_address: &str,
        reason: Option<String>,
    ) -> Result<Creator, AppError> {
        let reason = reason
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_DISABLE_REASON.to_string());

        let creator = self
            .creator_repository
            .set_disabled(ip_address, true, Some(reason))
            .await?;

        info!(ip = %ip_address, "Banned creator");
        Ok(creator)
    }

    /// Lets the creator at `ip_address` create links again.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn unban_creator(&self, ip_address: &str) -> Result<Creator, AppError> {
        let creator = self
            .creator_repository
            .set_disabled(ip_address, false, None)
            .await?;

        info!(ip = %ip_address, "Unbanned creator");
        Ok(creator)
    }

    async fn invalidate(&self, shortlink_id: &str) -> Result<(), AppError> {
        self.local_cache.invalidate(shortlink_id);

        self.cache.invalidate(shortlink_id).await.map_err(|e| {
            warn!("Failed to invalidate {} in distributed cache: {}", shortlink_id, e);
            AppError::internal(
                "Cache invalidation failed",
                json!({ "id": shortlink_id, "reason": e.to_string() }),
            )
        })
    }
}
