//! Shortlink resolution across the local cache, the distributed cache and the store.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, LocalCache};
use crate::telemetry::RESOLUTIONS_TOTAL;

/// Outcome of resolving a shortlink id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Destination URL to redirect to.
    Redirect(String),
    /// No link has this id.
    NotFound,
    /// The link exists but was disabled by moderation.
    Disabled { reason: Option<String> },
}

/// Resolves shortlink ids, fastest tier first.
///
/// # Lookup Order
///
/// 1. Local cache (this instance)
/// 2. Distributed cache, copying a hit into the local cache
/// 3. Durable store, copying an enabled link into both caches
///
/// Cache hits are served without re-checking moderation state; disabling or deleting
/// a link invalidates the cached entries instead. Only enabled links are cached, so
/// `NotFound` and `Disabled` are re-read from the store on every request.
pub struct ResolutionService {
    local_cache: Arc<LocalCache>,
    cache: Arc<dyn CacheService>,
    link_repository: Arc<dyn LinkRepository>,
}

impl ResolutionService {
    pub fn new(
        local_cache: Arc<LocalCache>,
        cache: Arc<dyn CacheService>,
        link_repository: Arc<dyn LinkRepository>,
    ) -> Self {
        Self {
            local_cache,
            cache,
            link_repository,
        }
    }

    /// Resolves a shortlink id to its destination.
    ///
    /// A failing distributed cache degrades to a store lookup; it never fails the
    /// resolution on its own.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the durable store cannot be queried.
    pub async fn resolve(&self, shortlink_id: &str) -> Result<Resolution, AppError> {
        if let Some(url) = self.local_cache.get(shortlink_id) {
            debug!("Local cache HIT for {}", shortlink_id);
            counter!(RESOLUTIONS_TOTAL, "tier" => "local").increment(1);
            return Ok(Resolution::Redirect(url));
        }

        match self.cache.get_url(shortlink_id).await {
            Ok(Some(url)) => {
                debug!("Distributed cache HIT for {}", shortlink_id);
                counter!(RESOLUTIONS_TOTAL, "tier" => "distributed").increment(1);
                self.local_cache.set(shortlink_id, url.clone());
                return Ok(Resolution::Redirect(url));
            }
            Ok(None) => {}
            Err(e) => warn!(
                "Distributed cache unavailable for {}, falling back to store: {}",
                shortlink_id, e
            ),
        }

        debug!("Hit DATABASE for {}", shortlink_id);
        let Some(link) = self.link_repository.find_by_id(shortlink_id).await? else {
            counter!(RESOLUTIONS_TOTAL, "tier" => "not_found").increment(1);
            return Ok(Resolution::NotFound);
        };

        if link.disabled {
            counter!(RESOLUTIONS_TOTAL, "tier" => "disabled").increment(1);
            return Ok(Resolution::Disabled {
                reason: link.disabled_reason,
            });
        }

        counter!(RESOLUTIONS_TOTAL, "tier" => "store").increment(1);

        if let Err(e) = self.cache.set_url(&link.id, &link.redirect_to).await {
            warn!("Failed to populate distributed cache for {}: {}", link.id, e);
        }
        self.local_cache.set(link.id, link.redirect_to.clone());

        Ok(Resolution::Redirect(link.redirect_to))
    }
}
