//! Shortlink creation.

use std::sync::Arc;

use metrics::counter;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{info, warn};

use crate::domain::entities::{Creator, Link, NewLink};
use crate::domain::repositories::{CreatorRepository, LinkRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::telemetry::LINKS_CREATED_TOTAL;
use crate::utils::id_generator::generate_id;
use crate::utils::link_normalizer::{normalize_link, validate_link};

/// Returned to a disabled creator trying to create a link.
pub const FORBIDDEN_MESSAGE: &str = "You cannot make shortlinks.";

/// Creates shortlinks on behalf of creators identified by client IP.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    creator_repository: Arc<dyn CreatorRepository>,
    cache: Arc<dyn CacheService>,
    id_length: usize,
}

impl LinkService {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        creator_repository: Arc<dyn CreatorRepository>,
        cache: Arc<dyn CacheService>,
        id_length: usize,
    ) -> Self {
        Self {
            link_repository,
            creator_repository,
            cache,
            id_length,
        }
    }

    /// Validates, normalizes and stores a link for the creator at `client_ip`.
    ///
    /// Validation runs before the creator lookup, so a disabled creator still gets
    /// validation errors for malformed input. The new link is written through to the
    /// distributed cache only; the local cache fills on first resolution.
    ///
    /// # Id Collisions
    ///
    /// A uniqueness violation on insert is retried once with a fresh id. A second
    /// collision becomes [`AppError::Internal`].
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the link is missing or not URL-shaped
    /// - [`AppError::Forbidden`] if the creator is disabled
    /// - [`AppError::Internal`] on store failures
    pub async fn create(&self, client_ip: &str, raw_link: Option<&str>) -> Result<Link, AppError> {
        let raw_link = validate_link(raw_link)?;
        let redirect_to = normalize_link(raw_link);

        let creator = self.creator_repository.find_or_create(client_ip).await?;
        if creator.disabled {
            return Err(AppError::forbidden(FORBIDDEN_MESSAGE));
        }

        let link = self.insert_with_fresh_id(&creator, redirect_to).await?;

        if let Err(e) = self.cache.set_url(&link.id, &link.redirect_to).await {
            warn!("Failed to write {} through to distributed cache: {}", link.id, e);
        }

        counter!(LINKS_CREATED_TOTAL).increment(1);
        info!(
            id = %link.id,
            creator_id = creator.id,
            "Created shortlink"
        );

        Ok(link)
    }

    /// Looks up the creator record for `client_ip` without creating one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn find_creator(&self, client_ip: &str) -> Result<Option<Creator>, AppError> {
        self.creator_repository.find_by_ip(client_ip).await
    }

    /// Confirms the durable store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    async fn insert_with_fresh_id(
        &self,
        creator: &Creator,
        redirect_to: String,
    ) -> Result<Link, AppError> {
        let strategy = FixedInterval::from_millis(0).take(1);

        let attempt = || {
            let repository = Arc::clone(&self.link_repository);
            let new_link = NewLink {
                id: generate_id(self.id_length),
                redirect_to: redirect_to.clone(),
                creator_id: Some(creator.id),
            };
            async move { repository.create(new_link).await }
        };

        RetryIf::spawn(strategy, attempt, |e: &AppError| {
            if e.is_conflict() {
                warn!("Shortlink id collision, retrying with a fresh id");
            }
            e.is_conflict()
        })
        .await
        .map_err(|e| match e {
            AppError::Conflict { details, .. } => {
                AppError::internal("Failed to generate unique id", details)
            }
            other => other,
        })
    }
}
