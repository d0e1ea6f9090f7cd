//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    LinkService, ModerationService, RateLimitPolicy, RateLimiter, ResolutionService,
};
use crate::domain::repositories::{CreatorRepository, LinkRepository};
use crate::infrastructure::cache::{CacheService, LocalCache};
use crate::infrastructure::rate_limit::RateLimitStore;
use crate::utils::clock::Clock;
use crate::utils::id_generator::DEFAULT_ID_LENGTH;

/// Rate-limit scope of `POST /create`.
const CREATE_SCOPE: &str = "create";

/// Per-process settings that handlers and middleware consult.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Name shown on HTML error pages.
    pub app_name: String,
    /// Moderation routes answer 401 while set.
    pub anarchy: bool,
    /// Client identity comes from `X-Forwarded-For` while set.
    pub behind_proxy: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: "SmolLink".to_string(),
            anarchy: false,
            behind_proxy: false,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub resolution_service: Arc<ResolutionService>,
    pub link_service: Arc<LinkService>,
    pub moderation_service: Arc<ModerationService>,
    pub create_rate_limiter: Arc<RateLimiter>,
    /// Distributed cache handle, used by health checks.
    pub cache: Arc<dyn CacheService>,
    pub settings: Arc<AppSettings>,
}

impl AppState {
    /// Wires the services over shared storage, cache and counter backends.
    ///
    /// One [`LocalCache`] is created here and shared by resolution and moderation.
    pub fn from_parts(
        link_repository: Arc<dyn LinkRepository>,
        creator_repository: Arc<dyn CreatorRepository>,
        cache: Arc<dyn CacheService>,
        rate_limit_store: Arc<dyn RateLimitStore>,
        clock: Arc<dyn Clock>,
        create_policy: RateLimitPolicy,
        settings: AppSettings,
    ) -> Self {
        let local_cache = Arc::new(LocalCache::new());

        let resolution_service = ResolutionService::new(
            local_cache.clone(),
            cache.clone(),
            link_repository.clone(),
        );
        let link_service = LinkService::new(
            link_repository.clone(),
            creator_repository.clone(),
            cache.clone(),
            DEFAULT_ID_LENGTH,
        );
        let moderation_service = ModerationService::new(
            local_cache,
            cache.clone(),
            link_repository,
            creator_repository,
        );
        let create_rate_limiter =
            RateLimiter::new(rate_limit_store, clock, create_policy, CREATE_SCOPE);

        Self {
            resolution_service: Arc::new(resolution_service),
            link_service: Arc::new(link_service),
            moderation_service: Arc::new(moderation_service),
            create_rate_limiter: Arc::new(create_rate_limiter),
            cache,
            settings: Arc::new(settings),
        }
    }
}
