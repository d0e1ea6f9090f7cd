//! Per-call time limits around repository implementations.

use async_trait::async_trait;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::domain::entities::{Creator, Link, NewLink};
use crate::domain::repositories::{CreatorRepository, LinkRepository};
use crate::error::AppError;

async fn limit<T>(
    timeout: Duration,
    operation: &'static str,
    fut: impl Future<Output = Result<T, AppError>>,
) -> Result<T, AppError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, timeout_ms = timeout.as_millis() as u64, "Database query timed out");
            Err(AppError::internal(
                "Database query timed out",
                json!({ "operation": operation, "timeout_ms": timeout.as_millis() as u64 }),
            ))
        }
    }
}

/// [`LinkRepository`] whose calls fail with [`AppError::Internal`] after `timeout`.
pub struct TimedLinkRepository {
    inner: Arc<dyn LinkRepository>,
    timeout: Duration,
}

impl TimedLinkRepository {
    pub fn new(inner: Arc<dyn LinkRepository>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl LinkRepository for TimedLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        limit(self.timeout, "link.create", self.inner.create(new_link)).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        limit(self.timeout, "link.find_by_id", self.inner.find_by_id(id)).await
    }

    async fn disable(&self, id: &str, reason: &str) -> Result<bool, AppError> {
        limit(self.timeout, "link.disable", self.inner.disable(id, reason)).await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        limit(self.timeout, "link.delete", self.inner.delete(id)).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        limit(self.timeout, "link.ping", self.inner.ping()).await
    }
}

/// [`CreatorRepository`] whose calls fail with [`AppError::Internal`] after `timeout`.
pub struct TimedCreatorRepository {
    inner: Arc<dyn CreatorRepository>,
    timeout: Duration,
}

impl TimedCreatorRepository {
    pub fn new(inner: Arc<dyn CreatorRepository>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl CreatorRepository for TimedCreatorRepository {
    async fn find_or_create(&self, ip_address: &str) -> Result<Creator, AppError> {
        limit(
            self.timeout,
            "creator.find_or_create",
            self.inner.find_or_create(ip_address),
        )
        .await
    }

    async fn find_by_ip(&self, ip_address: &str) -> Result<Option<Creator>, AppError> {
        limit(
            self.timeout,
            "creator.find_by_ip",
            self.inner.find_by_ip(ip_address),
        )
        .await
    }

    async fn set_disabled(
        &self,
        ip_address: &str,
        disabled: bool,
        reason: Option<String>,
    ) -> Result<Creator, AppError> {
        limit(
            self.timeout,
            "creator.set_disabled",
            self.inner.set_disabled(ip_address, disabled, reason),
        )
        .await
    }
}
