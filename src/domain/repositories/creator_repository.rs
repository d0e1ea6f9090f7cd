//! Repository trait for creator records.

use crate::domain::entities::Creator;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for creators, keyed by IP address.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCreatorRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreatorRepository: Send + Sync {
    /// Returns the creator for `ip_address`, inserting one if none exists.
    ///
    /// Idempotent and safe under concurrent calls for the same address: at most one
    /// record per address is ever created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_or_create(&self, ip_address: &str) -> Result<Creator, AppError>;

    /// Looks up a creator without creating one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_ip(&self, ip_address: &str) -> Result<Option<Creator>, AppError>;

    /// Sets the moderation state of the creator for `ip_address`, creating the record
    /// if the address has never been seen. `reason` is stored only when disabling.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_disabled(
        &self,
        ip_address: &str,
        disabled: bool,
        reason: Option<String>,
    ) -> Result<Creator, AppError>;
}
