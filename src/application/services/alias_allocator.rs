//! Alias allocation service.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::retry::{AllocationState, RetryPolicy};
use crate::domain::entities::NewLink;
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, ConflictCause, StoreError};
use crate::utils::alias_generator::AliasGenerator;

/// Service that binds URLs to aliases.
///
/// Uniqueness is decided by the store's insert, never by a prior lookup, so
/// concurrent allocations of the same alias resolve to exactly one winner.
///
/// - A caller-supplied alias gets exactly one insert. A conflict is reported,
///   not retried.
/// - A generated alias is retried on conflict per the [`RetryPolicy`].
pub struct AliasAllocator<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    generator: AliasGenerator,
    retry_policy: RetryPolicy,
}

impl<L: LinkRepository + ?Sized> AliasAllocator<L> {
    /// Creates a new allocator.
    pub fn new(link_repository: Arc<L>, generator: AliasGenerator, retry_policy: RetryPolicy) -> Self {
        Self {
            link_repository,
            generator,
            retry_policy,
        }
    }

    /// Allocates an alias for `url` with the configured retry policy.
    ///
    /// An empty `requested_alias` is the same as none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasAlreadyExists`] if the requested alias is
    /// taken or every generated alias collided.
    /// Returns [`AppError::StoreUnavailable`] on any other store failure.
    pub async fn allocate(&self, url: &str, requested_alias: Option<&str>) -> Result<String, AppError> {
        self.allocate_with(url, requested_alias, &self.retry_policy)
            .await
    }

    /// Same as [`Self::allocate`] with an explicit retry policy.
    pub async fn allocate_with(
        &self,
        url: &str,
        requested_alias: Option<&str>,
        policy: &RetryPolicy,
    ) -> Result<String, AppError> {
        match requested_alias.filter(|alias| !alias.is_empty()) {
            Some(alias) => self.allocate_custom(url, alias).await,
            None => self.allocate_generated(url, policy).await,
        }
    }

    async fn allocate_custom(&self, url: &str, alias: &str) -> Result<String, AppError> {
        match self.link_repository.insert_link(NewLink::new(url, alias)).await {
            Ok(stored) => Ok(stored),
            Err(StoreError::DuplicateKey) => {
                debug!(alias, "requested alias is taken");
                Err(AppError::AliasAlreadyExists(ConflictCause::Taken {
                    alias: alias.to_string(),
                }))
            }
            Err(e) => Err(AppError::StoreUnavailable(e.to_string())),
        }
    }

    async fn allocate_generated(&self, url: &str, policy: &RetryPolicy) -> Result<String, AppError> {
        let mut state = AllocationState::start();

        loop {
            state = match state {
                AllocationState::Attempting(attempt) => {
                    if attempt > 1 {
                        let delay = policy.delay_for(attempt - 1);
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                    }

                    let alias = self.generator.generate();
                    let outcome = self
                        .link_repository
                        .insert_link(NewLink::new(url, alias.as_str()))
                        .await;
                    if matches!(outcome, Err(StoreError::DuplicateKey)) {
                        debug!(attempt, alias = %alias, "generated alias collided");
                    }

                    AllocationState::Attempting(attempt).next(outcome, policy.attempts)
                }
                AllocationState::Succeeded(alias) => return Ok(alias),
                AllocationState::ExhaustedConflict => {
                    warn!(
                        attempts = policy.attempts,
                        "no free alias found within the retry budget"
                    );
                    return Err(AppError::AliasAlreadyExists(ConflictCause::Exhausted {
                        attempts: policy.attempts,
                    }));
                }
                AllocationState::FailedOther(e) => {
                    return Err(AppError::StoreUnavailable(e.to_string()));
                }
            };
        }
    }
}
