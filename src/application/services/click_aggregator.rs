//! Click recording and analytics service.

use std::sync::Arc;

use chrono::Utc;
use tracing::error;
use uuid::Uuid;

use crate::domain::entities::{Click, ClickSummary, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;
use crate::utils::user_agent::parse_user_agent;

/// Service for the click log.
///
/// Recording is append-only; summaries are recomputed from the log on every
/// call and never cached.
pub struct ClickAggregator<C: ClickRepository + ?Sized> {
    click_repository: Arc<C>,
}

impl<C: ClickRepository + ?Sized> ClickAggregator<C> {
    /// Creates a new aggregator.
    pub fn new(click_repository: Arc<C>) -> Self {
        Self { click_repository }
    }

    /// Classifies the agent and stamps the click with its id and time.
    ///
    /// `ip` is resolved by the caller, see
    /// [`crate::utils::client_ip::extract_client_ip`].
    pub fn prepare_click(alias: &str, user_agent: &str, ip: &str) -> NewClick {
        let client = parse_user_agent(user_agent);

        NewClick {
            id: Uuid::new_v4(),
            alias: alias.to_string(),
            user_agent: user_agent.to_string(),
            client_name: client.client_name,
            device_type: client.device_type,
            ip: ip.to_string(),
            clicked_at: Utc::now(),
        }
    }

    /// Appends a prepared click to the log.
    ///
    /// Retrying with the same [`NewClick`] keeps its id and timestamp, so a
    /// retried insert never records a second, distinct click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the click cannot be stored.
    pub async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        self.click_repository
            .insert_click(new_click)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))
    }

    /// Builds the click summary for `alias`.
    ///
    /// The three groupings are queried concurrently. An alias without clicks,
    /// or one that was never allocated, yields three empty lists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if any grouping fails; no
    /// partial summary is returned.
    pub async fn summarize(&self, alias: &str) -> Result<ClickSummary, AppError> {
        let (by_day, by_month, by_client) = tokio::try_join!(
            self.click_repository.clicks_by_day(alias),
            self.click_repository.clicks_by_month(alias),
            self.click_repository.clicks_by_client(alias),
        )
        .map_err(|e| {
            error!(alias, error = %e, "failed to summarize clicks");
            AppError::StoreUnavailable(e.to_string())
        })?;

        Ok(ClickSummary {
            alias: alias.to_string(),
            by_day,
            by_month,
            by_client,
        })
    }
}
