//! Click event model for asynchronous click tracking.

/// A visit captured by the redirect handler, waiting to be recorded.
///
/// Carries only what the handler already has at hand; User-Agent parsing and
/// timestamping happen in [`crate::application::services::ClickAggregator`].
///
/// # Usage Flow
///
/// 1. Created in the redirect handler after the alias resolved
/// 2. Sent to the bounded channel without waiting
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub alias: String,
    pub user_agent: String,
    pub ip: String,
}

impl ClickEvent {
    /// Creates a new click event. A missing User-Agent is stored as empty.
    pub fn new(alias: impl Into<String>, user_agent: Option<&str>, ip: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            user_agent: user_agent.unwrap_or_default().to_string(),
            ip: ip.into(),
        }
    }
}
