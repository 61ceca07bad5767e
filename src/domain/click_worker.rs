//! Background consumer of the click channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::application::services::ClickAggregator;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ClickRepository;

/// Retries after the first failed insert.
const RECORD_RETRIES: usize = 3;

fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_millis(500))
        .map(jitter)
        .take(RECORD_RETRIES)
}

/// Records clicks until every sender is dropped.
///
/// Each event is stamped once and its insert gets a short exponential
/// backoff, so retries reuse the same click id. A click that still fails is
/// logged and counted in `clicks_failed_total`; the worker keeps going.
pub async fn run_click_worker<C>(mut rx: mpsc::Receiver<ClickEvent>, aggregator: Arc<ClickAggregator<C>>)
where
    C: ClickRepository + ?Sized,
{
    info!("click worker started");

    while let Some(event) = rx.recv().await {
        let new_click = ClickAggregator::<C>::prepare_click(&event.alias, &event.user_agent, &event.ip);
        let result = Retry::start(retry_strategy(), || aggregator.record_click(new_click.clone())).await;

        match result {
            Ok(click) => {
                metrics::counter!("clicks_recorded_total").increment(1);
                debug!(alias = %click.alias, device = %click.device_type, "click recorded");
            }
            Err(e) => {
                metrics::counter!("clicks_failed_total").increment(1);
                error!(alias = %event.alias, error = %e, "failed to record click");
            }
        }
    }

    info!("click channel closed, worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockClickRepository;
    use crate::error::StoreError;
    use crate::infrastructure::persistence::InMemoryClickRepository;

    #[tokio::test]
    async fn test_worker_records_events_and_stops_on_close() {
        let repo = Arc::new(InMemoryClickRepository::new());
        let aggregator = Arc::new(ClickAggregator::new(repo.clone()));
        let (tx, rx) = mpsc::channel(8);

        let worker = tokio::spawn(run_click_worker(rx, aggregator));
        tx.send(ClickEvent::new("abc", Some("curl/8.0"), "127.0.0.1"))
            .await
            .unwrap();
        tx.send(ClickEvent::new("abc", None, "127.0.0.2"))
            .await
            .unwrap();
        drop(tx);
        worker.await.unwrap();

        let clicks = repo.clicks_for("abc");
        assert_eq!(clicks.len(), 2);
        assert_eq!(clicks[1].ip, "127.0.0.2");
    }

    #[tokio::test]
    async fn test_worker_retries_transient_failure() {
        let mut repo = MockClickRepository::new();
        let mut calls = 0;
        repo.expect_insert_click().times(2).returning(move |c| {
            calls += 1;
            if calls == 1 {
                Err(StoreError::Unavailable("connection reset".to_string()))
            } else {
                Ok(c.into_click())
            }
        });

        let aggregator = Arc::new(ClickAggregator::new(Arc::new(repo)));
        let (tx, rx) = mpsc::channel(1);
        let worker = tokio::spawn(run_click_worker(rx, aggregator));

        tx.send(ClickEvent::new("abc", Some("curl/8.0"), "127.0.0.1"))
            .await
            .unwrap();
        drop(tx);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_retries_with_same_click_id() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorded = seen.clone();

        let mut repo = MockClickRepository::new();
        repo.expect_insert_click().times(3).returning(move |c| {
            let mut ids = recorded.lock().unwrap();
            ids.push((c.id, c.clicked_at));
            if ids.len() < 3 {
                Err(StoreError::Unavailable("timeout after commit".to_string()))
            } else {
                Ok(c.into_click())
            }
        });

        let aggregator = Arc::new(ClickAggregator::new(Arc::new(repo)));
        let (tx, rx) = mpsc::channel(1);
        let worker = tokio::spawn(run_click_worker(rx, aggregator));

        tx.send(ClickEvent::new("abc", Some("curl/8.0"), "127.0.0.1"))
            .await
            .unwrap();
        drop(tx);
        worker.await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|entry| *entry == seen[0]));
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_retries() {
        let mut repo = MockClickRepository::new();
        repo.expect_insert_click()
            .times(RECORD_RETRIES + 1)
            .returning(|_| Err(StoreError::Unavailable("down".to_string())));

        let aggregator = Arc::new(ClickAggregator::new(Arc::new(repo)));
        let (tx, rx) = mpsc::channel(1);
        let worker = tokio::spawn(run_click_worker(rx, aggregator));

        tx.send(ClickEvent::new("abc", None, "127.0.0.1"))
            .await
            .unwrap();
        drop(tx);
        worker.await.unwrap();
    }
}
