//! Periodic HelloWorld call against NAV, logged as a liveness check.

use std::{sync::Arc, time::Duration};

use common::nav::INavService;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct HeartbeatWorker {
    pub nav_service: Arc<dyn INavService>,
    pub interval: Duration,
    pub input_text: String,
}

impl HeartbeatWorker {
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }

    pub async fn run(&self, cancel: CancellationToken) {
        info!("NAV heartbeat started at: {}", chrono::Local::now().to_rfc3339());

        while !cancel.is_cancelled() {
            tokio::select! {
                _ = cancel.cancelled() => break,
                result = self.nav_service.hello_world(&self.input_text) => match result {
                    Ok(response) => info!("NAV Service responded: {}", response),
                    Err(err) => error!("Error calling NAV service: {}", err),
                },
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("NAV heartbeat stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use common::error::{NavError, NavResult};

    use super::*;

    struct CountingNav {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl INavService for CountingNav {
        async fn hello_world(&self, input_text: &str) -> NavResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NavError::RemoteInvocation("unreachable".to_string()));
            }
            Ok(format!("Hello {}!", input_text))
        }

        async fn start_job(&self, _job_id: &str, _company_name: &str, _input_json: &str) -> NavResult<String> {
            unreachable!()
        }

        async fn check_job(&self, _job_id: &str, _company_name: &str) -> NavResult<String> {
            unreachable!()
        }
    }

    fn worker(nav: Arc<CountingNav>, interval: Duration) -> HeartbeatWorker {
        HeartbeatWorker {
            nav_service: nav,
            interval,
            input_text: "Test from Worker".to_string(),
        }
    }

    #[tokio::test]
    async fn greets_immediately_then_every_interval() {
        let nav = Arc::new(CountingNav { calls: AtomicUsize::new(0), fail: false });
        let cancel = CancellationToken::new();
        let handle = worker(nav.clone(), Duration::from_millis(30)).spawn(cancel.clone());

        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();

        let calls = nav.calls.load(Ordering::SeqCst);
        assert!(calls >= 2, "calls: {}", calls);
    }

    #[tokio::test]
    async fn keeps_running_when_nav_fails() {
        let nav = Arc::new(CountingNav { calls: AtomicUsize::new(0), fail: true });
        let cancel = CancellationToken::new();
        let handle = worker(nav.clone(), Duration::from_millis(10)).spawn(cancel.clone());

        tokio::time::sleep(Duration::from_millis(60)).await;
        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();

        assert!(nav.calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn stops_during_long_interval() {
        let nav = Arc::new(CountingNav { calls: AtomicUsize::new(0), fail: false });
        let cancel = CancellationToken::new();
        let handle = worker(nav.clone(), Duration::from_secs(60)).spawn(cancel.clone());

        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();

        assert_eq!(nav.calls.load(Ordering::SeqCst), 1);
    }
}
