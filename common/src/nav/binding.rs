use std::time::Duration;

use crate::util::consts::DEFAULT_TIMEOUT_MINUTES;

/// Transport settings applied to every call handle.
#[derive(Debug, Clone)]
pub struct NavBinding {
    pub send_timeout: Duration,
    pub receive_timeout: Duration,
    /// `None` accepts responses of any size.
    pub max_received_message_size: Option<usize>,
}

impl NavBinding {
    pub fn with_timeout_minutes(minutes: u64) -> Self {
        let timeout = Duration::from_secs(minutes.saturating_mul(60));
        NavBinding {
            send_timeout: timeout,
            receive_timeout: timeout,
            max_received_message_size: None,
        }
    }

    /// Whole request/reply budget handed to the HTTP client.
    pub fn operation_timeout(&self) -> Duration {
        self.send_timeout.max(self.receive_timeout)
    }
}

impl Default for NavBinding {
    fn default() -> Self {
        NavBinding::with_timeout_minutes(DEFAULT_TIMEOUT_MINUTES)
    }
}
