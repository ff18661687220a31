use async_trait::async_trait;
use blog_core::application::ports::{
    links::{LinkStatus, RedirectValidator},
    time::Clock,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::sync::Mutex;

/// Clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap();
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Redirect validator that fails the registered URLs and records every
/// check.
#[derive(Default)]
pub struct StubLinks {
    unreachable: Mutex<HashSet<String>>,
    checked: Mutex<Vec<String>>,
}

impl StubLinks {
    pub fn fail(&self, url: &str) {
        self.unreachable.lock().unwrap().insert(url.to_string());
    }

    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().unwrap().clone()
    }
}

#[async_trait]
impl RedirectValidator for StubLinks {
    async fn check(&self, url: &str) -> LinkStatus {
        self.checked.lock().unwrap().push(url.to_string());
        if self.unreachable.lock().unwrap().contains(url) {
            LinkStatus::Unreachable {
                reason: "connection refused".into(),
            }
        } else {
            LinkStatus::Reachable {
                final_url: url.to_string(),
            }
        }
    }
}
