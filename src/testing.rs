//! Test doubles for the clock and the HTTP transport.

use crate::fetch::clock::Clock;
use crate::fetch::error::FetchError;
use crate::fetch::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A clock whose sleeps return immediately and advance its time instead.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    utc_origin: DateTime<Utc>,
    elapsed: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap())
    }

    pub fn at(utc_origin: DateTime<Utc>) -> Self {
        Self {
            origin: Instant::now(),
            utc_origin,
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Moves time forward without recording a sleep.
    pub fn advance(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() += duration;
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    pub fn total_slept(&self) -> Duration {
        self.sleeps().into_iter().sum()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock().unwrap()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        let elapsed = *self.elapsed.lock().unwrap();
        self.utc_origin + chrono::Duration::from_std(elapsed).unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        self.advance(duration);
    }
}

#[derive(Debug)]
enum Step {
    Reply(Result<HttpResponse, FetchError>),
    Hang,
}

/// Answers requests from a queue of canned outcomes and records what was asked.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, step: Step) {
        self.steps.lock().unwrap().push_back(step);
    }

    pub fn push_json(&self, status: StatusCode, body: impl Into<String>) {
        self.push(Step::Reply(Ok(HttpResponse {
            status,
            body: body.into(),
        })));
    }

    pub fn push_timeout(&self) {
        self.push(Step::Reply(Err(FetchError::RequestTimeout {
            url: "scripted".into(),
            source: "deadline elapsed".into(),
        })));
    }

    pub fn push_network_error(&self) {
        self.push(Step::Reply(Err(FetchError::NetworkRequest {
            url: "scripted".into(),
            source: "connection refused".into(),
        })));
    }

    /// The next request never completes.
    pub fn push_hang(&self) {
        self.push(Step::Hang);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.steps.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Reply(reply)) => reply,
            Some(Step::Hang) => std::future::pending().await,
            None => panic!("no scripted response left for {}", request.url),
        }
    }
}
