// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client-side QPS/burst throttling as a tower layer.
//!
//! kube has no rate limiter of its own, so the token bucket is layered on
//! top of the default client service stack. Throttling happens in
//! `poll_ready`, which means one bucket governs every request sent through
//! a single `Client`.

use crate::constants::rate_limit as zero_defaults;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Duration;
use tokio::time::{sleep_until, Instant, Sleep};
use tower::{Layer, Service};

/// QPS and burst settings as given on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitConfig {
    pub qps: f32,
    pub burst: i32,
}

impl RateLimitConfig {
    /// Only a negative QPS disables throttling
    pub fn is_enabled(&self) -> bool {
        self.qps >= 0.0
    }

    /// Refill rate the limiter applies; zero selects the default
    pub fn effective_qps(&self) -> f32 {
        if self.qps == 0.0 {
            zero_defaults::QPS
        } else {
            self.qps
        }
    }

    /// Bucket capacity the limiter applies; zero selects the default
    pub fn effective_burst(&self) -> i32 {
        if self.burst == 0 {
            zero_defaults::BURST
        } else {
            self.burst.max(1)
        }
    }
}

/// Token bucket with capacity `burst` refilled at `qps` tokens per second.
///
/// Reservations may drive the balance negative; callers then wait until
/// their token would have been refilled.
#[derive(Debug)]
pub struct TokenBucket {
    rate: f64,
    capacity: f64,
    tokens: f64,
    last: Instant,
}

impl TokenBucket {
    /// Create a full bucket, or `None` when throttling is disabled
    pub fn new(config: RateLimitConfig, now: Instant) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }
        let capacity = f64::from(config.effective_burst());
        Some(Self {
            rate: f64::from(config.effective_qps()),
            capacity,
            tokens: capacity,
            last: now,
        })
    }

    /// Take one token, returning the instant the caller must wait for if
    /// none was available
    pub fn reserve(&mut self, now: Instant) -> Option<Instant> {
        let elapsed = now.saturating_duration_since(self.last).as_secs_f64();
        self.last = self.last.max(now);
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.tokens -= 1.0;

        if self.tokens >= 0.0 {
            None
        } else {
            Some(now + Duration::from_secs_f64(-self.tokens / self.rate))
        }
    }
}

/// Layer installing a [`RateLimit`] around a service
#[derive(Debug, Clone, Copy)]
pub struct RateLimitLayer {
    config: RateLimitConfig,
}

impl RateLimitLayer {
    pub fn new(config: RateLimitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimit<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimit {
            inner,
            bucket: TokenBucket::new(self.config, Instant::now()),
            state: State::Idle,
        }
    }
}

enum State {
    /// No token held yet
    Idle,
    /// Waiting for a reserved token to mature
    Limited(Pin<Box<Sleep>>),
    /// Token held, next `call` may proceed
    Ready,
}

/// Service enforcing a [`TokenBucket`] before each request
pub struct RateLimit<S> {
    inner: S,
    bucket: Option<TokenBucket>,
    state: State,
}

impl<S, Request> Service<Request> for RateLimit<S>
where
    S: Service<Request>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        loop {
            match &mut self.state {
                State::Ready => return self.inner.poll_ready(cx),
                State::Limited(sleep) => {
                    ready!(sleep.as_mut().poll(cx));
                    self.state = State::Ready;
                }
                State::Idle => {
                    let wait = self
                        .bucket
                        .as_mut()
                        .and_then(|bucket| bucket.reserve(Instant::now()));
                    self.state = match wait {
                        Some(deadline) => State::Limited(Box::pin(sleep_until(deadline))),
                        None => State::Ready,
                    };
                }
            }
        }
    }

    fn call(&mut self, request: Request) -> Self::Future {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Ready => self.inner.call(request),
            _ => panic!("RateLimit::call invoked before poll_ready returned Ready"),
        }
    }
}
