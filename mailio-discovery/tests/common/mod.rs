//! Shared test helpers: a scripted resolver and assertion macros.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mailio_discovery::{DnsResolver, ResolveError};

/// A 32-byte ed25519 public key, base64 encoded.
pub const VALID_KEY: &str = "5uW7anEGF1nIjGfp5pS2kiN0cn2mGYkuSa+TCBoFIbQ=";

/// Assert that a `Result` is `Ok` and unwrap it (the test fails otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(res.is_ok(), "{}: {res:?}", format_args!($($msg)+));
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Canned answer for one query name.
#[derive(Clone)]
enum Answer<T> {
    Records(T),
    Fail(String),
    Hang,
}

/// Resolver answering from fixed tables, with an optional delay per query.
#[derive(Clone, Default)]
pub struct MockResolver {
    txt: HashMap<String, Answer<Vec<String>>>,
    ips: HashMap<String, Answer<Vec<IpAddr>>>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn txt(mut self, name: &str, records: &[&str]) -> Self {
        self.txt.insert(
            name.to_string(),
            Answer::Records(records.iter().map(ToString::to_string).collect()),
        );
        self
    }

    pub fn txt_failure(mut self, name: &str, message: &str) -> Self {
        self.txt
            .insert(name.to_string(), Answer::Fail(message.to_string()));
        self
    }

    pub fn txt_hang(mut self, name: &str) -> Self {
        self.txt.insert(name.to_string(), Answer::Hang);
        self
    }

    pub fn ips(mut self, name: &str, ips: &[&str]) -> Self {
        let ips = ips
            .iter()
            .filter_map(|ip| ip.parse().ok())
            .collect::<Vec<IpAddr>>();
        self.ips.insert(name.to_string(), Answer::Records(ips));
        self
    }

    pub fn ips_failure(mut self, name: &str, message: &str) -> Self {
        self.ips
            .insert(name.to_string(), Answer::Fail(message.to_string()));
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of queries issued so far.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    async fn answer<T: Clone + Default>(
        &self,
        table: &HashMap<String, Answer<T>>,
        name: &str,
    ) -> Result<T, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match table.get(name) {
            Some(Answer::Records(records)) => Ok(records.clone()),
            Some(Answer::Fail(message)) => Err(ResolveError::from(message.clone())),
            Some(Answer::Hang) => std::future::pending().await,
            None => Ok(T::default()),
        }
    }
}

#[async_trait]
impl DnsResolver for MockResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, ResolveError> {
        self.answer(&self.txt, name).await
    }

    async fn lookup_ip_addr(&self, name: &str) -> Result<Vec<IpAddr>, ResolveError> {
        self.answer(&self.ips, name).await
    }
}
