#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{ConnectInfo, Request};
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shorty::application::services::{LinkService, RateLimitPolicy};
use shorty::domain::entities::UrlRecord;
use shorty::domain::repositories::UrlRepository;
use shorty::error::AppError;
use shorty::infrastructure::cache::{CacheStore, MemoryStore};
use shorty::routes;
use shorty::state::AppState;
use tower::Layer;
use tower_http::normalize_path::NormalizePath;

pub const BASE_URL: &str = "https://s.test";

/// Registry kept in a `Vec`, with sequential ids starting at 1.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    records: Mutex<Vec<UrlRecord>>,
    last_id: AtomicI64,
    unavailable: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn ensure_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::store_unavailable(
                "Registry unavailable",
                json!({}),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, long_url: &str) -> Result<i64, AppError> {
        self.ensure_available()?;
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.records.lock().unwrap().push(UrlRecord::new(
            id,
            long_url.to_string(),
            None,
            Utc::now(),
        ));
        Ok(id)
    }

    async fn update_code(&self, id: i64, short_code: &str) -> Result<(), AppError> {
        self.ensure_available()?;
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|r| r.id == id && r.short_code.is_none())
        {
            Some(record) => {
                record.short_code = Some(short_code.to_string());
                Ok(())
            }
            None => Err(AppError::not_found("No record", json!({ "id": id }))),
        }
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        self.ensure_available()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.short_code.as_deref() == Some(short_code))
            .cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.ensure_available()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.has_code())
            .count() as i64)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.ensure_available()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }

    async fn prune_orphans(&self, older_than: DateTime<Utc>) -> Result<u64, AppError> {
        self.ensure_available()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.has_code() || r.created_at >= older_than);
        Ok((before - records.len()) as u64)
    }
}

pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<InMemoryUrlRepository>,
    pub cache: MemoryStore,
}

pub fn create_test_state(policy: RateLimitPolicy) -> TestContext {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let cache = MemoryStore::new();
    let cache_store: Arc<dyn CacheStore> = Arc::new(cache.clone());

    let link_service = Arc::new(LinkService::new(
        repository.clone(),
        cache_store.clone(),
        BASE_URL,
    ));

    TestContext {
        state: AppState::new(link_service, cache_store, policy, false),
        repository,
        cache,
    }
}

pub fn default_policy() -> RateLimitPolicy {
    RateLimitPolicy::new(10, Duration::from_secs(60))
}

/// Inserts the peer address a real listener would attach.
#[derive(Clone)]
pub struct MockConnectInfoLayer {
    addr: SocketAddr,
}

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.addr,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}

/// The production router, as the client at `peer` would see it.
pub fn app(
    state: AppState,
    peer: &str,
) -> IntoMakeService<MockConnectInfoService<NormalizePath<Router>>> {
    let addr: SocketAddr = peer.parse().unwrap();
    let service = MockConnectInfoLayer { addr }.layer(routes::app_router(state));

    ServiceExt::<Request>::into_make_service(service)
}
