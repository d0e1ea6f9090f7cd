#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo};
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;
use smollink::application::services::RateLimitPolicy;
use smollink::domain::entities::{Creator, Link, NewLink};
use smollink::domain::repositories::{CreatorRepository, LinkRepository};
use smollink::error::AppError;
use smollink::infrastructure::cache::{CacheError, CacheResult, CacheService};
use smollink::infrastructure::rate_limit::MemoryRateLimitStore;
use smollink::routes::app_router;
use smollink::state::{AppSettings, AppState};
use smollink::utils::clock::ManualClock;
use sqlx::PgPool;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::Layer;

pub const CLIENT_ADDR: &str = "203.0.113.9:40000";
pub const CLIENT_IP: &str = "203.0.113.9";

/// Link store kept in a map.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
    unavailable: AtomicBool,
}

impl InMemoryLinkRepository {
    pub fn insert(&self, link: Link) {
        self.links.lock().unwrap().insert(link.id.clone(), link);
    }

    pub fn get(&self, id: &str) -> Option<Link> {
        self.links.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    /// Makes every call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::internal(
                "Database error",
                json!({ "reason": "connection refused" }),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();

        if links.contains_key(&new_link.id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_pkey" }),
            ));
        }

        let link = Link::new(
            new_link.id,
            new_link.redirect_to,
            new_link.creator_id,
            Utc::now(),
        );
        links.insert(link.id.clone(), link.clone());
        Ok(link)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn disable(&self, id: &str, reason: &str) -> Result<bool, AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();

        match links.get_mut(id) {
            Some(link) => {
                link.disabled = true;
                link.disabled_reason = Some(reason.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.links.lock().unwrap().remove(id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

/// Creator store keyed by IP address.
#[derive(Default)]
pub struct InMemoryCreatorRepository {
    creators: Mutex<HashMap<String, Creator>>,
    next_id: AtomicI64,
}

impl InMemoryCreatorRepository {
    pub fn get(&self, ip: &str) -> Option<Creator> {
        self.creators.lock().unwrap().get(ip).cloned()
    }

    pub fn len(&self) -> usize {
        self.creators.lock().unwrap().len()
    }

    fn upsert(&self, ip: &str) -> Creator {
        self.creators
            .lock()
            .unwrap()
            .entry(ip.to_string())
            .or_insert_with(|| {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                Creator::new(id, ip.to_string(), Utc::now())
            })
            .clone()
    }
}

#[async_trait]
impl CreatorRepository for InMemoryCreatorRepository {
    async fn find_or_create(&self, ip_address: &str) -> Result<Creator, AppError> {
        Ok(self.upsert(ip_address))
    }

    async fn find_by_ip(&self, ip_address: &str) -> Result<Option<Creator>, AppError> {
        Ok(self.get(ip_address))
    }

    async fn set_disabled(
        &self,
        ip_address: &str,
        disabled: bool,
        reason: Option<String>,
    ) -> Result<Creator, AppError> {
        self.upsert(ip_address);
        let mut creators = self.creators.lock().unwrap();
        let creator = creators
            .get_mut(ip_address)
            .expect("creator was just inserted");

        creator.disabled = disabled;
        creator.disabled_reason = if disabled { reason } else { None };
        Ok(creator.clone())
    }
}

/// Distributed cache stand-in that can be switched to failing.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
    unavailable: AtomicBool,
}

impl InMemoryCache {
    pub fn get(&self, id: &str) -> Option<String> {
        self.entries.lock().unwrap().get(id).cloned()
    }

    pub fn insert(&self, id: &str, url: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(id.to_string(), url.to_string());
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> CacheResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CacheError::Timeout);
        }
        Ok(())
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_url(&self, shortlink_id: &str) -> CacheResult<Option<String>> {
        self.check()?;
        Ok(self.get(shortlink_id))
    }

    async fn set_url(&self, shortlink_id: &str, redirect_to: &str) -> CacheResult<()> {
        self.check()?;
        self.insert(shortlink_id, redirect_to);
        Ok(())
    }

    async fn invalidate(&self, shortlink_id: &str) -> CacheResult<()> {
        self.check()?;
        self.entries.lock().unwrap().remove(shortlink_id);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.check().is_ok()
    }
}

/// Inserts `ConnectInfo` the way `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer(pub SocketAddr);

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.0,
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

/// A running router over in-memory backends, plus handles to inspect them.
pub struct TestApp {
    pub server: TestServer,
    pub links: Arc<InMemoryLinkRepository>,
    pub creators: Arc<InMemoryCreatorRepository>,
    pub cache: Arc<InMemoryCache>,
    pub clock: ManualClock,
    pub state: AppState,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(AppSettings::default(), RateLimitPolicy::default())
}

pub fn spawn_app_with(settings: AppSettings, policy: RateLimitPolicy) -> TestApp {
    let links = Arc::new(InMemoryLinkRepository::default());
    let creators = Arc::new(InMemoryCreatorRepository::default());
    let cache = Arc::new(InMemoryCache::default());
    let clock = ManualClock::new(Duration::from_secs(1_700_000_000));

    let state = AppState::from_parts(
        links.clone(),
        creators.clone(),
        cache.clone(),
        Arc::new(MemoryRateLimitStore::new()),
        Arc::new(clock.clone()),
        policy,
        settings,
    );

    let app: Router = app_router(state.clone()).layer(MockConnectInfoLayer(
        CLIENT_ADDR.parse().unwrap(),
    ));
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        links,
        creators,
        cache,
        clock,
        state,
    }
}

pub fn anarchy_settings() -> AppSettings {
    AppSettings {
        anarchy: true,
        ..AppSettings::default()
    }
}

pub async fn insert_link(pool: &PgPool, id: &str, url: &str) {
    sqlx::query("INSERT INTO links (id, redirect_to) VALUES ($1, $2)")
        .bind(id)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}
