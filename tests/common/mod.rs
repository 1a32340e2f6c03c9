#![allow(dead_code)]

//! In-memory store and cache used by the HTTP and flow tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use std::time::Duration;

use async_trait::async_trait;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use axum_test::TestServer;
use chrono::Datelike;
use serde_json::json;
use tower_http::normalize_path::NormalizePath;
use short_url::domain::entities::{
    DailyStats, LinkAnalytics, MonthlyStats, NewRedirectEvent, NewUrlMapping, RedirectEvent,
    UserAgentStats, UrlMapping, zip_visits,
};
use short_url::domain::repositories::{AnalyticsRepository, UrlRepository};
use short_url::error::AppError;
use short_url::infrastructure::cache::{CacheError, CacheResult, CacheService};
use short_url::routes::app_router;
use short_url::state::{AppState, ServiceSettings};

pub const BASE_URL: &str = "http://sho.rt";

#[derive(Default)]
struct StoreData {
    urls: Vec<UrlMapping>,
    events: Vec<RedirectEvent>,
}

/// Store fake sharing one dataset between both repository traits.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<Mutex<StoreData>>,
    lookups_disabled: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every mapping read fail, as if the store were down for reads.
    pub fn disable_lookups(&self) {
        self.lookups_disabled.store(true, Ordering::SeqCst);
    }

    /// Number of mapping reads served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn insert_mapping(&self, long_url: &str, short_code: &str) {
        let mut data = self.data.lock().unwrap();
        let id = data.urls.len() as i64 + 1;
        data.urls.push(UrlMapping::new(
            id,
            long_url.to_string(),
            short_code.to_string(),
        ));
    }

    pub fn mappings(&self) -> Vec<UrlMapping> {
        self.data.lock().unwrap().urls.clone()
    }

    pub fn events(&self) -> Vec<RedirectEvent> {
        self.data.lock().unwrap().events.clone()
    }

    pub fn push_event(&self, visit: NewRedirectEvent) -> RedirectEvent {
        let mut data = self.data.lock().unwrap();
        let event = RedirectEvent {
            id: data.events.len() as i64 + 1,
            short_code: visit.short_code,
            user_agent: visit.user_agent,
            request_time: visit.request_time,
        };
        data.events.push(event.clone());
        event
    }

    fn read_guard(&self) -> Result<(), AppError> {
        if self.lookups_disabled.load(Ordering::SeqCst) {
            return Err(AppError::internal(
                "Database error",
                json!({ "reason": "lookups disabled" }),
            ));
        }
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn sorted_events(&self) -> Vec<RedirectEvent> {
        let mut events = self.events();
        events.sort_by_key(|e| (e.request_time, e.id));
        events
    }

    fn analytics_for(&self, mapping: &UrlMapping) -> LinkAnalytics {
        let events: Vec<RedirectEvent> = self
            .sorted_events()
            .into_iter()
            .filter(|e| e.short_code == mapping.short_code)
            .collect();

        let mut user_agents: Vec<String> =
            events.iter().filter_map(|e| e.user_agent.clone()).collect();
        user_agents.sort();
        user_agents.dedup();

        LinkAnalytics {
            short_code: mapping.short_code.clone(),
            long_url: mapping.long_url.clone(),
            redirect_count: events.len() as i64,
            user_agents,
            request_times: events.iter().map(|e| e.request_time).collect(),
        }
    }
}

#[async_trait]
impl UrlRepository for InMemoryStore {
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let mut data = self.data.lock().unwrap();

        if data
            .urls
            .iter()
            .any(|m| m.short_code == new_mapping.short_code)
        {
            return Err(AppError::conflict("Short code already exists", json!({})));
        }

        if let Some(existing) = data
            .urls
            .iter()
            .find(|m| m.long_url == new_mapping.long_url)
        {
            return Ok(existing.clone());
        }

        let mapping = UrlMapping::new(
            data.urls.len() as i64 + 1,
            new_mapping.long_url,
            new_mapping.short_code,
        );
        data.urls.push(mapping.clone());
        Ok(mapping)
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, AppError> {
        self.read_guard()?;
        let data = self.data.lock().unwrap();
        Ok(data.urls.iter().find(|m| m.long_url == long_url).cloned())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        self.read_guard()?;
        let data = self.data.lock().unwrap();
        Ok(data.urls.iter().find(|m| m.short_code == short_code).cloned())
    }

    async fn resolve_and_record(
        &self,
        short_code: &str,
        visit: NewRedirectEvent,
    ) -> Result<Option<UrlMapping>, AppError> {
        let Some(mapping) = self.find_by_code(short_code).await? else {
            return Ok(None);
        };
        self.push_event(visit);
        Ok(Some(mapping))
    }

    async fn record_visit(&self, visit: NewRedirectEvent) -> Result<RedirectEvent, AppError> {
        Ok(self.push_event(visit))
    }

    async fn health_check(&self) -> bool {
        !self.lookups_disabled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryStore {
    async fn get_analytics(&self, short_code: &str) -> Result<Option<LinkAnalytics>, AppError> {
        let mapping = {
            let data = self.data.lock().unwrap();
            data.urls.iter().find(|m| m.short_code == short_code).cloned()
        };
        Ok(mapping.map(|m| self.analytics_for(&m)))
    }

    async fn find_hot(&self, min_redirects: i64) -> Result<Vec<LinkAnalytics>, AppError> {
        let mut hot: Vec<LinkAnalytics> = self
            .mappings()
            .iter()
            .map(|m| self.analytics_for(m))
            .filter(|a| a.redirect_count >= min_redirects)
            .collect();
        hot.sort_by(|a, b| a.short_code.cmp(&b.short_code));
        Ok(hot)
    }

    async fn aggregate_by_user_agent(&self) -> Result<Vec<UserAgentStats>, AppError> {
        let mut grouped: BTreeMap<String, Vec<RedirectEvent>> = BTreeMap::new();
        for event in self.sorted_events() {
            grouped
                .entry(event.short_code.clone())
                .or_default()
                .push(event);
        }

        Ok(grouped
            .into_iter()
            .map(|(short_code, events)| {
                let mut user_agents: Vec<String> =
                    events.iter().filter_map(|e| e.user_agent.clone()).collect();
                user_agents.sort();
                user_agents.dedup();
                UserAgentStats {
                    short_code,
                    user_agents,
                    redirect_count: events.len() as i64,
                }
            })
            .collect())
    }

    async fn aggregate_by_date(&self) -> Result<Vec<DailyStats>, AppError> {
        let mut grouped: BTreeMap<(i32, u32, u32), Vec<RedirectEvent>> = BTreeMap::new();
        for event in self.sorted_events() {
            let t = event.request_time;
            grouped
                .entry((t.year(), t.month(), t.day()))
                .or_default()
                .push(event);
        }

        Ok(grouped
            .into_iter()
            .map(|((year, month, day), events)| DailyStats {
                day: day as i32,
                month: month as i32,
                year,
                redirect_count: events.len() as i64,
                visits: zip_visits(
                    events.iter().map(|e| e.short_code.clone()).collect(),
                    events.iter().map(|e| e.request_time).collect(),
                ),
            })
            .collect())
    }

    async fn aggregate_by_month(&self) -> Result<Vec<MonthlyStats>, AppError> {
        let mut grouped: BTreeMap<(i32, u32), Vec<RedirectEvent>> = BTreeMap::new();
        for event in self.sorted_events() {
            let t = event.request_time;
            grouped
                .entry((t.year(), t.month()))
                .or_default()
                .push(event);
        }

        Ok(grouped
            .into_iter()
            .map(|((year, month), events)| MonthlyStats {
                month: month as i32,
                year,
                redirect_count: events.len() as i64,
                visits: zip_visits(
                    events.iter().map(|e| e.short_code.clone()).collect(),
                    events.iter().map(|e| e.request_time).collect(),
                ),
            })
            .collect())
    }
}

/// Cache fake with a switch to simulate transport failures.
#[derive(Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn guard(&self) -> CacheResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.guard()?;
        Ok(self.entry(key))
    }

    async fn set(&self, key: &str, value: &str, _ttl_seconds: Option<u64>) -> CacheResult<()> {
        self.guard()?;
        self.insert(key, value);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }
}

pub fn create_test_state(store: &InMemoryStore, cache: Arc<dyn CacheService>) -> AppState {
    AppState::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        cache,
        ServiceSettings {
            base_url: BASE_URL.to_string(),
            ..ServiceSettings::default()
        },
    )
}

/// The production router, middleware included.
pub fn create_test_router(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_router(state, Duration::from_secs(10)))
}

/// A test server over fresh fakes, with handles to inspect them.
pub struct TestApp {
    pub server: TestServer,
    pub store: InMemoryStore,
    pub cache: InMemoryCache,
}

pub fn spawn_app() -> TestApp {
    let store = InMemoryStore::new();
    let cache = InMemoryCache::new();
    let state = create_test_state(&store, Arc::new(cache.clone()));
    let server = TestServer::new(create_test_router(state)).unwrap();

    TestApp {
        server,
        store,
        cache,
    }
}

/// A test server over a fresh store and the given cache.
pub fn spawn_app_with_cache(cache: Arc<dyn CacheService>) -> (TestServer, InMemoryStore) {
    let store = InMemoryStore::new();
    let state = create_test_state(&store, cache);
    let server = TestServer::new(create_test_router(state)).unwrap();

    (server, store)
}
