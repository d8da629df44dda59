//! Dashboard client: cached reads of the monitoring API plus the derived views

use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::{MonitorError, Result};
use crate::models::activity::Activity;
use crate::models::dashboard::{ChartDataPoint, DashboardStat, ExchangeSummary};
use crate::models::incident::{Incident, Severity};
use crate::models::log::LogEntry;
use crate::models::packet::{Packet, ResendResponse};
use crate::models::service::{Service, SystemHealth};
use crate::services::exchange::{filter_incidents, summarize_exchange};
use crate::services::log_filter::{LogBrowser, LogPage};
use crate::services::status::system_health;

pub mod cache;
pub mod resend;
pub mod transport;

pub use cache::{CacheEntry, QueryCache};
pub use resend::ResendForm;
pub use transport::{ApiTransport, HttpTransport};

pub const STATS_KEY: &str = "/api/dashboard/stats";
pub const METRICS_KEY: &str = "/api/dashboard/metrics";
pub const SERVICES_KEY: &str = "/api/services/status";
pub const INCIDENTS_KEY: &str = "/api/incidents";
pub const LOGS_KEY: &str = "/api/logs";
pub const ACTIVITIES_KEY: &str = "/api/activities/recent";
pub const PACKETS_KEY: &str = "/api/packets/recent";
pub const RESEND_PATH: &str = "/api/packets/resend";

/// Keys a successful resend makes stale
pub const RESEND_INVALIDATES: [&str; 2] = [PACKETS_KEY, ACTIVITIES_KEY];

pub struct DashboardClient<T: ApiTransport = HttpTransport> {
    transport: T,
    cache: QueryCache,
    resending: AtomicUsize,
}

impl DashboardClient<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.api_base_url, config.http_timeout)?;
        Ok(Self::new(transport))
    }
}

impl<T: ApiTransport> DashboardClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: QueryCache::new(),
            resending: AtomicUsize::new(0),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Read `key` through the cache, fetching it on first access.
    ///
    /// Only documents that decode as `D` are cached, so a bad response is
    /// fetched again on the next read. Failures surface as `Fetch`, or `Api`
    /// when the server explained itself.
    pub async fn query<D: DeserializeOwned>(&self, key: &str) -> Result<D> {
        if let Some(entry) = self.cache.get(key).await {
            debug!("Cache hit for {}", key);
            return decode(key, entry.value);
        }

        let value = self.transport.get_json(key).await.inspect_err(|e| {
            warn!("Fetching {} failed: {}", key, e);
        })?;
        let document = decode(key, value.clone()).inspect_err(|e| {
            warn!("{}", e);
        })?;
        self.cache.insert(key, value).await;

        Ok(document)
    }

    /// Drop the cached copy of `key` and read it again.
    pub async fn refresh<D: DeserializeOwned>(&self, key: &str) -> Result<D> {
        self.cache.invalidate(key).await;
        self.query(key).await
    }

    pub async fn dashboard_stats(&self) -> Result<Vec<DashboardStat>> {
        self.query(STATS_KEY).await
    }

    pub async fn exchange_metrics(&self) -> Result<Vec<ChartDataPoint>> {
        self.query(METRICS_KEY).await
    }

    pub async fn services(&self) -> Result<Vec<Service>> {
        self.query(SERVICES_KEY).await
    }

    pub async fn incidents(&self) -> Result<Vec<Incident>> {
        self.query(INCIDENTS_KEY).await
    }

    pub async fn logs(&self) -> Result<Vec<LogEntry>> {
        self.query(LOGS_KEY).await
    }

    pub async fn recent_activities(&self) -> Result<Vec<Activity>> {
        self.query(ACTIVITIES_KEY).await
    }

    pub async fn recent_packets(&self) -> Result<Vec<Packet>> {
        self.query(PACKETS_KEY).await
    }

    /// Overall health from whatever service list is cached right now.
    ///
    /// Does not fetch: before the first `services()` call this is `Loading`.
    pub async fn system_health(&self) -> Result<SystemHealth> {
        match self.cache.get(SERVICES_KEY).await {
            None => Ok(SystemHealth::Loading),
            Some(entry) => {
                let services: Vec<Service> = decode(SERVICES_KEY, entry.value)?;
                Ok(system_health(Some(services.as_slice())))
            }
        }
    }

    pub async fn exchange_summary(&self) -> Result<ExchangeSummary> {
        Ok(summarize_exchange(&self.exchange_metrics().await?))
    }

    pub async fn incidents_by_severity(&self, severity: Option<Severity>) -> Result<Vec<Incident>> {
        Ok(filter_incidents(&self.incidents().await?, severity))
    }

    /// Current page of the log browser over the cached log collection.
    pub async fn log_page(&self, browser: &mut LogBrowser) -> Result<LogPage> {
        let logs = self.logs().await?;
        Ok(browser.view(&logs))
    }

    /// True while at least one resend is outstanding.
    pub fn is_resending(&self) -> bool {
        self.resending.load(Ordering::SeqCst) > 0
    }

    /// Validate the form locally, submit it, and mark recent packets and
    /// activity stale on success. An invalid form never reaches the network.
    pub async fn resend(&self, form: &ResendForm) -> Result<ResendResponse> {
        let request = form.validate()?;
        let body = serde_json::to_value(&request)?;

        let response = {
            let _in_flight = InFlight::start(&self.resending);
            self.transport.post_json(RESEND_PATH, &body).await?
        };

        let response: ResendResponse = decode(RESEND_PATH, response)?;

        for key in RESEND_INVALIDATES {
            self.cache.invalidate(key).await;
        }

        info!("{}", response.message);
        Ok(response)
    }
}

fn decode<D: DeserializeOwned>(key: &str, value: serde_json::Value) -> Result<D> {
    serde_json::from_value(value)
        .map_err(|e| MonitorError::Fetch(format!("unexpected document from {}: {}", key, e)))
}

// Counts one outstanding resend for as long as it lives
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::service::OverallStatus;
    use crate::services::fixtures::Fixtures;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::sleep;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> DashboardClient {
        let transport = HttpTransport::new(&server.uri(), Duration::from_secs(5)).unwrap();
        DashboardClient::new(transport)
    }

    async fn mount_get(server: &MockServer, route: &str, body: serde_json::Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_query_fetches_once() {
        let server = MockServer::start().await;
        let fixtures = Fixtures::builtin();
        mount_get(&server, INCIDENTS_KEY, json!(fixtures.incidents), 1).await;

        let client = client_for(&server).await;
        let first = client.incidents().await.unwrap();
        let second = client.incidents().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[tokio::test]
    async fn test_system_health_lifecycle() {
        let server = MockServer::start().await;
        let fixtures = Fixtures::builtin();
        mount_get(&server, SERVICES_KEY, json!(fixtures.services), 1).await;

        let client = client_for(&server).await;
        assert_eq!(client.system_health().await.unwrap(), SystemHealth::Loading);

        client.services().await.unwrap();

        match client.system_health().await.unwrap() {
            SystemHealth::Known(status) => {
                assert_eq!(status.status, OverallStatus::MajorOutage);
                assert_eq!(status.percentage, 67);
            }
            other => panic!("expected known status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_service_list_is_unknown() {
        let server = MockServer::start().await;
        mount_get(&server, SERVICES_KEY, json!([]), 1).await;

        let client = client_for(&server).await;
        client.services().await.unwrap();

        assert_eq!(client.system_health().await.unwrap(), SystemHealth::Unknown);
    }

    #[tokio::test]
    async fn test_invalid_form_never_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RESEND_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.resend(&ResendForm::new("", "payment")).await.unwrap_err();

        assert!(matches!(err, MonitorError::Validation(_)));
        assert!(!client.is_resending());
    }

    #[tokio::test]
    async fn test_resend_invalidates_packets_and_activities() {
        let server = MockServer::start().await;
        let fixtures = Fixtures::builtin();
        mount_get(&server, PACKETS_KEY, json!(fixtures.recent_packets), 2).await;
        mount_get(&server, ACTIVITIES_KEY, json!(fixtures.activities), 1).await;
        mount_get(&server, LOGS_KEY, json!(fixtures.logs), 1).await;
        Mock::given(method("POST"))
            .and(path(RESEND_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Packet PKT-8292 has been queued for resending to payment service",
                "data": {
                    "id": "PKT-8292",
                    "service": "payment",
                    "priority": "normal",
                    "options": {
                        "forceResend": false,
                        "skipValidation": false,
                        "notifyOnCompletion": false
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.recent_packets().await.unwrap();
        client.recent_activities().await.unwrap();
        client.logs().await.unwrap();

        let response = client.resend(&ResendForm::new("PKT-8292", "payment")).await.unwrap();
        assert!(response.success);
        assert!(!client.is_resending());

        assert_eq!(client.cache().keys().await, vec![LOGS_KEY.to_string()]);

        // Refetched after invalidation; logs stay cached
        client.recent_packets().await.unwrap();
        client.logs().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_resend_keeps_cache() {
        let server = MockServer::start().await;
        let fixtures = Fixtures::builtin();
        mount_get(&server, PACKETS_KEY, json!(fixtures.recent_packets), 1).await;
        Mock::given(method("POST"))
            .and(path(RESEND_PATH))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "message": "Packet ID and service are required" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.recent_packets().await.unwrap();

        let err = client.resend(&ResendForm::new("PKT-1", "order")).await.unwrap_err();
        assert!(matches!(err, MonitorError::Api { status: 400, .. }));
        assert!(client.cache().contains(PACKETS_KEY).await);
    }

    fn queued_body(id: &str, service: &str) -> serde_json::Value {
        let message = format!("Packet {} has been queued for resending to {} service", id, service);
        json!({
            "success": true,
            "message": message,
            "data": { "id": id, "service": service, "priority": "normal", "options": {} }
        })
    }

    #[tokio::test]
    async fn test_overlapping_resends_stay_in_flight() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RESEND_PATH))
            .and(body_partial_json(json!({ "id": "PKT-SLOW" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(queued_body("PKT-SLOW", "order"))
                    .set_delay(Duration::from_millis(800)),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(RESEND_PATH))
            .and(body_partial_json(json!({ "id": "PKT-FAST" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(queued_body("PKT-FAST", "order"))
                    .set_delay(Duration::from_millis(100)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let slow_form = ResendForm::new("PKT-SLOW", "order");
        let fast_form = ResendForm::new("PKT-FAST", "order");

        let (slow, fast, resending_midway) = tokio::join!(
            client.resend(&slow_form),
            client.resend(&fast_form),
            async {
                sleep(Duration::from_millis(400)).await;
                client.is_resending()
            }
        );

        assert!(fast.is_ok());
        assert!(slow.is_ok());
        assert!(resending_midway);
        assert!(!client.is_resending());
    }

    #[tokio::test]
    async fn test_wrongly_shaped_document_is_not_cached() {
        let server = MockServer::start().await;
        mount_get(&server, SERVICES_KEY, json!([{ "id": "1" }]), 2).await;

        let client = client_for(&server).await;

        for _ in 0..2 {
            let err = client.services().await.unwrap_err();
            assert!(matches!(err, MonitorError::Fetch(_)));
        }

        assert!(!client.cache().contains(SERVICES_KEY).await);
        assert_eq!(client.system_health().await.unwrap(), SystemHealth::Loading);
    }

    #[tokio::test]
    async fn test_unreachable_api_is_fetch_failure() {
        let transport = HttpTransport::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let client = DashboardClient::new(transport);

        let err = client.logs().await.unwrap_err();
        assert!(matches!(err, MonitorError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_log_page_resets_on_search() {
        let server = MockServer::start().await;
        let fixtures = Fixtures::builtin();
        mount_get(&server, LOGS_KEY, json!(fixtures.logs), 1).await;

        let client = client_for(&server).await;
        let mut browser = LogBrowser::new(10);

        let page = client.log_page(&mut browser).await.unwrap();
        assert_eq!(page.total_pages, 2);

        browser.next(&fixtures.logs);
        assert_eq!(client.log_page(&mut browser).await.unwrap().entries.len(), 4);

        browser.set_search(Some("payment"));
        let page = client.log_page(&mut browser).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_items, 4);
    }

    #[tokio::test]
    async fn test_exchange_summary_and_incident_filter() {
        let server = MockServer::start().await;
        let fixtures = Fixtures::builtin();
        mount_get(&server, METRICS_KEY, json!(fixtures.chart_data), 1).await;
        mount_get(&server, INCIDENTS_KEY, json!(fixtures.incidents), 1).await;

        let client = client_for(&server).await;

        let summary = client.exchange_summary().await.unwrap();
        assert_eq!(summary.failed, 1_260);

        let warnings = client.incidents_by_severity(Some(Severity::Warning)).await.unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(client.incidents_by_severity(None).await.unwrap().len(), 3);
    }
}
