//! Client configuration, the per-base factory and the per-table client.

use crate::{
    common::{self, response},
    error::{Error, Result},
    read, transport, write,
};

use serde::Serialize;
use std::{fmt, sync, time};
use url::Url;

/// Default API root.
pub const DEFAULT_API_ROOT: &str = "https://api.airtable.com";

/// Default API version path segment.
pub const DEFAULT_VERSION: &str = "v0";

/// Default pause between paced calls, five calls per second.
pub const DEFAULT_RATE_LIMIT_INTERVAL: time::Duration = time::Duration::from_millis(200);

/// Default number of records per create or update request.
pub const DEFAULT_MAX_RECORDS_PER_REQUEST: usize = 10;

/// Default upper bound on pages fetched by one paginated read.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Client settings.
///
/// ```rust
/// use airtable_crud::client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .with_rate_limit_interval(Duration::from_millis(250))
///     .with_max_pages(100)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_pages, 100);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    /// Root of the REST API, e.g. `https://api.airtable.com`.
    pub api_root: String,
    /// Upper bound on pages fetched by one paginated read.
    pub max_pages: usize,
    /// Records per create or update request, and deletes per pacing group.
    pub max_records_per_request: usize,
    /// Pause between paced calls.
    pub rate_limit_interval: time::Duration,
    /// API version path segment.
    pub version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            max_records_per_request: DEFAULT_MAX_RECORDS_PER_REQUEST,
            rate_limit_interval: DEFAULT_RATE_LIMIT_INTERVAL,
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl ClientConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(Error::InvalidConfiguration(
                "max_pages must be positive".to_string(),
            ));
        }
        if self.max_records_per_request == 0 {
            return Err(Error::InvalidConfiguration(
                "max_records_per_request must be positive".to_string(),
            ));
        }
        if self.version.is_empty() {
            return Err(Error::InvalidConfiguration(
                "version must not be empty".to_string(),
            ));
        }
        let api_root = Url::parse(&self.api_root)?;
        if api_root.cannot_be_a_base() {
            return Err(Error::InvalidConfiguration(format!(
                "api root cannot carry a path: {}",
                self.api_root
            )));
        }
        Ok(())
    }

    fn table_url(&self, base_id: &str, table_name: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_root)?;
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidConfiguration(format!(
                    "api root cannot carry a path: {}",
                    self.api_root
                ))
            })?
            .pop_if_empty()
            .push(&self.version)
            .push(base_id)
            .push(table_name);
        Ok(url)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Override the API root.
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.config.api_root = api_root.into();
        self
    }

    /// Override the API version segment.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Override the pause between paced calls.
    pub fn with_rate_limit_interval(mut self, interval: time::Duration) -> Self {
        self.config.rate_limit_interval = interval;
        self
    }

    /// Override the number of records per batch request.
    pub fn with_max_records_per_request(mut self, max_records: usize) -> Self {
        self.config.max_records_per_request = max_records;
        self
    }

    /// Override the page limit of paginated reads.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Paces calls shared by every client of one factory.
///
/// Every request takes a slot with [`RateLimiter::acquire`]: slots are handed
/// out one interval apart, whichever client asks, so concurrent workers are
/// spread over time instead of bursting. A [`RateLimiter::wait`] blocks until
/// the next slot opens without taking it. The state is only locked while a
/// slot is computed, never while sleeping.
pub struct RateLimiter {
    interval: time::Duration,
    next_slot: sync::Mutex<Option<time::Instant>>,
    sleep: sync::Arc<dyn transport::Sleep>,
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    /// Build a limiter spacing slots `interval` apart, pausing through `sleep`.
    pub fn new(interval: time::Duration, sleep: sync::Arc<dyn transport::Sleep>) -> Self {
        Self {
            interval,
            next_slot: sync::Mutex::new(None),
            sleep,
        }
    }

    fn lock(&self) -> sync::MutexGuard<'_, Option<time::Instant>> {
        self.next_slot
            .lock()
            .unwrap_or_else(sync::PoisonError::into_inner)
    }

    /// Take the next free slot and sleep until it opens.
    pub fn acquire(&self) {
        let remaining = {
            let mut next_slot = self.lock();
            let now = self.sleep.now();
            let slot = next_slot.map_or(now, |next| next.max(now));
            *next_slot = Some(slot + self.interval);
            slot.saturating_duration_since(now)
        };
        self.pause(remaining);
    }

    /// Sleep until the next free slot opens, leaving it to the next request.
    pub fn wait(&self) {
        let remaining = {
            let next_slot = self.lock();
            let now = self.sleep.now();
            next_slot.map_or(time::Duration::ZERO, |next| {
                next.saturating_duration_since(now)
            })
        };
        self.pause(remaining);
    }

    fn pause(&self, remaining: time::Duration) {
        if !remaining.is_zero() {
            tracing::debug!(?remaining, "waiting for rate limit");
            self.sleep.sleep(remaining);
        }
    }
}

/// Binds a base and a credential and creates one [`TableClient`] per table.
///
/// ```rust,no_run
/// use airtable_crud::client::ClientFactory;
/// # use airtable_crud::transport::{HttpRequest, HttpResponse, Transport};
/// # struct MyTransport;
/// # impl Transport for MyTransport {
/// #     fn fetch(&self, _: HttpRequest) -> Result<HttpResponse, airtable_crud::error::TransportError> {
/// #         unimplemented!()
/// #     }
/// # }
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let factory = ClientFactory::new("appXXXXXXXX", "pat.secret", false, Arc::new(MyTransport));
/// let tasks = factory.create("Tasks")?;
/// let done = tasks.get_all_by("Status", "Done", Default::default())?;
/// println!("{} tasks done", done.size());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ClientFactory {
    base_id: String,
    config: ClientConfig,
    credential: String,
    debug: bool,
    limiter: sync::Arc<RateLimiter>,
    sleep: sync::Arc<dyn transport::Sleep>,
    transport: sync::Arc<dyn transport::Transport>,
}

impl fmt::Debug for ClientFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientFactory")
            .field("base_id", &self.base_id)
            .field("config", &self.config)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl ClientFactory {
    /// Bind a base id, a bearer credential and the debug flag.
    ///
    /// With `debug` set, every composed URL, body and response is logged at
    /// `INFO` level.
    pub fn new(
        base_id: impl Into<String>,
        credential: impl Into<String>,
        debug: bool,
        transport: sync::Arc<dyn transport::Transport>,
    ) -> Self {
        let config = ClientConfig::default();
        let sleep: sync::Arc<dyn transport::Sleep> = sync::Arc::new(transport::ThreadSleep);
        let limiter = sync::Arc::new(RateLimiter::new(
            config.rate_limit_interval,
            sleep.clone(),
        ));
        Self {
            base_id: base_id.into(),
            config,
            credential: credential.into(),
            debug,
            limiter,
            sleep,
            transport,
        }
    }

    /// Replace the configuration.
    ///
    /// The factory gets a fresh [`RateLimiter`] for the new interval. Clients
    /// created earlier, and earlier clones of the factory, keep pacing on the
    /// previous one, so configure the factory before creating clients.
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self.reset_limiter();
        self
    }

    /// Replace the sleep primitive used for pacing.
    ///
    /// Like [`ClientFactory::with_config`], this starts a fresh
    /// [`RateLimiter`] that earlier clients do not share.
    pub fn with_sleep(mut self, sleep: sync::Arc<dyn transport::Sleep>) -> Self {
        self.sleep = sleep;
        self.reset_limiter();
        self
    }

    fn reset_limiter(&mut self) {
        self.limiter = sync::Arc::new(RateLimiter::new(
            self.config.rate_limit_interval,
            self.sleep.clone(),
        ));
    }

    /// The bound base id.
    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    /// Create a client for `table_name`.
    ///
    /// Clients created by the same factory share one [`RateLimiter`].
    pub fn create(&self, table_name: &str) -> Result<TableClient> {
        self.config.validate()?;
        let base_url = self.config.table_url(&self.base_id, table_name)?;
        if self.debug {
            tracing::info!(%base_url, "created table client");
        }
        Ok(TableClient {
            base_url,
            config: self.config.clone(),
            credential: self.credential.clone(),
            debug: self.debug,
            limiter: self.limiter.clone(),
            table_name: table_name.to_string(),
            transport: self.transport.clone(),
        })
    }
}

/// Client bound to one table of one base.
///
/// Holds no state besides its binding: every call is independent and can be
/// retried by the caller. Cloning is cheap and clones share the rate limiter.
#[derive(Clone)]
pub struct TableClient {
    base_url: Url,
    config: ClientConfig,
    credential: String,
    debug: bool,
    limiter: sync::Arc<RateLimiter>,
    table_name: String,
    transport: sync::Arc<dyn transport::Transport>,
}

impl fmt::Debug for TableClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableClient")
            .field("base_url", &self.base_url.as_str())
            .field("debug", &self.debug)
            .field("table_name", &self.table_name)
            .finish_non_exhaustive()
    }
}

impl TableClient {
    /// URL of the table, `<api-root>/<version>/<base>/<table>`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The bound table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The limiter pacing this client.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub(crate) fn record_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidConfiguration(format!("not a base url: {}", self.base_url)))?
            .push(id);
        Ok(url)
    }

    pub(crate) fn fetch_page(
        &self,
        params: &common::QueryParams,
    ) -> Result<Option<response::Body>> {
        let mut url = self.base_url.clone();
        if !params.is_empty() {
            url.set_query(Some(&params.to_query_string()));
        }
        if self.debug {
            tracing::info!(?params, "query parameters");
        }
        self.execute(transport::Method::Get, url, None)
    }

    pub(crate) fn send_json<T: Serialize>(
        &self,
        method: transport::Method,
        url: Url,
        payload: &T,
    ) -> Result<Option<response::Body>> {
        let body = serde_json::to_string(payload)?;
        self.execute(method, url, Some(body))
    }

    pub(crate) fn delete_record(&self, id: &str) -> Result<Option<response::Body>> {
        let url = self.record_url(id)?;
        self.execute(transport::Method::Delete, url, None)
    }

    pub(crate) fn wait(&self) {
        self.limiter.wait();
    }

    fn execute(
        &self,
        method: transport::Method,
        url: Url,
        body: Option<String>,
    ) -> Result<Option<response::Body>> {
        let mut request = transport::HttpRequest {
            method,
            url: url.into(),
            ..Default::default()
        };
        request.headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.credential),
        );
        if let Some(body) = body {
            request.content_type = Some("application/json".to_string());
            request.body = Some(body);
        }
        if self.debug {
            tracing::info!(
                method = %request.method,
                url = %request.url,
                body = request.body.as_deref().unwrap_or_default(),
                "sending request"
            );
        }
        self.limiter.acquire();
        let response = self.transport.fetch(request).map_err(Error::Transport)?;
        if self.debug {
            tracing::info!(
                status_code = response.status_code,
                body = %response.body,
                "received response"
            );
        }
        Ok(response::Body::decode(&response.body))
    }

    /// Find the record with the given id.
    pub fn find(&self, id: &str, options: read::common::FindOptions) -> Result<response::Response> {
        read::find::Find {
            id: id.to_string(),
            options,
        }
        .send(self)
    }

    /// Find the first record whose `field` equals `value`.
    pub fn find_by(
        &self,
        field: &str,
        value: &str,
        options: read::common::FindOptions,
    ) -> Result<response::Response> {
        read::find::FindBy {
            field: field.to_string(),
            options,
            value: value.to_string(),
        }
        .send(self)
    }

    /// Find the first record matching `formula`.
    pub fn find_by_formula(
        &self,
        formula: impl Into<common::formula::Formula>,
        options: read::common::FindOptions,
    ) -> Result<response::Response> {
        read::find::FindByFormula {
            formula: formula.into(),
            options,
        }
        .send(self)
    }

    /// Fetch the first record of the table.
    pub fn first(&self, options: read::common::FindOptions) -> Result<response::Response> {
        read::find::First { options }.send(self)
    }

    /// Fetch one page of records.
    pub fn get(&self, options: read::common::RequestOptions) -> Result<response::Response> {
        read::get::Get { options }.send(self)
    }

    /// Fetch one page of records whose `field` equals `value`.
    pub fn get_by(
        &self,
        field: &str,
        value: &str,
        options: read::common::RequestOptions,
    ) -> Result<response::Response> {
        read::get::GetBy {
            field: field.to_string(),
            options,
            value: value.to_string(),
        }
        .send(self)
    }

    /// Fetch one page of records matching `formula`.
    pub fn get_by_formula(
        &self,
        formula: impl Into<common::formula::Formula>,
        options: read::common::RequestOptions,
    ) -> Result<response::Response> {
        read::get::GetByFormula {
            formula: formula.into(),
            options,
        }
        .send(self)
    }

    /// Fetch every page of records.
    pub fn get_all(&self, options: read::common::RequestOptions) -> Result<response::Response> {
        read::get_all::GetAll { options }.send(self)
    }

    /// Fetch every page of records whose `field` equals `value`.
    pub fn get_all_by(
        &self,
        field: &str,
        value: &str,
        options: read::common::RequestOptions,
    ) -> Result<response::Response> {
        read::get_all::GetAllBy {
            field: field.to_string(),
            options,
            value: value.to_string(),
        }
        .send(self)
    }

    /// Create one record.
    pub fn insert<T: Serialize>(&self, fields: T) -> Result<response::Response> {
        write::insert::Insert { fields }.send(self)
    }

    /// Create many records, in chunks.
    pub fn bulk_insert<T: Serialize>(&self, fields_list: Vec<T>) -> Result<response::Response> {
        write::bulk_insert::BulkInsert { fields_list }.send(self)
    }

    /// Overwrite the given fields of one record, leaving the others untouched.
    pub fn update<T: Serialize>(&self, id: &str, fields: T) -> Result<response::Response> {
        write::update::Update {
            fields,
            id: id.to_string(),
        }
        .send(self)
    }

    /// Replace all fields of one record, clearing the omitted ones.
    pub fn replace<T: Serialize>(&self, id: &str, fields: T) -> Result<response::Response> {
        write::update::Replace {
            fields,
            id: id.to_string(),
        }
        .send(self)
    }

    /// Update many records, in chunks.
    pub fn bulk_update<T: Serialize>(
        &self,
        records: Vec<write::bulk_update::RecordUpdate<T>>,
    ) -> Result<response::Response> {
        write::bulk_update::BulkUpdate { records }.send(self)
    }

    /// Delete one record.
    pub fn delete(&self, id: &str) -> Result<response::Response> {
        write::delete::Delete { id: id.to_string() }.send(self)
    }

    /// Delete many records, one request per record.
    pub fn bulk_delete(
        &self,
        targets: write::bulk_delete::BulkDelete,
    ) -> Result<response::Response> {
        targets.send(self)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::transport::mock;

    pub(crate) struct Fixture {
        pub(crate) client: TableClient,
        pub(crate) sleep: sync::Arc<mock::MockSleep>,
        pub(crate) transport: sync::Arc<mock::MockTransport>,
    }

    pub(crate) fn fixture<I, S>(bodies: I) -> Fixture
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        fixture_with_config(bodies, config())
    }

    /// Defaults with an interval no test run can outlast, so every wait sleeps.
    pub(crate) fn config() -> ClientConfig {
        ClientConfig {
            rate_limit_interval: time::Duration::from_secs(60),
            ..Default::default()
        }
    }

    pub(crate) fn fixture_with_config<I, S>(bodies: I, config: ClientConfig) -> Fixture
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let transport = sync::Arc::new(mock::MockTransport::new(bodies));
        let sleep = sync::Arc::new(mock::MockSleep::default());
        let client = ClientFactory::new("app123", "secret", false, transport.clone())
            .with_config(config)
            .with_sleep(sleep.clone())
            .create("Tasks")
            .unwrap();
        Fixture {
            client,
            sleep,
            transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock;

    use rstest::rstest;

    #[rstest]
    #[case::simple("Tasks", "https://api.airtable.com/v0/app123/Tasks")]
    #[case::spaces("My Tasks", "https://api.airtable.com/v0/app123/My%20Tasks")]
    #[case::slash("a/b", "https://api.airtable.com/v0/app123/a%2Fb")]
    fn test_base_url(#[case] table_name: &str, #[case] expected: &str) {
        let transport = sync::Arc::new(mock::MockTransport::default());
        let client = ClientFactory::new("app123", "secret", false, transport)
            .create(table_name)
            .unwrap();
        assert_eq!(client.base_url().as_str(), expected);
        assert_eq!(client.table_name(), table_name);
    }

    #[test]
    fn test_custom_api_root() {
        let config = ClientConfig::builder()
            .with_api_root("http://localhost:8080/proxy/")
            .with_version("v1")
            .build()
            .unwrap();
        let transport = sync::Arc::new(mock::MockTransport::default());
        let client = ClientFactory::new("app1", "secret", true, transport)
            .with_config(config)
            .create("Tasks")
            .unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "http://localhost:8080/proxy/v1/app1/Tasks"
        );
        assert_eq!(
            client.record_url("rec1").unwrap().as_str(),
            "http://localhost:8080/proxy/v1/app1/Tasks/rec1"
        );
    }

    #[rstest]
    #[case::zero_pages(ClientConfig::builder().with_max_pages(0))]
    #[case::zero_records(ClientConfig::builder().with_max_records_per_request(0))]
    #[case::empty_version(ClientConfig::builder().with_version(""))]
    #[case::not_a_base(ClientConfig::builder().with_api_root("mailto:someone@example.com"))]
    fn test_invalid_config(#[case] builder: ClientConfigBuilder) {
        assert!(matches!(
            builder.build(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unparsable_api_root() {
        let actual = ClientConfig::builder().with_api_root("not a url").build();
        assert!(matches!(actual, Err(Error::Url(_))));
    }

    #[test]
    fn test_request_carries_bearer_credential() {
        let fixture = testing::fixture([r#"{"records": []}"#]);
        fixture.client.get(Default::default()).unwrap();
        let requests = fixture.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
        assert_eq!(requests[0].method, transport::Method::Get);
        assert_eq!(requests[0].url, "https://api.airtable.com/v0/app123/Tasks");
        assert_eq!(requests[0].body, None);
    }

    #[test]
    fn test_transport_failure_propagates() {
        let fixture = testing::fixture(Vec::<String>::new());
        fixture.transport.push_failure("connection reset");
        let actual = fixture.client.delete("rec1");
        assert!(matches!(actual, Err(Error::Transport(_))));
    }

    #[test]
    fn test_clients_share_rate_limiter() {
        let transport = sync::Arc::new(mock::MockTransport::default());
        let sleep = sync::Arc::new(mock::MockSleep::default());
        let factory = ClientFactory::new("app1", "secret", false, transport)
            .with_config(testing::config())
            .with_sleep(sleep.clone());
        let tasks = factory.create("Tasks").unwrap();
        let people = factory.create("People").unwrap();
        tasks.rate_limiter().wait();
        assert!(sleep.durations().is_empty());
        people.rate_limiter().acquire();
        assert!(sleep.durations().is_empty());
        tasks.rate_limiter().wait();
        tasks.rate_limiter().acquire();
        assert_eq!(sleep.durations(), vec![time::Duration::from_secs(60)]);
    }

    #[test]
    fn test_one_shot_calls_are_paced() {
        let fixture = testing::fixture(Vec::<String>::new());
        let other = fixture.client.clone();
        fixture.client.get(Default::default()).unwrap();
        other.insert(serde_json::json!({"Name": "a"})).unwrap();
        fixture.client.delete("rec1").unwrap();
        assert_eq!(fixture.transport.requests().len(), 3);
        assert_eq!(
            fixture.sleep.durations(),
            vec![time::Duration::from_secs(60); 2]
        );
    }

    #[test]
    fn test_concurrent_workers_are_paced() {
        let interval = time::Duration::from_millis(20);
        let config = ClientConfig::builder()
            .with_rate_limit_interval(interval)
            .build()
            .unwrap();
        let transport = sync::Arc::new(mock::MockTransport::default());
        let client = ClientFactory::new("app1", "secret", false, transport.clone())
            .with_config(config)
            .create("Tasks")
            .unwrap();
        let started = time::Instant::now();
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let client = client.clone();
                std::thread::spawn(move || client.get(Default::default()).map(|_| ()))
            })
            .collect();
        for worker in workers {
            worker.join().unwrap().unwrap();
        }
        assert_eq!(transport.requests().len(), 8);
        assert!(started.elapsed() >= interval * 7);
    }

    /// Notes, for every pause, whether the limiter state was locked.
    #[derive(Default)]
    struct LockCheckSleep {
        limiter: sync::OnceLock<sync::Weak<RateLimiter>>,
        locked: sync::Mutex<Vec<bool>>,
    }

    impl transport::Sleep for LockCheckSleep {
        fn sleep(&self, _duration: time::Duration) {
            let locked = self
                .limiter
                .get()
                .and_then(sync::Weak::upgrade)
                .is_some_and(|limiter| limiter.next_slot.try_lock().is_err());
            self.locked.lock().unwrap().push(locked);
        }
    }

    #[test]
    fn test_rate_limiter_sleeps_unlocked() {
        let sleep = sync::Arc::new(LockCheckSleep::default());
        let limiter = sync::Arc::new(RateLimiter::new(
            time::Duration::from_secs(60),
            sleep.clone(),
        ));
        sleep.limiter.set(sync::Arc::downgrade(&limiter)).unwrap();
        limiter.acquire();
        limiter.acquire();
        limiter.wait();
        assert_eq!(*sleep.locked.lock().unwrap(), vec![false, false]);
    }

    #[test]
    fn test_reconfigured_factory_starts_new_limiter() {
        let transport = sync::Arc::new(mock::MockTransport::default());
        let factory = ClientFactory::new("app1", "secret", false, transport);
        let before = factory.create("Tasks").unwrap();
        let clone = factory.clone().create("People").unwrap();
        let factory = factory.with_config(testing::config());
        let after = factory.create("Tasks").unwrap();
        let again = factory.create("People").unwrap();
        assert!(sync::Arc::ptr_eq(&before.limiter, &clone.limiter));
        assert!(!sync::Arc::ptr_eq(&before.limiter, &after.limiter));
        assert!(sync::Arc::ptr_eq(&after.limiter, &again.limiter));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_clients_are_send_and_sync() {
        assert_send_sync::<ClientFactory>();
        assert_send_sync::<RateLimiter>();
        assert_send_sync::<TableClient>();
    }
}
