//! In-memory catalog for driving the search, session and browse layers.
//!
//! Search pages are keyed by breed filter and offset. A page can be gated so
//! its response is held back until the test releases it, which lets tests
//! control the order in which overlapping searches finish. Breed list loads
//! can be gated the same way.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;

use fetchdog::catalog::{
    CatalogApi, CatalogOperation, Credentials, DogRecord, SearchPage, SearchQuery,
};
use fetchdog::error::{FetchDogError, Result};

/// A call made against the mock, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(String),
    Logout,
    ListBreeds,
    Search(SearchQuery),
    Fetch(Vec<String>),
    Match(Vec<String>),
}

type PageKey = (Option<String>, u64);

#[derive(Default)]
struct MockState {
    breeds: Option<Vec<String>>,
    pages: HashMap<PageKey, SearchPage>,
    records: HashMap<String, DogRecord>,
    gates: HashMap<PageKey, Arc<Notify>>,
    breed_gates: Vec<Arc<Notify>>,
    fail_login: bool,
    fail_logout: bool,
    match_result: Option<String>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct MockCatalog {
    state: Mutex<MockState>,
}

/// Build a record with predictable fields
pub fn dog(id: &str, name: &str, breed: &str) -> DogRecord {
    DogRecord {
        id: id.to_string(),
        img: format!("https://img.test/{id}.jpg"),
        name: name.to_string(),
        age: 4,
        zip_code: "60601".to_string(),
        breed: breed.to_string(),
    }
}

fn page_key(query: &SearchQuery) -> PageKey {
    (query.breeds.first().cloned(), query.from)
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Breeds returned by `list_breeds`; without this the call fails
    pub fn with_breeds(self, breeds: &[&str]) -> Self {
        self.state.lock().breeds = Some(breeds.iter().map(|b| b.to_string()).collect());
        self
    }

    /// Register records and serve them as the page for `breed` at `from`
    pub fn with_page(self, breed: Option<&str>, from: u64, dogs: Vec<DogRecord>) -> Self {
        {
            let mut state = self.state.lock();
            let ids: Vec<String> = dogs.iter().map(|d| d.id.clone()).collect();
            let total = ids.len() as u64;
            for dog in dogs {
                state.records.insert(dog.id.clone(), dog);
            }
            state.pages.insert(
                (breed.map(str::to_string), from),
                SearchPage {
                    result_ids: Some(ids),
                    total: Some(total),
                },
            );
        }
        self
    }

    /// Serve a raw search page, e.g. one without a result list
    pub fn with_raw_page(self, breed: Option<&str>, from: u64, page: SearchPage) -> Self {
        self.state
            .lock()
            .pages
            .insert((breed.map(str::to_string), from), page);
        self
    }

    /// Hold back the search response for `breed` at `from` until the returned
    /// handle is notified
    pub fn gate(&self, breed: Option<&str>, from: u64) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.state
            .lock()
            .gates
            .insert((breed.map(str::to_string), from), Arc::clone(&notify));
        notify
    }

    /// Hold back the next `list_breeds` response until the returned handle is
    /// notified. Each call gates one more load, in call order.
    pub fn gate_breeds(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.state.lock().breed_gates.push(Arc::clone(&notify));
        notify
    }

    /// Replace the breeds returned by later `list_breeds` calls
    pub fn set_breeds(&self, breeds: &[&str]) {
        self.state.lock().breeds = Some(breeds.iter().map(|b| b.to_string()).collect());
    }

    pub fn with_match(self, id: &str) -> Self {
        self.state.lock().match_result = Some(id.to_string());
        self
    }

    pub fn failing_login(self) -> Self {
        self.state.lock().fail_login = true;
        self
    }

    pub fn set_fail_logout(&self, fail: bool) {
        self.state.lock().fail_logout = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn search_calls(&self) -> Vec<SearchQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Search(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| matches(c)).count()
    }

    /// Wait until at least `n` searches have been received
    pub async fn wait_for_searches(&self, n: usize) {
        self.wait_for(n, |c| matches!(c, Call::Search(_))).await;
    }

    /// Wait until at least `n` breed list loads have been received
    pub async fn wait_for_breed_loads(&self, n: usize) {
        self.wait_for(n, |c| matches!(c, Call::ListBreeds)).await;
    }

    async fn wait_for(&self, n: usize, matches: impl Fn(&Call) -> bool) {
        for _ in 0..500 {
            if self.count(&matches) >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("timed out waiting for {n} calls");
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push(call);
    }
}

impl CatalogApi for MockCatalog {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        self.record(Call::Login(credentials.name.clone()));
        if self.state.lock().fail_login {
            return Err(FetchDogError::Auth("login failed: HTTP 401 Unauthorized".to_string()));
        }
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.record(Call::Logout);
        if self.state.lock().fail_logout {
            return Err(FetchDogError::Auth("logout failed: HTTP 500".to_string()));
        }
        Ok(())
    }

    async fn list_breeds(&self) -> Result<Vec<String>> {
        let gate = {
            let mut state = self.state.lock();
            state.calls.push(Call::ListBreeds);
            (!state.breed_gates.is_empty()).then(|| state.breed_gates.remove(0))
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        let breeds = self.state.lock().breeds.clone();
        breeds.ok_or_else(|| FetchDogError::fetch(CatalogOperation::ListBreeds, "HTTP 500"))
    }

    async fn search_ids(&self, query: &SearchQuery) -> Result<SearchPage> {
        self.record(Call::Search(query.clone()));
        let key = page_key(query);
        let (gate, page) = {
            let state = self.state.lock();
            (state.gates.get(&key).cloned(), state.pages.get(&key).cloned())
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        page.ok_or_else(|| FetchDogError::fetch(CatalogOperation::SearchIds, "HTTP 500"))
    }

    async fn fetch_records(&self, ids: &[String]) -> Result<Vec<DogRecord>> {
        self.record(Call::Fetch(ids.to_vec()));
        let state = self.state.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.records.get(id).cloned())
            .collect())
    }

    async fn request_match(&self, favorite_ids: &[String]) -> Result<String> {
        self.record(Call::Match(favorite_ids.to_vec()));
        let result = self.state.lock().match_result.clone();
        result.ok_or_else(|| FetchDogError::fetch(CatalogOperation::RequestMatch, "HTTP 500"))
    }
}
