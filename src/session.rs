//! Owned state of one explorer window.
//!
//! Searches and selections are split into a `begin_*` step (validation and a
//! generation ticket) and a `finish_*` step (install the outcome if the
//! ticket is still current). The UI shell may run the work in between on a
//! background thread. Outcomes overtaken by a later action are dropped, so a
//! render never mixes stale and fresh results.

use crate::api::{Client, HttpGet, SearchKind};
use crate::country::CountryRecord;
use crate::error::{FetchError, QueryError};
use crate::flag::FlagSource;
use crate::presenter::{self, DisplayBundle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub kind: SearchKind,
    /// Trimmed, never empty.
    pub query: String,
    generation: u64,
}

/// A record to present, detached from the session so it can cross threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectRequest {
    pub index: usize,
    pub record: CountryRecord,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Session {
    results: Vec<CountryRecord>,
    selected: Option<usize>,
    display: Option<DisplayBundle>,
    status: Option<String>,
    search_generation: u64,
    display_generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[CountryRecord] {
        &self.results
    }

    /// Common names of the current results, for the selectable list.
    pub fn country_names(&self) -> Vec<&str> {
        self.results.iter().map(CountryRecord::common_name).collect()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn display(&self) -> Option<&DisplayBundle> {
        self.display.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// What the title area shows: a status message wins over the country title.
    pub fn headline(&self) -> Option<&str> {
        self.status()
            .or_else(|| self.display.as_ref().map(|d| d.title.as_str()))
    }

    pub fn begin_search(&mut self, kind: SearchKind, raw: &str) -> Result<SearchRequest, QueryError> {
        let query = raw.trim();
        if query.is_empty() {
            self.status = Some(empty_query_message(kind).to_string());
            return Err(QueryError::EmptyQuery);
        }

        self.search_generation += 1;
        self.display_generation += 1;

        Ok(SearchRequest {
            kind,
            query: query.to_string(),
            generation: self.search_generation,
        })
    }

    /// Installs the outcome of `request`. A non-empty result replaces the
    /// previous one wholesale and yields the first record to present; an
    /// empty result or any failure clears everything and sets a status.
    pub fn finish_search(
        &mut self,
        request: &SearchRequest,
        outcome: Result<Vec<CountryRecord>, FetchError>,
    ) -> Option<SelectRequest> {
        if request.generation != self.search_generation {
            log::debug!("Dropping stale {:?} search for {:?}", request.kind, request.query);
            return None;
        }

        match outcome {
            Ok(records) if !records.is_empty() => {
                self.results = records;
                self.display = None;
                self.status = None;
                self.begin_select(0)
            }
            Ok(_) => {
                self.reset();
                self.status = Some(no_results_message(request));
                None
            }
            Err(err) => {
                log::warn!("{:?} search for {:?} failed: {}", request.kind, request.query, err);
                self.reset();
                self.status = Some(failure_message(request, &err));
                None
            }
        }
    }

    /// Out-of-range indices are ignored.
    pub fn begin_select(&mut self, index: usize) -> Option<SelectRequest> {
        let record = self.results.get(index)?.clone();

        self.display_generation += 1;
        self.selected = Some(index);

        Some(SelectRequest {
            index,
            record,
            generation: self.display_generation,
        })
    }

    /// Returns whether the bundle was installed.
    pub fn finish_select(&mut self, request: &SelectRequest, bundle: DisplayBundle) -> bool {
        if request.generation != self.display_generation {
            log::debug!("Dropping stale display of {}", request.record.common_name());
            return false;
        }

        self.display = Some(bundle);
        self.status = None;
        true
    }

    pub fn clear(&mut self) {
        self.search_generation += 1;
        self.display_generation += 1;
        self.reset();
        self.status = None;
    }

    /// Search, install and present the first match, all on the calling thread.
    pub fn search<T: HttpGet>(&mut self, client: &Client<T>, kind: SearchKind, raw: &str) {
        let Ok(request) = self.begin_search(kind, raw) else {
            return;
        };

        let outcome = client.fetch(request.kind, &request.query);
        if let Some(select) = self.finish_search(&request, outcome) {
            self.present(client, select);
        }
    }

    pub fn search_by_name<T: HttpGet>(&mut self, client: &Client<T>, name: &str) {
        self.search(client, SearchKind::Name, name);
    }

    pub fn search_by_region<T: HttpGet>(&mut self, client: &Client<T>, region: &str) {
        self.search(client, SearchKind::Region, region);
    }

    /// Select and present on the calling thread.
    pub fn select(&mut self, flags: &impl FlagSource, index: usize) {
        if let Some(request) = self.begin_select(index) {
            self.present(flags, request);
        }
    }

    fn present(&mut self, flags: &impl FlagSource, request: SelectRequest) {
        let bundle = presenter::present(&request.record, flags);
        self.finish_select(&request, bundle);
    }

    fn reset(&mut self) {
        self.results.clear();
        self.selected = None;
        self.display = None;
    }
}

fn empty_query_message(kind: SearchKind) -> &'static str {
    match kind {
        SearchKind::Name => "Please enter a country name",
        SearchKind::Region => "Please enter a region",
    }
}

fn no_results_message(request: &SearchRequest) -> String {
    match request.kind {
        SearchKind::Name => "No country found".to_string(),
        SearchKind::Region => format!("No countries found in {}", request.query),
    }
}

fn failure_message(request: &SearchRequest, err: &FetchError) -> String {
    match (request.kind, err) {
        (SearchKind::Name, FetchError::NotFound) => "No country found".to_string(),
        (SearchKind::Region, FetchError::NotFound) => {
            format!("Region '{}' not found", request.query)
        }
        (SearchKind::Name, FetchError::Status(_)) => "Error getting country data".to_string(),
        (SearchKind::Region, FetchError::Status(_)) => "Error getting region data".to_string(),
        (_, FetchError::Transport(_) | FetchError::Malformed(_)) => format!("Error: {}", err),
    }
}
