//! Log filtering and pagination for the log browser

use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Range;

use crate::models::log::LogEntry;

/// Level value that disables level filtering
pub const ALL_LEVELS: &str = "all";

/// Independent, optional filter criteria. Empty strings behave like `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub level: Option<String>,
    pub search: Option<String>,
    pub service: Option<String>,
}

impl LogQuery {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.matches_level(entry) && self.matches_search(entry) && self.matches_service(entry)
    }

    fn matches_level(&self, entry: &LogEntry) -> bool {
        match self.level.as_deref() {
            None | Some("") => true,
            Some(level) if level.eq_ignore_ascii_case(ALL_LEVELS) => true,
            Some(level) => level.eq_ignore_ascii_case(entry.level.as_str()),
        }
    }

    fn matches_search(&self, entry: &LogEntry) -> bool {
        match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                entry.message.to_lowercase().contains(&term)
                    || entry.service.to_lowercase().contains(&term)
            }
        }
    }

    fn matches_service(&self, entry: &LogEntry) -> bool {
        match self.service.as_deref() {
            None | Some("") => true,
            Some(service) => entry.service.to_lowercase().contains(&service.to_lowercase()),
        }
    }
}

/// Entries passing `query`, in source order. The source is left untouched.
pub fn filter_logs(logs: &[LogEntry], query: &LogQuery) -> Vec<LogEntry> {
    logs.iter().filter(|entry| query.matches(entry)).cloned().collect()
}

/// Sorted, de-duplicated service names, used to fill the service picker.
pub fn distinct_services(logs: &[LogEntry]) -> Vec<String> {
    logs.iter()
        .map(|entry| entry.service.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Clamped 1-indexed page cursor over a collection of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Pager {
    /// `page_size` must be non-zero; configuration rejects zero before it gets here.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// An empty collection still has one (empty) page.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Record a new collection size, pulling the cursor back if it fell off the end.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page = self.page.min(self.total_pages());
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn prev(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.page < self.total_pages() {
            self.page += 1;
        }
    }

    pub fn goto(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Index range of the current page within the collection.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total_items);
        let end = (self.page * self.page_size).min(self.total_items);
        start..end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    pub entries: Vec<LogEntry>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Filter criteria plus page cursor, as held by the log browser.
///
/// Changing a criterion sends the cursor back to page 1 so a shrinking
/// result never leaves it on a page that no longer exists. Setting the
/// value already held keeps the page.
#[derive(Debug, Clone)]
pub struct LogBrowser {
    query: LogQuery,
    pager: Pager,
}

impl LogBrowser {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: LogQuery::default(),
            pager: Pager::new(page_size),
        }
    }

    pub fn query(&self) -> &LogQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn set_level(&mut self, level: Option<&str>) {
        if self.query.level.as_deref() != level {
            self.query.level = level.map(str::to_string);
            self.pager.reset();
        }
    }

    pub fn set_search(&mut self, search: Option<&str>) {
        if self.query.search.as_deref() != search {
            self.query.search = search.map(str::to_string);
            self.pager.reset();
        }
    }

    pub fn set_service(&mut self, service: Option<&str>) {
        if self.query.service.as_deref() != service {
            self.query.service = service.map(str::to_string);
            self.pager.reset();
        }
    }

    pub fn prev(&mut self) {
        self.pager.prev();
    }

    /// Needs the current collection to know where the last page is.
    pub fn next(&mut self, logs: &[LogEntry]) {
        self.sync_total(logs);
        self.pager.next();
    }

    pub fn goto(&mut self, page: usize, logs: &[LogEntry]) {
        self.sync_total(logs);
        self.pager.goto(page);
    }

    /// Service names offered for the current level and search selection.
    pub fn services(&self, logs: &[LogEntry]) -> Vec<String> {
        let without_service = LogQuery {
            service: None,
            ..self.query.clone()
        };
        distinct_services(&filter_logs(logs, &without_service))
    }

    /// Current page of `logs` under the active criteria.
    pub fn view(&mut self, logs: &[LogEntry]) -> LogPage {
        let filtered = filter_logs(logs, &self.query);
        self.pager.set_total_items(filtered.len());

        LogPage {
            entries: filtered[self.pager.range()].to_vec(),
            page: self.pager.page(),
            page_size: self.pager.page_size(),
            total_pages: self.pager.total_pages(),
            total_items: self.pager.total_items(),
        }
    }

    fn sync_total(&mut self, logs: &[LogEntry]) {
        let total = logs.iter().filter(|entry| self.query.matches(entry)).count();
        self.pager.set_total_items(total);
    }
}
