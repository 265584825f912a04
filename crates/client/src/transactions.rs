use std::collections::HashSet;

use api_types::transaction::{
    CategoryType, SortOrder, Transaction, TransactionListParams, TransactionPage,
};

use crate::{
    error::{ClientError, Result},
    http::ApiClient,
};

/// Client-side view filter; applied to already-fetched data, never the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    fn matches(self, kind: CategoryType) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == CategoryType::Income,
            Self::Expense => kind == CategoryType::Expense,
        }
    }
}

/// Server-side query parameters. Changing either one resets the list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub sort: SortOrder,
}

/// Handle for one in-flight page fetch.
///
/// Carries the generation it was issued under; [`TransactionList::apply`]
/// drops results whose generation no longer matches, so a slow stale page
/// can never overwrite state reset by a newer query.
#[derive(Clone, Debug)]
pub struct PageRequest {
    params: TransactionListParams,
    generation: u64,
    reset: bool,
}

impl PageRequest {
    pub fn params(&self) -> &TransactionListParams {
        &self.params
    }
}

/// Paginated, deduplicated, filterable view over the server-side
/// transaction collection.
///
/// The server owns the sort order; the accumulated list preserves it within
/// and across pages and is never re-sorted client-side. Fetching is split
/// into request/apply halves: `start_*` hand out a [`PageRequest`], the
/// caller performs the I/O, and [`apply`](Self::apply) folds the outcome
/// back in under the single-flight and supersession rules.
pub struct TransactionList {
    items: Vec<Transaction>,
    page: u32,
    has_next: bool,
    query: ListQuery,
    filter: TypeFilter,
    in_flight: bool,
    generation: u64,
    last_error: Option<String>,
}

impl Default for TransactionList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_next: false,
            query: ListQuery::default(),
            filter: TypeFilter::default(),
            in_flight: false,
            generation: 0,
            last_error: None,
        }
    }
}

impl TransactionList {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    /// Starts a first-page fetch for the current query.
    ///
    /// Always permitted: bumping the generation supersedes whatever is in
    /// flight, so its late result will be dropped at apply time.
    pub fn start_first_page(&mut self) -> PageRequest {
        self.generation += 1;
        self.in_flight = true;
        PageRequest {
            params: self.params_for_page(1),
            generation: self.generation,
            reset: true,
        }
    }

    /// Pull-to-refresh: a first-page fetch for the current query.
    pub fn start_refresh(&mut self) -> PageRequest {
        self.start_first_page()
    }

    /// Starts fetching the next page, or `None` when there is nothing left
    /// or a fetch is already in flight (concurrent calls are dropped, not
    /// queued).
    pub fn start_next_page(&mut self) -> Option<PageRequest> {
        if !self.has_next || self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(PageRequest {
            params: self.params_for_page(self.page),
            generation: self.generation,
            reset: false,
        })
    }

    /// Updates the search query. Returns the reset fetch to run, or `None`
    /// when the value did not actually change.
    pub fn set_search(&mut self, search: impl Into<String>) -> Option<PageRequest> {
        let search = search.into();
        if search == self.query.search {
            return None;
        }
        self.query.search = search;
        Some(self.start_first_page())
    }

    /// Updates the sort order. Returns the reset fetch to run, or `None`
    /// when the value did not actually change.
    pub fn set_sort(&mut self, sort: SortOrder) -> Option<PageRequest> {
        if sort == self.query.sort {
            return None;
        }
        self.query.sort = sort;
        Some(self.start_first_page())
    }

    /// Folds a fetch outcome back into the list.
    ///
    /// Returns `Ok(true)` when the page was applied, `Ok(false)` when the
    /// request was superseded and its result dropped, and the fetch error
    /// (also recorded as the user-facing error signal) otherwise. A failed
    /// fetch leaves the accumulated list untouched.
    pub fn apply(
        &mut self,
        req: &PageRequest,
        result: Result<TransactionPage>,
    ) -> Result<bool> {
        if req.generation != self.generation {
            return Ok(false);
        }
        self.in_flight = false;

        match result {
            Ok(page) => {
                self.has_next = page.next.is_some();
                if req.reset {
                    self.items = page.results;
                    self.page = 2;
                } else {
                    // Pages can overlap at their boundaries; keep the first
                    // occurrence of every id.
                    let mut seen: HashSet<i64> = self.items.iter().map(|t| t.id).collect();
                    for tx in page.results {
                        if seen.insert(tx.id) {
                            self.items.push(tx);
                        }
                    }
                    self.page += 1;
                }
                self.last_error = None;
                Ok(true)
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Pure and synchronous; triggers no I/O.
    pub fn set_filter(&mut self, filter: TypeFilter) {
        self.filter = filter;
    }

    /// The accumulated list through the active client-side filter, in
    /// server order.
    pub fn visible(&self) -> Vec<&Transaction> {
        self.items
            .iter()
            .filter(|t| self.filter.matches(t.category.kind))
            .collect()
    }

    pub fn items(&self) -> &[Transaction] {
        &self.items
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn filter(&self) -> TypeFilter {
        self.filter
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn params_for_page(&self, page: u32) -> TransactionListParams {
        TransactionListParams {
            page,
            ordering: self.query.sort,
            search: self.query.search.clone(),
        }
    }

    /// Fetches the first page for the current query, replacing the list.
    pub async fn load_first_page(&mut self, api: &ApiClient) -> Result<()> {
        let req = self.start_first_page();
        let result = api.transactions(req.params()).await;
        self.apply(&req, result).map(|_| ())
    }

    /// Fetches and appends the next page. Returns `Ok(false)` when there was
    /// nothing to do.
    pub async fn load_next_page(&mut self, api: &ApiClient) -> Result<bool> {
        let Some(req) = self.start_next_page() else {
            return Ok(false);
        };
        let result = api.transactions(req.params()).await;
        self.apply(&req, result)
    }

    /// Pull-to-refresh for sequential callers.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        let req = self.start_refresh();
        let result = api.transactions(req.params()).await;
        self.apply(&req, result).map(|_| ())
    }
}

/// Parses a client-side filter name as used on the command line.
impl std::str::FromStr for TypeFilter {
    type Err = ClientError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(ClientError::Config(format!("unknown filter: {other}"))),
        }
    }
}
