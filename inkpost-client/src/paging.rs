//! Page state shared by the feeds, the notification list and the admin tables.
//!
//! [`Accumulator`] is the plain state machine. [`PagedList`] puts one behind a
//! mutex so a view can fire `load_more` from several places and still only
//! ever have one request in flight.

use crate::api_client::PageQuery;
use inkpost_common::api::PageResponse;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Each fetched page replaces the previous one (tables with a page control).
    Replace,
    /// Each fetched page is appended (feeds, infinite scroll).
    Append,
}

/// Handed out by [`Accumulator::begin`] and given back to [`Accumulator::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub index: u32,
    pub size: u32,
    generation: u64,
}

impl PageTicket {
    pub fn query(&self) -> PageQuery {
        PageQuery::new(self.index, self.size)
    }
}

#[derive(Debug, Clone)]
pub struct Accumulator<T> {
    mode: Mode,
    page: u32,
    size: u32,
    total_pages: u32,
    total_elements: u64,
    items: Vec<T>,
    loading: bool,
    loaded: bool,
    generation: u64,
}

impl<T> Accumulator<T> {
    pub fn new(mode: Mode, size: u32) -> Self {
        Self {
            mode,
            page: 0,
            size: size.max(1),
            total_pages: 0,
            total_elements: 0,
            items: Vec::new(),
            loading: false,
            loaded: false,
            generation: 0,
        }
    }

    pub fn append(size: u32) -> Self {
        Self::new(Mode::Append, size)
    }

    pub fn replace(size: u32) -> Self {
        Self::new(Mode::Replace, size)
    }

    /// Marks a fetch of `index` as outstanding. `None` while another fetch is
    /// still loading; the caller must not issue a request then.
    pub fn begin(&mut self, index: u32) -> Option<PageTicket> {
        if self.loading {
            return None;
        }
        self.loading = true;
        Some(PageTicket {
            index,
            size: self.size,
            generation: self.generation,
        })
    }

    /// Applies the outcome of the fetch started with `ticket`.
    ///
    /// Returns `Ok(false)` when the ticket predates a [`reset`](Self::reset)
    /// and the result was dropped. Errors leave the items untouched.
    pub fn finish<E>(
        &mut self,
        ticket: PageTicket,
        result: Result<PageResponse<T>, E>,
    ) -> Result<bool, E> {
        if ticket.generation != self.generation {
            debug!(page = ticket.index, "dropping page for a reset collection");
            return Ok(false);
        }
        self.loading = false;

        let page = result?;
        self.loaded = true;
        self.total_pages = page.total_pages;
        self.total_elements = page.total_elements;
        match self.mode {
            Mode::Replace => {
                self.items = page.content;
                self.page = ticket.index;
            }
            Mode::Append => {
                self.items.extend(page.content);
                self.page = ticket.index + 1;
            }
        }
        Ok(true)
    }

    /// Discards everything. Fetches already in flight are ignored when they land.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.page = 0;
        self.total_pages = 0;
        self.total_elements = 0;
        self.items.clear();
        self.loading = false;
        self.loaded = false;
    }

    /// Releases the loading flag of a fetch that will never finish.
    pub fn abandon(&mut self, ticket: PageTicket) {
        if ticket.generation == self.generation {
            self.loading = false;
        }
    }

    /// More pages to append (append mode).
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// A page after the one shown (replace mode).
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Index the next `load_more` should ask for.
    pub fn next_index(&self) -> u32 {
        match self.mode {
            Mode::Append => self.page,
            Mode::Replace => self.page + 1,
        }
    }

    /// Drops items in place, e.g. after a delete succeeded.
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !pred(item));
        let removed = before - self.items.len();
        self.total_elements = self.total_elements.saturating_sub(removed as u64);
        removed
    }

    pub fn update_where(&mut self, pred: impl Fn(&T) -> bool, mut f: impl FnMut(&mut T)) {
        self.items.iter_mut().filter(|item| pred(item)).for_each(|item| f(item));
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// At least one page has arrived since creation or the last reset.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether `load_more` has anything left to ask for.
    pub fn can_load_more(&self) -> bool {
        match self.mode {
            Mode::Append => !self.loaded || self.has_more(),
            Mode::Replace => !self.loaded || self.has_next(),
        }
    }
}

/// An [`Accumulator`] a view can drive from `&self`.
#[derive(Debug)]
pub struct PagedList<T> {
    state: Mutex<Accumulator<T>>,
}

impl<T> PagedList<T> {
    pub fn new(mode: Mode, size: u32) -> Self {
        Self {
            state: Mutex::new(Accumulator::new(mode, size)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Accumulator<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches page `index` unless a fetch is already running, in which case
    /// nothing is sent and `Ok(false)` comes back.
    pub async fn fetch_page<F, Fut, E>(&self, index: u32, fetch: F) -> Result<bool, E>
    where
        F: FnOnce(PageQuery) -> Fut,
        Fut: Future<Output = Result<PageResponse<T>, E>>,
    {
        let ticket = {
            let mut state = self.lock();
            state.begin(index)
        };
        let Some(ticket) = ticket else {
            debug!(page = index, "fetch already in flight, skipping");
            return Ok(false);
        };

        let mut pending = Pending {
            list: self,
            ticket: Some(ticket),
        };
        let result = fetch(ticket.query()).await;
        pending.ticket = None;
        self.lock().finish(ticket, result)
    }

    /// Fetches the page after the last one loaded.
    pub async fn load_more<F, Fut, E>(&self, fetch: F) -> Result<bool, E>
    where
        F: FnOnce(PageQuery) -> Fut,
        Fut: Future<Output = Result<PageResponse<T>, E>>,
    {
        let next = {
            let state = self.lock();
            if !state.can_load_more() {
                return Ok(false);
            }
            state.next_index()
        };
        self.fetch_page(next, fetch).await
    }

    /// Starts over from the first page.
    pub async fn refresh<F, Fut, E>(&self, fetch: F) -> Result<bool, E>
    where
        F: FnOnce(PageQuery) -> Fut,
        Fut: Future<Output = Result<PageResponse<T>, E>>,
    {
        self.lock().reset();
        self.fetch_page(0, fetch).await
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn with<R>(&self, f: impl FnOnce(&Accumulator<T>) -> R) -> R {
        f(&self.lock())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Accumulator<T>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn has_more(&self) -> bool {
        self.lock().has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }
}

/// Clears the loading flag when a `fetch_page` future is dropped before the
/// response arrives.
struct Pending<'a, T> {
    list: &'a PagedList<T>,
    ticket: Option<PageTicket>,
}

impl<T> Drop for Pending<'_, T> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            debug!(page = ticket.index, "fetch dropped before completion");
            self.list.lock().abandon(ticket);
        }
    }
}

impl<T: Clone> PagedList<T> {
    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }
}
