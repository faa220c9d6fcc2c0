//! Incremental reveal of the visible result set.
//!
//! The controller only tracks counts. It never owns rows, so it cannot lose or
//! duplicate them: the displayed window is always a prefix of the upstream
//! sequence.

use std::time::Duration;

/// Proof that a page load was granted. Returned to [`InfiniteScroll::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a granted load must be completed or the controller stays busy"]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfiniteScroll {
    page_size: usize,
    displayed: usize,
    total: usize,
    generation: Option<u64>,
    loading: bool,
}

impl InfiniteScroll {
    /// A page size of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            displayed: 0,
            total: 0,
            generation: None,
            loading: false,
        }
    }

    /// Report the upstream result set.
    ///
    /// A new `generation` means the filtered/sorted sequence changed identity:
    /// the window resets to one page and any outstanding load is dropped. The
    /// same generation with a different `total` only re-bounds the window.
    pub fn sync(&mut self, total: usize, generation: u64) {
        if self.generation != Some(generation) {
            self.generation = Some(generation);
            self.loading = false;
            self.total = total;
            self.displayed = self.page_size.min(total);
            tracing::debug!(total, generation, "infinite scroll reset");
        } else {
            self.total = total;
            self.displayed = self.displayed.min(total);
        }
    }

    /// Bottom-sentinel visibility signal.
    ///
    /// Grants a ticket only when more rows remain and no load is in flight.
    /// Rapid repeated signals therefore schedule at most one load.
    pub fn request_more(&mut self) -> Option<LoadTicket> {
        let generation = self.generation?;
        if self.loading || !self.has_more() {
            return None;
        }
        self.loading = true;
        Some(LoadTicket { generation })
    }

    /// Finish a granted load by revealing one more page.
    ///
    /// Returns `false` for a ticket from a previous generation; such loads
    /// were superseded by a reset and change nothing.
    pub fn complete(&mut self, ticket: LoadTicket) -> bool {
        if self.generation != Some(ticket.generation) {
            tracing::debug!(
                stale = ticket.generation,
                current = ?self.generation,
                "discarding stale page load"
            );
            return false;
        }
        self.loading = false;
        self.displayed = (self.displayed + self.page_size).min(self.total);
        true
    }

    /// Request and complete a load after `delay`, the way a scrolling viewport does.
    ///
    /// Returns the new displayed count, or `None` if no load was granted.
    pub async fn load_more(&mut self, delay: Duration) -> Option<usize> {
        let ticket = self.request_more()?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.complete(ticket);
        Some(self.displayed)
    }

    #[must_use]
    pub const fn displayed_count(&self) -> usize {
        self.displayed
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.displayed < self.total
    }

    /// The revealed prefix of `items`.
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.displayed.min(items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_page() {
        let mut scroll = InfiniteScroll::new(50);
        scroll.sync(120, 1);
        assert_eq!(scroll.displayed_count(), 50);
        assert!(scroll.has_more());
    }

    #[test]
    fn short_result_set_shows_everything() {
        let mut scroll = InfiniteScroll::new(50);
        scroll.sync(7, 1);
        assert_eq!(scroll.displayed_count(), 7);
        assert!(!scroll.has_more());
        assert!(scroll.request_more().is_none());
    }

    #[test]
    fn repeated_signals_grant_one_load() {
        let mut scroll = InfiniteScroll::new(10);
        scroll.sync(100, 1);
        let ticket = scroll.request_more().expect("first signal grants");
        assert!(scroll.request_more().is_none());
        assert!(scroll.request_more().is_none());
        assert!(scroll.complete(ticket));
        assert_eq!(scroll.displayed_count(), 20);
    }

    #[test]
    fn displayed_never_exceeds_total() {
        let mut scroll = InfiniteScroll::new(10);
        scroll.sync(25, 1);
        while let Some(ticket) = scroll.request_more() {
            scroll.complete(ticket);
            assert!(scroll.displayed_count() <= scroll.total());
        }
        assert_eq!(scroll.displayed_count(), 25);
    }

    #[test]
    fn identity_change_resets_and_drops_stale_load() {
        let mut scroll = InfiniteScroll::new(10);
        scroll.sync(100, 1);
        let ticket = scroll.request_more().unwrap();
        scroll.complete(ticket);
        let stale = scroll.request_more().unwrap();

        scroll.sync(100, 2);
        assert_eq!(scroll.displayed_count(), 10);
        assert!(!scroll.is_loading());
        assert!(!scroll.complete(stale));
        assert_eq!(scroll.displayed_count(), 10);
    }

    #[test]
    fn shrinking_total_rebounds_window() {
        let mut scroll = InfiniteScroll::new(10);
        scroll.sync(30, 1);
        let ticket = scroll.request_more().unwrap();
        scroll.complete(ticket);
        scroll.sync(15, 1);
        assert_eq!(scroll.displayed_count(), 15);
    }

    #[test]
    fn window_is_prefix() {
        let items: Vec<u32> = (0..30).collect();
        let mut scroll = InfiniteScroll::new(8);
        scroll.sync(items.len(), 1);
        assert_eq!(scroll.window(&items), &items[..8]);
    }

    #[tokio::test]
    async fn load_more_waits_and_reveals_a_page() {
        let mut scroll = InfiniteScroll::new(5);
        scroll.sync(12, 1);
        assert_eq!(scroll.load_more(Duration::from_millis(1)).await, Some(10));
        assert_eq!(scroll.load_more(Duration::ZERO).await, Some(12));
        assert_eq!(scroll.load_more(Duration::ZERO).await, None);
    }
}
