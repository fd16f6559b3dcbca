//! Pagination state, slice bounds and interaction bindings.

use crate::config::PaginationMode;

/// Which part of a result set is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    /// Numbered pages: the 1-based page currently shown.
    Page(usize),
    /// Load More: how many page-sized batches are revealed.
    Reveal(usize),
}

impl PaginationState {
    /// State for the first render of a new result set.
    pub fn initial(mode: PaginationMode) -> Self {
        match mode {
            PaginationMode::LoadMore => Self::Reveal(1),
            PaginationMode::None | PaginationMode::Numbered => Self::Page(1),
        }
    }

    /// State after a pagination interaction. Other interactions leave it unchanged.
    #[must_use]
    pub fn apply(self, interaction: &Interaction) -> Self {
        match (interaction, self) {
            (Interaction::GoToPage(page), _) => Self::Page(*page),
            (Interaction::LoadMore, Self::Reveal(batches)) => Self::Reveal(batches.saturating_add(1)),
            (Interaction::LoadMore, Self::Page(_)) => Self::Reveal(2),
            (Interaction::SelectSuggestion(_), state) => state,
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::Page(1)
    }
}

/// Visible slice `[start, end)` of a result set and the page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    pub total_pages: usize,
}

impl PageWindow {
    /// Compute the visible slice for `count` records.
    ///
    /// A `page_size` of 0 shows everything on a single page. Page numbers
    /// outside `1..=total_pages` are clamped.
    pub fn compute(count: usize, page_size: usize, state: PaginationState) -> Self {
        if page_size == 0 {
            return Self {
                start: 0,
                end: count,
                total_pages: 1,
            };
        }

        let total_pages = count.div_ceil(page_size).max(1);
        match state {
            PaginationState::Page(page) => {
                let page = page.clamp(1, total_pages);
                let start = ((page - 1) * page_size).min(count);
                Self {
                    start,
                    end: (start + page_size).min(count),
                    total_pages,
                }
            }
            PaginationState::Reveal(batches) => Self {
                start: 0,
                end: batches.max(1).saturating_mul(page_size).min(count),
                total_pages,
            },
        }
    }

    /// Number of visible records.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A user action the host wires to a rendered control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Show the given 1-based page (Numbered mode).
    GoToPage(usize),
    /// Reveal one more page of records (Load More mode).
    LoadMore,
    /// Use this suggestion as the query and search.
    SelectSuggestion(String),
}

/// Declarative wiring: activating the element matched by `selector`
/// triggers `action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// CSS selector relative to the container the markup was written into.
    pub selector: String,
    pub action: Interaction,
}

impl Binding {
    pub fn new(selector: impl Into<String>, action: Interaction) -> Self {
        Self {
            selector: selector.into(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_is_unpaginated() {
        let w = PageWindow::compute(37, 0, PaginationState::Page(3));
        assert_eq!(w, PageWindow { start: 0, end: 37, total_pages: 1 });
    }

    #[test]
    fn numbered_slices_match_page_bounds() {
        let count = 23;
        let size = 5;
        let w = PageWindow::compute(count, size, PaginationState::Page(1));
        assert_eq!(w.total_pages, 5);
        for page in 1..=w.total_pages {
            let w = PageWindow::compute(count, size, PaginationState::Page(page));
            assert_eq!(w.start, (page - 1) * size);
            assert_eq!(w.end, (page * size).min(count));
        }
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let w = PageWindow::compute(10, 4, PaginationState::Page(0));
        assert_eq!((w.start, w.end), (0, 4));
        let w = PageWindow::compute(10, 4, PaginationState::Page(99));
        assert_eq!((w.start, w.end), (8, 10));
    }

    #[test]
    fn reveal_is_cumulative_and_monotonic() {
        let count = 11;
        let size = 3;
        let mut previous = 0;
        for k in 1..=6 {
            let w = PageWindow::compute(count, size, PaginationState::Reveal(k));
            assert_eq!(w.start, 0);
            assert_eq!(w.len(), (k * size).min(count));
            assert!(w.len() >= previous);
            previous = w.len();
        }
    }

    #[test]
    fn empty_set_has_one_page() {
        let w = PageWindow::compute(0, 10, PaginationState::Page(1));
        assert_eq!(w.total_pages, 1);
        assert!(w.is_empty());
    }

    #[test]
    fn initial_state_follows_mode() {
        assert_eq!(PaginationState::initial(PaginationMode::Numbered), PaginationState::Page(1));
        assert_eq!(PaginationState::initial(PaginationMode::None), PaginationState::Page(1));
        assert_eq!(PaginationState::initial(PaginationMode::LoadMore), PaginationState::Reveal(1));
    }

    #[test]
    fn interactions_advance_state() {
        let state = PaginationState::Page(1).apply(&Interaction::GoToPage(4));
        assert_eq!(state, PaginationState::Page(4));
        let state = PaginationState::Reveal(2).apply(&Interaction::LoadMore);
        assert_eq!(state, PaginationState::Reveal(3));
        let state = state.apply(&Interaction::SelectSuggestion("x".into()));
        assert_eq!(state, PaginationState::Reveal(3));
    }
}
