//! Search orchestrator: token acquisition, concurrent querying, display updates.
//!
//! [`SearchOrchestrator`] owns the two index sources, the token store, the
//! suggestion service and the view currently on screen. The host drives it
//! with submissions, keystrokes and interactions, and receives markup
//! through a [`ResultsDisplay`].

pub mod search;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::http;
use crate::location::{resolve_query, PageLocation};
use crate::render::{message, render_suggestions, Interaction, RenderOutput, ResultsView};
use crate::source::IndexSource;
use crate::sources::{CollectionIndex, PageIndex};
use crate::store::KeyValueStore;
use crate::suggest::SuggestionService;
use crate::token::TokenStore;
use crate::types::{RenderInstruction, SearchState, EMPTY_STATE_MESSAGE, ERROR_MESSAGE};

pub use search::{merge, run_search};

/// The host surface results are written into.
pub trait ResultsDisplay: Send + Sync {
    /// Show or hide the loading indicator.
    fn set_loading(&self, visible: bool);

    /// Replace the container contents and attach the output's bindings.
    fn replace(&self, output: &RenderOutput);
}

/// Shows the loading indicator on creation and hides it on drop, unless a
/// newer search has started since.
struct LoadingGuard<'a, D: ResultsDisplay + ?Sized> {
    display: &'a D,
    sequence: &'a AtomicU64,
    ticket: u64,
}

impl<'a, D: ResultsDisplay + ?Sized> LoadingGuard<'a, D> {
    fn show(display: &'a D, sequence: &'a AtomicU64, ticket: u64) -> Self {
        display.set_loading(true);
        Self {
            display,
            sequence,
            ticket,
        }
    }
}

impl<D: ResultsDisplay + ?Sized> Drop for LoadingGuard<'_, D> {
    fn drop(&mut self) {
        // The newest search owns the indicator.
        if self.sequence.load(Ordering::SeqCst) == self.ticket {
            self.display.set_loading(false);
        }
    }
}

/// Drives searches, suggestions and pagination for one widget instance.
pub struct SearchOrchestrator<S, P = PageIndex, C = CollectionIndex> {
    config: WidgetConfig,
    tokens: TokenStore<S>,
    suggestions: SuggestionService,
    pages: P,
    collection: C,
    state: Mutex<SearchState>,
    sequence: AtomicU64,
    view: Mutex<Option<ResultsView>>,
}

impl<S: KeyValueStore> SearchOrchestrator<S> {
    /// Create an orchestrator talking to the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Config`] if the configuration is invalid, or
    /// [`WidgetError::Http`] if the HTTP client cannot be built.
    pub fn new(config: WidgetConfig, store: S) -> Result<Self, WidgetError> {
        config.validate()?;
        let client = http::build_client(&config)?;
        let tokens = TokenStore::with_client(store, client.clone(), &config);
        let suggestions = SuggestionService::new(client.clone(), &config);
        let pages = PageIndex::new(client.clone(), &config);
        let collection = CollectionIndex::new(client, &config);
        Ok(Self::from_parts(config, tokens, suggestions, pages, collection))
    }
}

impl<S, P, C> SearchOrchestrator<S, P, C>
where
    S: KeyValueStore,
    P: IndexSource,
    C: IndexSource,
{
    /// Assemble an orchestrator from already-built components.
    pub fn from_parts(
        config: WidgetConfig,
        tokens: TokenStore<S>,
        suggestions: SuggestionService,
        pages: P,
        collection: C,
    ) -> Self {
        Self {
            config,
            tokens,
            suggestions,
            pages,
            collection,
            state: Mutex::new(SearchState::Idle),
            sequence: AtomicU64::new(0),
            view: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    /// State of the most recent completed or in-flight search.
    pub fn state(&self) -> SearchState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: SearchState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Search for `query` without touching any display.
    ///
    /// Blank queries return [`RenderInstruction::Skip`] without a network
    /// call.
    pub async fn run_search(&self, query: &str) -> RenderInstruction {
        let Some(query) = crate::location::normalize_query(query) else {
            return RenderInstruction::Skip;
        };
        let token = self.tokens.get_token().await;
        run_search(
            &query,
            self.config.sources,
            &self.pages,
            &self.collection,
            token.as_deref(),
        )
        .await
    }

    /// Handle an explicit submit.
    ///
    /// The query comes from `input`, falling back to the page's `q`
    /// parameter when the input is blank. A blank resolved query is a
    /// no-op. Results from a submission that has since been superseded are
    /// discarded.
    pub async fn submit<D>(
        &self,
        input: Option<&str>,
        location: Option<&PageLocation>,
        display: &D,
    ) -> SearchState
    where
        D: ResultsDisplay + ?Sized,
    {
        let Some(query) = resolve_query(input, location) else {
            tracing::debug!("blank query, nothing to search");
            return self.state();
        };

        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(SearchState::Loading);

        let instruction = {
            let _loading = LoadingGuard::show(display, &self.sequence, ticket);
            self.run_search(&query).await
        };

        if self.sequence.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "discarding superseded search");
            return self.state();
        }

        self.show(instruction, display)
    }

    /// Search automatically when the page is the results page and carries a
    /// `q` parameter.
    pub async fn load<D>(&self, location: &PageLocation, display: &D) -> SearchState
    where
        D: ResultsDisplay + ?Sized,
    {
        if !location.is_results_page || location.query.is_none() {
            return self.state();
        }
        self.submit(None, Some(location), display).await
    }

    /// Use a suggestion as the query and search.
    pub async fn select_suggestion<D>(&self, suggestion: &str, display: &D) -> SearchState
    where
        D: ResultsDisplay + ?Sized,
    {
        self.submit(Some(suggestion), None, display).await
    }

    /// Fetch and render suggestions for a partial query.
    ///
    /// Empty output means the suggestion surface should be hidden.
    pub async fn suggest(&self, partial: &str) -> RenderOutput {
        render_suggestions(self.suggestions.fetch_suggestions(partial).await)
    }

    /// Handle an activated binding.
    ///
    /// Pagination actions re-render the current view without a network
    /// call; they are ignored when nothing is on screen.
    pub async fn interact<D>(&self, interaction: &Interaction, display: &D) -> SearchState
    where
        D: ResultsDisplay + ?Sized,
    {
        if let Interaction::SelectSuggestion(text) = interaction {
            return self.select_suggestion(text, display).await;
        }

        let output = {
            let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
            view.as_mut().and_then(|v| v.apply(interaction))
        };
        match output {
            Some(output) => display.replace(&output),
            None => tracing::debug!(?interaction, "no results on screen, interaction ignored"),
        }
        self.state()
    }

    fn show<D>(&self, instruction: RenderInstruction, display: &D) -> SearchState
    where
        D: ResultsDisplay + ?Sized,
    {
        let (output, view, state) = match instruction {
            RenderInstruction::Skip => return self.state(),
            RenderInstruction::Results(results) => {
                let view = ResultsView::new(results, self.config.render.clone());
                (view.render(), Some(view), SearchState::Rendered)
            }
            RenderInstruction::EmptyState => (message(EMPTY_STATE_MESSAGE), None, SearchState::Rendered),
            RenderInstruction::Error => (message(ERROR_MESSAGE), None, SearchState::Failed),
        };

        display.replace(&output);
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = view;
        self.set_state(state);
        tracing::debug!(?state, "search rendered");
        state
    }
}
