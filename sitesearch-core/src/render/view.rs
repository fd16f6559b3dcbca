//! A rendered result set together with its pagination state.

use super::paginate::{Interaction, PaginationState};
use super::tree::Node;
use super::{render, RenderOutput};
use crate::config::RenderConfig;
use crate::types::{ResultSet, TaggedRecord};

/// A single `<p>` message, used for the empty and error states.
pub fn message(text: &str) -> RenderOutput {
    RenderOutput {
        nodes: vec![Node::element("p").child(Node::text(text))],
        ..Default::default()
    }
}

/// The results currently on screen.
///
/// Pagination interactions re-render from the held result set; no request
/// is made.
#[derive(Debug, Clone)]
pub struct ResultsView {
    results: ResultSet,
    config: RenderConfig,
    state: PaginationState,
}

impl ResultsView {
    pub fn new(results: ResultSet, config: RenderConfig) -> Self {
        let state = PaginationState::initial(config.pagination);
        Self {
            results,
            config,
            state,
        }
    }

    pub fn results(&self) -> &[TaggedRecord] {
        &self.results
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Render the current state inside the `combined-search-results` wrapper.
    pub fn render(&self) -> RenderOutput {
        let inner = render(&self.results, &self.config, self.state);
        if inner.is_empty() {
            return inner;
        }
        RenderOutput {
            nodes: vec![Node::element("div")
                .attr("class", "combined-search-results")
                .children(inner.nodes)],
            bindings: inner.bindings,
            window: inner.window,
        }
    }

    /// Apply a pagination interaction and re-render.
    ///
    /// Returns `None` for interactions that are not pagination controls.
    pub fn apply(&mut self, interaction: &Interaction) -> Option<RenderOutput> {
        if matches!(interaction, Interaction::SelectSuggestion(_)) {
            return None;
        }
        self.state = self.state.apply(interaction);
        tracing::trace!(state = ?self.state, "pagination state changed");
        Some(self.render())
    }
}
