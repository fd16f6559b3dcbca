//! Suggestion list markup.

use super::paginate::{Binding, Interaction};
use super::tree::Node;
use super::RenderOutput;
use crate::suggest::SuggestionBatch;

/// Render a suggestion batch as a list of clickable items.
///
/// An empty batch renders nothing; the host hides the suggestion surface.
pub fn render_suggestions(batch: SuggestionBatch) -> RenderOutput {
    let mut bindings = Vec::with_capacity(batch.len());
    let items: Vec<Node> = batch
        .enumerate()
        .map(|(index, suggestion)| {
            bindings.push(Binding::new(
                format!(".suggestion-item[data-index=\"{index}\"]"),
                Interaction::SelectSuggestion(suggestion.clone()),
            ));
            Node::element("div")
                .attr("class", "suggestion-item")
                .attr("data-index", index.to_string())
                .child(Node::text(suggestion))
        })
        .collect();

    RenderOutput {
        nodes: items,
        bindings,
        ..Default::default()
    }
}
