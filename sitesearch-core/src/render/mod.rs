//! Result rendering: a pure mapping from (results, config, pagination state)
//! to a render tree plus the interaction bindings the host must wire up.
//!
//! Nothing in this module touches the network or storage. Pagination
//! controls do not re-fetch; activating one yields an [`Interaction`] that
//! the host feeds back through [`ResultsView::apply`].

pub mod item;
pub mod paginate;
pub mod suggestions;
pub mod tree;
pub mod view;

pub use paginate::{Binding, Interaction, PageWindow, PaginationState};
pub use suggestions::render_suggestions;
pub use tree::Node;
pub use view::{message, ResultsView};

use crate::config::{DisplayMode, PaginationMode, RenderConfig};
use crate::types::TaggedRecord;

/// Markup plus the interactions attached to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    pub nodes: Vec<Node>,
    pub bindings: Vec<Binding>,
    /// The slice of the result set that is visible.
    pub window: PageWindow,
}

impl RenderOutput {
    /// Serialise the tree to HTML. Empty output is an empty string.
    pub fn html(&self) -> String {
        tree::nodes_to_html(&self.nodes)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Render one view of a result set.
///
/// An empty result set renders nothing.
pub fn render(results: &[TaggedRecord], config: &RenderConfig, state: PaginationState) -> RenderOutput {
    if results.is_empty() {
        return RenderOutput::default();
    }

    let window = PageWindow::compute(results.len(), config.page_size(), state);
    let items = results[window.start..window.end]
        .iter()
        .map(|record| item::render_item(record, config));

    let layout = match config.display_mode {
        DisplayMode::Grid => format!(
            "display: grid; grid-template-columns: repeat({}, 1fr); gap: 1rem;",
            config.grid_columns
        ),
        DisplayMode::List => "display: block; gap: 1rem;".to_owned(),
    };

    let mut section = Node::element("section")
        .attr("style", "margin-top: 2rem;")
        .child(
            Node::element("div")
                .attr("class", "search-results-wrapper")
                .attr("style", layout)
                .children(items),
        );

    let mut bindings = Vec::new();
    match config.pagination {
        PaginationMode::Numbered if window.total_pages > 1 => {
            let buttons = (1..=window.total_pages).map(|page| {
                bindings.push(Binding::new(
                    format!(".pagination-button[data-page=\"{page}\"]"),
                    Interaction::GoToPage(page),
                ));
                Node::element("button")
                    .attr("class", "pagination-button")
                    .attr("data-page", page.to_string())
                    .attr("style", "margin: 0 4px; padding: 4px 8px;")
                    .child(Node::text(page.to_string()))
            });
            let controls = Node::element("div")
                .attr("class", "pagination")
                .attr("style", "margin-top: 1rem;")
                .children(buttons.collect::<Vec<_>>());
            section = section.child(controls);
        }
        PaginationMode::LoadMore if window.end < results.len() => {
            bindings.push(Binding::new(".load-more-button", Interaction::LoadMore));
            section = section.child(
                Node::element("div").attr("style", "text-align:center;").child(
                    Node::element("button")
                        .attr("class", "load-more-button")
                        .attr("style", "margin-top:1rem;")
                        .child(Node::text("Load More")),
                ),
            );
        }
        _ => {}
    }

    RenderOutput {
        nodes: vec![section],
        bindings,
        window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResultRecord, SourceTag};
    use serde_json::json;

    fn records(n: usize) -> Vec<TaggedRecord> {
        (0..n)
            .map(|i| {
                let record = ResultRecord::from_value(json!({"name": format!("Item {i}")}))
                    .expect("object");
                TaggedRecord::new(SourceTag::Page, record)
            })
            .collect()
    }

    fn item_count(html: &str) -> usize {
        html.matches("class=\"search-result-item\"").count()
    }

    fn list(per_page: usize, pagination: PaginationMode) -> RenderConfig {
        RenderConfig {
            items_per_page: per_page,
            pagination,
            ..Default::default()
        }
    }

    #[test]
    fn empty_results_render_nothing() {
        let out = render(&[], &RenderConfig::default(), PaginationState::Page(1));
        assert_eq!(out.html(), "");
        assert!(out.bindings.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn unpaginated_renders_everything() {
        let out = render(&records(25), &list(0, PaginationMode::Numbered), PaginationState::Page(1));
        assert_eq!(item_count(&out.html()), 25);
        assert_eq!(out.window.total_pages, 1);
        assert!(out.bindings.is_empty());
    }

    #[test]
    fn numbered_renders_one_button_per_page() {
        let out = render(&records(7), &list(3, PaginationMode::Numbered), PaginationState::Page(1));
        let html = out.html();
        assert_eq!(item_count(&html), 3);
        assert_eq!(html.matches("class=\"pagination-button\"").count(), 3);
        assert_eq!(
            out.bindings.iter().map(|b| b.action.clone()).collect::<Vec<_>>(),
            vec![
                Interaction::GoToPage(1),
                Interaction::GoToPage(2),
                Interaction::GoToPage(3)
            ]
        );
        assert_eq!(out.bindings[1].selector, ".pagination-button[data-page=\"2\"]");
    }

    #[test]
    fn numbered_page_shows_exact_slice() {
        let all = records(7);
        let out = render(&all, &list(3, PaginationMode::Numbered), PaginationState::Page(3));
        let html = out.html();
        assert_eq!(item_count(&html), 1);
        assert!(html.contains(">Item 6</a>"));
        assert_eq!((out.window.start, out.window.end), (6, 7));
    }

    #[test]
    fn single_page_has_no_numbered_controls() {
        let out = render(&records(3), &list(3, PaginationMode::Numbered), PaginationState::Page(1));
        assert!(!out.html().contains("pagination"));
        assert!(out.bindings.is_empty());
    }

    #[test]
    fn no_pagination_mode_still_limits_to_first_page() {
        let out = render(&records(12), &list(5, PaginationMode::None), PaginationState::Page(1));
        assert_eq!(item_count(&out.html()), 5);
        assert!(out.bindings.is_empty());
    }

    #[test]
    fn load_more_button_until_everything_is_shown() {
        let all = records(7);
        let config = list(3, PaginationMode::LoadMore);

        let first = render(&all, &config, PaginationState::Reveal(1));
        assert_eq!(item_count(&first.html()), 3);
        assert_eq!(first.bindings, vec![Binding::new(".load-more-button", Interaction::LoadMore)]);

        let second = render(&all, &config, PaginationState::Reveal(2));
        assert_eq!(item_count(&second.html()), 6);
        assert!(second.html().contains(">Item 0</a>"));

        let third = render(&all, &config, PaginationState::Reveal(3));
        assert_eq!(item_count(&third.html()), 7);
        assert!(!third.html().contains("load-more-button"));
        assert!(third.bindings.is_empty());
    }

    #[test]
    fn grid_layout_uses_column_count() {
        let config = RenderConfig {
            display_mode: DisplayMode::Grid,
            grid_rows: 2,
            grid_columns: 4,
            ..Default::default()
        };
        let out = render(&records(10), &config, PaginationState::Page(1));
        let html = out.html();
        assert!(html.contains("display: grid; grid-template-columns: repeat(4, 1fr);"));
        assert_eq!(item_count(&html), 8);
    }

    #[test]
    fn rendering_is_deterministic() {
        let all = records(9);
        let config = list(4, PaginationMode::Numbered);
        let a = render(&all, &config, PaginationState::Page(2));
        let b = render(&all, &config, PaginationState::Page(2));
        assert_eq!(a, b);
    }
}
