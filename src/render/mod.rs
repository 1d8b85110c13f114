//! Pure renderers: wire values in, nodes and patches out.

pub mod dashboard;
pub mod generator;
pub mod result;
pub mod shortlist;

pub use result::{ScoreSchema, bar_width, classify_tips, render_result};

use crate::view::Node;

pub(crate) fn badge(class: &str, text: &str) -> Node {
    Node::new("span").class(class).text(text)
}
