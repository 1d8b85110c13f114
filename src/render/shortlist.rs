use crate::models::ShortlistCandidate;
use crate::ui::shortlist;
use crate::view::{Node, Patch, percent};

use super::badge;

pub const NO_RESULTS: &str = "No valid resumes found.";

const TOP_SKILLS: usize = 3;

/// Rows in backend order; rank is position + 1.
pub fn render_shortlist(candidates: &[ShortlistCandidate]) -> Vec<Patch> {
    let nodes = if candidates.is_empty() {
        vec![
            Node::new("tr").child(
                Node::new("td")
                    .attr("colspan", "6")
                    .class("text-center")
                    .text(NO_RESULTS),
            ),
        ]
    } else {
        candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| ranked_row(index + 1, candidate))
            .collect()
    };
    vec![Patch::Children {
        slot: shortlist::RESULTS_BODY,
        nodes,
    }]
}

fn ranked_row(rank: usize, candidate: &ShortlistCandidate) -> Node {
    let (row_class, bar_class) = if rank == 1 {
        (Some("table-success"), "bg-success")
    } else if candidate.score > 50.0 {
        (None, "bg-primary")
    } else {
        (None, "bg-danger")
    };

    let rank_label = if rank == 1 {
        format!("#{rank} 🏆")
    } else {
        format!("#{rank}")
    };

    let source = candidate
        .filename
        .as_deref()
        .or(candidate.status.as_deref())
        .unwrap_or_default();

    let skills = match &candidate.skills {
        Some(skills) => Node::new("small").children(
            skills
                .iter()
                .take(TOP_SKILLS)
                .map(|skill| badge("badge bg-light text-dark border me-1", skill)),
        ),
        None => Node::new("small").text("N/A"),
    };

    let mut row = Node::new("tr")
        .child(Node::new("td").class("fw-bold").text(rank_label))
        .child(
            Node::new("td")
                .child(Node::new("div").class("fw-bold").text(candidate.name.as_str()))
                .child(Node::new("small").class("text-muted").text(source)),
        )
        .child(Node::new("td").text(candidate.email.as_str()))
        .child(
            Node::new("td").child(
                Node::new("div").class("d-flex align-items-center").child(
                    Node::new("div")
                        .class("progress flex-grow-1 me-2")
                        .style("height", "20px")
                        .child(
                            Node::new("div")
                                .class("progress-bar")
                                .class(bar_class)
                                .style("width", percent(candidate.score))
                                .text(candidate.score.to_string()),
                        ),
                ),
            ),
        )
        .child(Node::new("td").child(skills))
        .child(Node::new("td").child(select_action(&candidate.name)));
    if let Some(class) = row_class {
        row.add_class(class);
    }
    row
}

fn select_action(name: &str) -> Node {
    Node::new("form")
        .class("d-inline")
        .attr("method", "post")
        .attr("action", "/shortlist/select")
        .child(
            Node::new("input")
                .attr("type", "hidden")
                .attr("name", "name")
                .attr("value", name),
        )
        .child(
            Node::new("button")
                .class("btn btn-sm btn-outline-primary")
                .attr("type", "submit")
                .text("Select"),
        )
}
