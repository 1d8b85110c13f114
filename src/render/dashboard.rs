use chrono::NaiveDateTime;

use crate::models::{CandidateRow, HighPotential, SkillCount};
use crate::ui::admin;
use crate::view::{ChartKind, ChartSpec, Dataset, Node, Patch};

use super::badge;

pub const PALETTE: [&str; 6] = [
    "#3498db", "#e74c3c", "#2ecc71", "#f1c40f", "#9b59b6", "#34495e",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this candidate?";

/// Table body, then the field and level doughnuts. With `privacy` set each
/// delete form carries the flag so the reload stays masked.
pub fn render_candidates(rows: &[CandidateRow], privacy: bool) -> Vec<Patch> {
    let fields = tally(rows.iter().map(CandidateRow::field));
    let levels = tally(rows.iter().map(CandidateRow::level));

    vec![
        Patch::Children {
            slot: admin::TABLE_BODY,
            nodes: rows.iter().map(|row| candidate_row(row, privacy)).collect(),
        },
        Patch::Chart {
            slot: admin::FIELD_CHART,
            chart: doughnut(fields),
        },
        Patch::Chart {
            slot: admin::LEVEL_CHART,
            chart: doughnut(levels),
        },
    ]
}

fn candidate_row(row: &CandidateRow, privacy: bool) -> Node {
    let tone = if row.score() > 50.0 { "success" } else { "danger" };
    let id = row.id();
    Node::new("tr")
        .child(Node::new("td").text(row.name()))
        .child(Node::new("td").text(row.email()))
        .child(Node::new("td").child(badge(&format!("badge bg-{tone}"), &row.score_text())))
        .child(Node::new("td").text(row.field()))
        .child(Node::new("td").text(row.level()))
        .child(
            Node::new("td")
                .class("small text-muted")
                .text(short_date(&row.timestamp())),
        )
        .child(Node::new("td").child(delete_action(&id, privacy)))
}

fn delete_action(id: &str, privacy: bool) -> Node {
    let form = Node::new("form")
        .class("d-inline")
        .attr("method", "post")
        .attr("action", format!("/dashboard/candidates/{id}/delete"))
        .attr(
            "onsubmit",
            format!("return confirm('{DELETE_CONFIRMATION}');"),
        )
        .attr("data-candidate-id", id)
        .child(
            Node::new("input")
                .attr("type", "hidden")
                .attr("name", "confirmed")
                .attr("value", "true"),
        );
    let form = if privacy {
        form.child(
            Node::new("input")
                .attr("type", "hidden")
                .attr("name", "privacy")
                .attr("value", "true"),
        )
    } else {
        form
    };
    form.child(
        Node::new("button")
            .class("btn btn-sm btn-outline-danger")
            .attr("type", "submit")
            .text("Delete"),
    )
}

/// `2024-05-01_10:11:12` becomes `2024-05-01`; anything unparseable keeps
/// its first ten characters.
pub fn short_date(timestamp: &str) -> String {
    match NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT) {
        Ok(parsed) => parsed.date().format("%Y-%m-%d").to_string(),
        Err(_) => timestamp.chars().take(10).collect(),
    }
}

/// Counts occurrences, keeping labels in first-seen order.
pub fn tally(values: impl Iterator<Item = String>) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(label, _)| *label == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
}

fn doughnut(counts: Vec<(String, u64)>) -> ChartSpec {
    let (labels, data): (Vec<_>, Vec<_>) = counts
        .into_iter()
        .map(|(label, count)| (label, count as f64))
        .unzip();
    ChartSpec {
        kind: ChartKind::Doughnut,
        labels,
        datasets: vec![Dataset {
            label: None,
            data,
            background_color: PALETTE.iter().map(|c| c.to_string()).collect(),
        }],
        legend: "bottom",
    }
}

pub fn render_skills_gap(skills: &[SkillCount]) -> Vec<Patch> {
    vec![Patch::Chart {
        slot: admin::SKILLS_CHART,
        chart: ChartSpec {
            kind: ChartKind::Bar,
            labels: skills.iter().map(|s| s.skill.clone()).collect(),
            datasets: vec![Dataset {
                label: Some("Candidates with skill".to_string()),
                data: skills.iter().map(|s| s.count as f64).collect(),
                background_color: vec![PALETTE[0].to_string()],
            }],
            legend: "top",
        },
    }]
}

pub fn render_high_potential(candidates: &[HighPotential]) -> Vec<Patch> {
    let nodes = if candidates.is_empty() {
        vec![
            Node::new("li")
                .class("list-group-item text-muted")
                .text("No high-potential candidates yet."),
        ]
    } else {
        candidates
            .iter()
            .map(|candidate| {
                Node::new("li")
                    .class("list-group-item d-flex justify-content-between align-items-center")
                    .child(
                        Node::new("div")
                            .child(Node::new("strong").text(candidate.name.as_str()))
                            .child(
                                Node::new("small")
                                    .class("text-muted d-block")
                                    .text(candidate.field.as_str()),
                            ),
                    )
                    .child(badge("badge bg-success", &candidate.score.to_string()))
            })
            .collect()
    };
    vec![Patch::Children {
        slot: admin::HIGH_POTENTIAL_LIST,
        nodes,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Slot;
    use serde_json::json;

    fn chart_of(patches: &[Patch], slot: Slot) -> Option<&ChartSpec> {
        patches.iter().find_map(|patch| match patch {
            Patch::Chart { slot: s, chart } if *s == slot => Some(chart),
            _ => None,
        })
    }

    fn row(id: u32, name: &str, score: &str, field: &str, level: &str) -> CandidateRow {
        serde_json::from_value(json!([
            id, name, format!("{}@x.test", name.to_lowercase()), score,
            "2024-05-01_10:11:12", "1", field, level
        ]))
        .unwrap()
    }

    fn rows() -> Vec<CandidateRow> {
        vec![
            row(1, "Ann", "72", "Data Science", "Fresher"),
            row(2, "Bob", "50", "Web Development", "Intermediate"),
            row(3, "Cid", "51", "Data Science", "Fresher"),
        ]
    }

    #[test]
    fn table_rows_color_scores_above_fifty() {
        let patches = render_candidates(&rows(), false);
        let Patch::Children { slot, nodes } = &patches[0] else {
            panic!("table patch first");
        };
        assert_eq!(*slot, admin::TABLE_BODY);
        assert_eq!(nodes.len(), 3);
        let badge_of = |row: &Node| row.children[2].children[0].classes.join(" ");
        assert_eq!(badge_of(&nodes[0]), "badge bg-success");
        assert_eq!(badge_of(&nodes[1]), "badge bg-danger");
        assert_eq!(badge_of(&nodes[2]), "badge bg-success");
        assert_eq!(nodes[0].children[5].text.as_deref(), Some("2024-05-01"));
        assert_eq!(
            nodes[1].children[6].children[0].attrs["action"],
            "/dashboard/candidates/2/delete"
        );
    }

    #[test]
    fn private_listing_delete_forms_keep_the_flag() {
        let hidden_names = |privacy| {
            let patches = render_candidates(&rows(), privacy);
            let Patch::Children { nodes, .. } = &patches[0] else {
                panic!("table patch first");
            };
            nodes[0].children[6].children[0]
                .children
                .iter()
                .filter(|input| input.attrs.get("type").map(String::as_str) == Some("hidden"))
                .map(|input| input.attrs["name"].clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(hidden_names(false), ["confirmed"]);
        assert_eq!(hidden_names(true), ["confirmed", "privacy"]);
    }

    #[test]
    fn histograms_keep_first_seen_order() {
        let patches = render_candidates(&rows(), false);
        let fields = chart_of(&patches, admin::FIELD_CHART).unwrap();
        assert_eq!(fields.kind, ChartKind::Doughnut);
        assert_eq!(fields.labels, ["Data Science", "Web Development"]);
        assert_eq!(fields.datasets[0].data, [2.0, 1.0]);
        let levels = chart_of(&patches, admin::LEVEL_CHART).unwrap();
        assert_eq!(levels.labels, ["Fresher", "Intermediate"]);
        assert_eq!(levels.legend, "bottom");
    }

    #[test]
    fn short_date_falls_back_to_prefix() {
        assert_eq!(short_date("2024-05-01_10:11:12"), "2024-05-01");
        assert_eq!(short_date("2024-05-01 10:11:12"), "2024-05-01");
        assert_eq!(short_date("today"), "today");
    }

    #[test]
    fn empty_high_potential_list_shows_placeholder() {
        let patches = render_high_potential(&[]);
        let Patch::Children { nodes, .. } = &patches[0] else {
            panic!("children patch");
        };
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), "No high-potential candidates yet.");
    }

    #[test]
    fn skills_gap_is_a_bar_chart() {
        let skills = vec![
            SkillCount { skill: "Python".into(), count: 4 },
            SkillCount { skill: "SQL".into(), count: 2 },
        ];
        let patches = render_skills_gap(&skills);
        let chart = chart_of(&patches, admin::SKILLS_CHART).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.entries(), [("Python".to_string(), 4.0), ("SQL".to_string(), 2.0)]);
    }
}
