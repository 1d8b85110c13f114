use std::str::FromStr;

use crate::models::{Breakdown, ScoreResult};
use crate::ui::user;
use crate::view::{HIDDEN, Node, Patch, PageError, percent};

use super::badge;

/// Backend score schema the breakdown bars are scaled against. The maxima
/// are a backend contract; a payload never tells which revision it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreSchema {
    /// skills 40, education 30, experience 30.
    Original,
    /// skills 40, education 30, experience 20, semantic fit 10.
    #[default]
    Revised,
}

impl ScoreSchema {
    pub fn skills_max(self) -> f64 {
        40.0
    }

    pub fn education_max(self) -> f64 {
        30.0
    }

    pub fn experience_max(self) -> f64 {
        match self {
            ScoreSchema::Original => 30.0,
            ScoreSchema::Revised => 20.0,
        }
    }

    pub fn semantic_fit_max(self) -> Option<f64> {
        match self {
            ScoreSchema::Original => None,
            ScoreSchema::Revised => Some(10.0),
        }
    }
}

impl FromStr for ScoreSchema {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "original" => Ok(ScoreSchema::Original),
            "revised" => Ok(ScoreSchema::Revised),
            other => Err(format!("unknown score schema '{other}'")),
        }
    }
}

/// Width of a category bar, in percent of its maximum.
pub fn bar_width(value: f64, max: f64) -> f64 {
    (value / max * 100.0).round()
}

pub const TIP_SECTIONS: [&str; 5] = [
    "Objective / Summary",
    "Declaration",
    "Hobbies / Interests",
    "Achievements",
    "Projects",
];

const TIP_WEIGHT: f64 = 20.0;

/// Splits the tip sections into present and missing by cumulative score
/// bands: a section counts as present while the running total of weights,
/// its own included, stays within `score`. Section content plays no part.
pub fn classify_tips(score: f64) -> (Vec<&'static str>, Vec<&'static str>) {
    let mut present = Vec::new();
    let mut missing = Vec::new();
    let mut running = 0.0;
    for section in TIP_SECTIONS {
        running += TIP_WEIGHT;
        if running <= score {
            present.push(section);
        } else {
            missing.push(section);
        }
    }
    (present, missing)
}

/// Fills a copy of the result card and returns the patches that swap it
/// into the result container.
pub fn render_result(
    mut card: Node,
    result: &ScoreResult,
    schema: ScoreSchema,
) -> Result<Vec<Patch>, PageError> {
    set_text(&mut card, "data-name", &result.name)?;
    set_text(&mut card, "data-email", &result.email)?;
    set_text(&mut card, "data-level", &result.level)?;
    set_text(&mut card, "data-field", &result.field)?;

    class_mut(&mut card, "data-skills")?.children = result
        .skills
        .iter()
        .map(|skill| badge("badge bg-light text-dark border", skill))
        .collect();

    match &result.breakdown {
        Some(breakdown) => fill_breakdown(&mut card, result.score, breakdown, schema)?,
        None => fill_flat_score(&mut card, result.score)?,
    }

    class_mut(&mut card, "data-rec-skills")?.children = result
        .rec_skills
        .iter()
        .map(|skill| badge("badge bg-primary text-light", skill))
        .collect();

    class_mut(&mut card, "data-rec-courses")?.children = result
        .rec_courses
        .iter()
        .map(|(title, url)| {
            Node::new("li").child(
                Node::new("a")
                    .class("text-decoration-none text-dark")
                    .attr("href", url.as_str())
                    .attr("target", "_blank")
                    .text(format!("▶ {title}")),
            )
        })
        .collect();

    render_tips(&mut card, result.score)?;

    Ok(vec![
        Patch::Children {
            slot: user::RESULT_CONTAINER,
            nodes: vec![card],
        },
        Patch::Show(user::RESULT_CONTAINER),
    ])
}

fn fill_breakdown(
    card: &mut Node,
    score: f64,
    breakdown: &Breakdown,
    schema: ScoreSchema,
) -> Result<(), PageError> {
    set_text(card, "data-total-score", &score.to_string())?;
    set_width(card, "data-total-progress", score)?;

    set_text(card, "data-skills-score", &breakdown.skills.to_string())?;
    set_width(
        card,
        "data-skills-bar",
        bar_width(breakdown.skills, schema.skills_max()),
    )?;

    set_text(card, "data-edu-score", &breakdown.education.to_string())?;
    set_width(
        card,
        "data-edu-bar",
        bar_width(breakdown.education, schema.education_max()),
    )?;

    set_text(card, "data-exp-score", &breakdown.experience.to_string())?;
    set_width(
        card,
        "data-exp-bar",
        bar_width(breakdown.experience, schema.experience_max()),
    )?;

    match schema.semantic_fit_max() {
        Some(max) => {
            set_text(card, "data-semantic-score", &breakdown.semantic_fit.to_string())?;
            set_width(
                card,
                "data-semantic-bar",
                bar_width(breakdown.semantic_fit, max),
            )?;
        }
        None => class_mut(card, "data-semantic-row")?.add_class(HIDDEN),
    }
    Ok(())
}

fn fill_flat_score(card: &mut Node, score: f64) -> Result<(), PageError> {
    let flat = class_mut(card, "data-score-fallback")?;
    flat.remove_class(HIDDEN);
    set_text(flat, "data-score-display", &format!("{score}/100"))?;
    let bar = class_mut(flat, "data-progress")?;
    bar.set_style("width", percent(score));
    bar.set_attr("aria-valuenow", score.to_string());

    class_mut(card, "data-breakdown")?.add_class(HIDDEN);
    Ok(())
}

fn render_tips(card: &mut Node, score: f64) -> Result<(), PageError> {
    let (present, missing) = classify_tips(score);
    class_mut(card, "data-present-list")?.children = present
        .into_iter()
        .map(|name| tip_item("text-success", "✅ ", name))
        .collect();
    class_mut(card, "data-missing-list")?.children = missing
        .into_iter()
        .map(|name| tip_item("text-danger", "❌ ", name))
        .collect();
    Ok(())
}

fn tip_item(class: &str, mark: &str, name: &str) -> Node {
    Node::new("li")
        .class(class)
        .text(mark)
        .child(Node::new("strong").text(name))
}

fn class_mut<'a>(node: &'a mut Node, class: &str) -> Result<&'a mut Node, PageError> {
    node.by_class_mut(class)
        .ok_or_else(|| PageError::MissingClass(class.to_string()))
}

fn set_text(node: &mut Node, class: &str, text: &str) -> Result<(), PageError> {
    class_mut(node, class)?.set_text(text);
    Ok(())
}

fn set_width(node: &mut Node, class: &str, value: f64) -> Result<(), PageError> {
    class_mut(node, class)?.set_style("width", percent(value));
    Ok(())
}
