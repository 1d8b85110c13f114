use crate::models::{AnalysisSummary, GeneratorForm};
use crate::ui::generator::{self, GeneratorField};
use crate::view::Patch;

use super::badge;

pub fn render_form(form: &GeneratorForm) -> Vec<Patch> {
    GeneratorField::ALL
        .iter()
        .map(|field| Patch::Value {
            slot: field.slot(),
            value: field.get(form).to_string(),
        })
        .collect()
}

pub fn render_analysis(summary: &AnalysisSummary) -> Vec<Patch> {
    vec![
        Patch::Show(generator::ANALYSIS_RESULT),
        Patch::Text {
            slot: generator::RESULT_SCORE,
            text: summary.score.to_string(),
        },
        Patch::Text {
            slot: generator::RESULT_FIELD,
            text: summary.field.clone(),
        },
        Patch::Children {
            slot: generator::RESULT_SKILLS,
            nodes: summary
                .rec_skills
                .iter()
                .map(|skill| badge("badge bg-light text-dark border", skill))
                .collect(),
        },
    ]
}

/// `Jane Doe!` becomes `jane_doe__new_resume.pdf`. Anything outside ASCII
/// letters and digits becomes one `_` per UTF-16 unit, so characters beyond
/// the BMP leave two.
pub fn download_filename(name: &str) -> String {
    let mut safe = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            safe.push(c.to_ascii_lowercase());
        } else {
            safe.extend(std::iter::repeat_n('_', c.len_utf16()));
        }
    }
    format!("{safe}_new_resume.pdf")
}
