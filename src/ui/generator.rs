use std::str::FromStr;

use crate::models::GeneratorForm;
use crate::view::{Node, Slot};

use super::{labelled, loader, nav};

pub const GEN_NAME: Slot = Slot("gen_name");
pub const GEN_EMAIL: Slot = Slot("gen_email");
pub const GEN_MOBILE: Slot = Slot("gen_mobile");
pub const GEN_SUMMARY: Slot = Slot("gen_summary");
pub const GEN_EXPERIENCE: Slot = Slot("gen_experience");
pub const GEN_EDUCATION: Slot = Slot("gen_education");
pub const GEN_PROJECTS: Slot = Slot("gen_projects");
pub const GEN_SKILLS: Slot = Slot("gen_skills");
pub const GEN_STYLE: Slot = Slot("gen_style");

pub const LOADER: Slot = Slot("gen-loader");
pub const ANALYSIS_RESULT: Slot = Slot("genAnalysisResult");
pub const RESULT_SCORE: Slot = Slot("gen_res_score");
pub const RESULT_FIELD: Slot = Slot("gen_res_field");
pub const RESULT_SKILLS: Slot = Slot("gen_res_skills");

pub const OPTIMIZE_LABEL: &str = "✨ Optimize";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorField {
    Name,
    Email,
    Mobile,
    Summary,
    Experience,
    Education,
    Projects,
    Skills,
}

impl GeneratorField {
    pub const ALL: [GeneratorField; 8] = [
        GeneratorField::Name,
        GeneratorField::Email,
        GeneratorField::Mobile,
        GeneratorField::Summary,
        GeneratorField::Experience,
        GeneratorField::Education,
        GeneratorField::Projects,
        GeneratorField::Skills,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GeneratorField::Name => "name",
            GeneratorField::Email => "email",
            GeneratorField::Mobile => "mobile",
            GeneratorField::Summary => "summary",
            GeneratorField::Experience => "experience",
            GeneratorField::Education => "education",
            GeneratorField::Projects => "projects",
            GeneratorField::Skills => "skills",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GeneratorField::Name => "Full name",
            GeneratorField::Email => "Email",
            GeneratorField::Mobile => "Mobile",
            GeneratorField::Summary => "Professional summary",
            GeneratorField::Experience => "Experience",
            GeneratorField::Education => "Education",
            GeneratorField::Projects => "Projects",
            GeneratorField::Skills => "Skills",
        }
    }

    pub fn slot(self) -> Slot {
        match self {
            GeneratorField::Name => GEN_NAME,
            GeneratorField::Email => GEN_EMAIL,
            GeneratorField::Mobile => GEN_MOBILE,
            GeneratorField::Summary => GEN_SUMMARY,
            GeneratorField::Experience => GEN_EXPERIENCE,
            GeneratorField::Education => GEN_EDUCATION,
            GeneratorField::Projects => GEN_PROJECTS,
            GeneratorField::Skills => GEN_SKILLS,
        }
    }

    /// Button that sends this field to the optimizer, for the long-form
    /// fields that have one.
    pub fn optimize_button(self) -> Option<Slot> {
        match self {
            GeneratorField::Summary => Some(Slot("optimize_summary")),
            GeneratorField::Experience => Some(Slot("optimize_experience")),
            GeneratorField::Education => Some(Slot("optimize_education")),
            GeneratorField::Projects => Some(Slot("optimize_projects")),
            _ => None,
        }
    }

    pub fn get(self, form: &GeneratorForm) -> &str {
        match self {
            GeneratorField::Name => &form.name,
            GeneratorField::Email => &form.email,
            GeneratorField::Mobile => &form.mobile,
            GeneratorField::Summary => &form.summary,
            GeneratorField::Experience => &form.experience,
            GeneratorField::Education => &form.education,
            GeneratorField::Projects => &form.projects,
            GeneratorField::Skills => &form.skills,
        }
    }

    pub fn set(self, form: &mut GeneratorForm, value: String) {
        let target = match self {
            GeneratorField::Name => &mut form.name,
            GeneratorField::Email => &mut form.email,
            GeneratorField::Mobile => &mut form.mobile,
            GeneratorField::Summary => &mut form.summary,
            GeneratorField::Experience => &mut form.experience,
            GeneratorField::Education => &mut form.education,
            GeneratorField::Projects => &mut form.projects,
            GeneratorField::Skills => &mut form.skills,
        };
        *target = value;
    }

    fn multiline(self) -> bool {
        !matches!(
            self,
            GeneratorField::Name | GeneratorField::Email | GeneratorField::Mobile
        )
    }
}

impl FromStr for GeneratorField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        GeneratorField::ALL
            .into_iter()
            .find(|field| field.key() == value)
            .ok_or_else(|| format!("unknown generator field '{value}'"))
    }
}

fn field_control(field: GeneratorField) -> Node {
    let control = if field.multiline() {
        Node::new("textarea").attr("rows", "4")
    } else {
        Node::new("input").attr("type", "text")
    }
    .id(field.slot().id())
    .class("form-control")
    .attr("name", field.key());

    let mut group = labelled(field.label(), control);
    if let Some(button) = field.optimize_button() {
        group = group.child(
            Node::new("button")
                .id(button.id())
                .class("btn btn-sm btn-outline-primary mt-1")
                .attr("type", "submit")
                .attr("formaction", format!("/generator/optimize/{}", field.key()))
                .text(OPTIMIZE_LABEL),
        );
    }
    group
}

pub fn screen() -> Node {
    let parse_form = Node::new("form")
        .class("mb-3")
        .attr("method", "post")
        .attr("action", "/generator/parse")
        .attr("enctype", "multipart/form-data")
        .child(labelled(
            "Start from an existing resume (PDF)",
            Node::new("input")
                .id("fileInput")
                .class("form-control")
                .attr("type", "file")
                .attr("name", "file")
                .attr("accept", ".pdf"),
        ))
        .child(
            Node::new("button")
                .class("btn btn-outline-secondary btn-sm")
                .attr("type", "submit")
                .text("Import"),
        );

    let style = labelled(
        "Template",
        Node::new("select")
            .id(GEN_STYLE.id())
            .class("form-select")
            .attr("name", "style")
            .child(Node::new("option").attr("value", "classic").text("Classic"))
            .child(Node::new("option").attr("value", "modern").text("Modern")),
    );

    let editor = Node::new("form")
        .attr("method", "post")
        .attr("action", "/generator/analyze")
        .children(GeneratorField::ALL.into_iter().map(field_control))
        .child(style)
        .child(
            Node::new("div")
                .class("d-flex gap-2")
                .child(
                    Node::new("button")
                        .class("btn btn-primary")
                        .attr("type", "submit")
                        .text("Analyze"),
                )
                .child(
                    Node::new("button")
                        .class("btn btn-success")
                        .attr("type", "submit")
                        .attr("formaction", "/generator/download")
                        .text("Download PDF"),
                ),
        );

    let analysis = Node::new("div")
        .id(ANALYSIS_RESULT.id())
        .class("card p-3 mt-4 d-none")
        .child(
            Node::new("p")
                .text("Score: ")
                .child(Node::new("strong").id(RESULT_SCORE.id())),
        )
        .child(
            Node::new("p")
                .text("Predicted field: ")
                .child(Node::new("strong").id(RESULT_FIELD.id())),
        )
        .child(Node::new("h2").class("h6").text("Recommended skills"))
        .child(Node::new("div").id(RESULT_SKILLS.id()));

    Node::new("div").child(nav()).child(
        Node::new("div")
            .class("card p-4")
            .child(Node::new("h1").class("h3").text("Resume builder"))
            .child(parse_form)
            .child(loader(LOADER.id()))
            .child(editor)
            .child(analysis),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_round_trip() {
        for field in GeneratorField::ALL {
            assert_eq!(field.key().parse::<GeneratorField>(), Ok(field));
        }
        assert!("hobbies".parse::<GeneratorField>().is_err());
    }

    #[test]
    fn set_then_get_targets_the_same_field() {
        let mut form = GeneratorForm::default();
        GeneratorField::Projects.set(&mut form, "CLI tool".into());
        assert_eq!(form.projects, "CLI tool");
        assert_eq!(GeneratorField::Projects.get(&form), "CLI tool");
        assert_eq!(GeneratorField::Summary.get(&form), "");
    }
}
