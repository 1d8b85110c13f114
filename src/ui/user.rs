use crate::view::{Node, Slot};

use super::{labelled, loader, nav};

pub const LOADER: Slot = Slot("loader");
pub const RESULT_CONTAINER: Slot = Slot("result-container");
pub const RESULT_TEMPLATE: Slot = Slot("result-template");
pub const JOB_DESCRIPTION: Slot = Slot("jobDescription");
pub const JOB_DESCRIPTION_CONTAINER: Slot = Slot("job-description-container");

pub fn screen() -> Node {
    Node::new("div")
        .child(nav())
        .child(
            Node::new("div")
                .class("card p-4 mb-4")
                .child(Node::new("h1").class("h3").text("Resume Analyzer"))
                .child(upload_form()),
        )
        .child(loader(LOADER.id()))
        .child(Node::new("div").id(RESULT_CONTAINER.id()).class("d-none"))
        .child(
            Node::new("template")
                .id(RESULT_TEMPLATE.id())
                .child(result_template()),
        )
}

fn upload_form() -> Node {
    Node::new("form")
        .attr("method", "post")
        .attr("action", "/user")
        .attr("enctype", "multipart/form-data")
        .child(labelled(
            "Resume (PDF)",
            Node::new("input")
                .id("resumeFile")
                .class("form-control")
                .attr("type", "file")
                .attr("name", "file")
                .attr("accept", ".pdf"),
        ))
        .child(
            Node::new("button")
                .class("btn btn-link px-0")
                .attr("type", "button")
                .attr(
                    "onclick",
                    "document.getElementById('job-description-container').classList.toggle('d-none')",
                )
                .text("Match against a job description"),
        )
        .child(
            Node::new("div")
                .id(JOB_DESCRIPTION_CONTAINER.id())
                .class("d-none")
                .child(labelled(
                    "Job description",
                    Node::new("textarea")
                        .id(JOB_DESCRIPTION.id())
                        .class("form-control")
                        .attr("name", "job_description")
                        .attr("rows", "5"),
                )),
        )
        .child(
            Node::new("button")
                .class("btn btn-primary")
                .attr("type", "submit")
                .text("Analyze"),
        )
}

fn score_row(label: &str, score_class: &str, bar_class: &str) -> Node {
    Node::new("div")
        .class("mb-2")
        .child(
            Node::new("div")
                .class("d-flex justify-content-between")
                .child(Node::new("span").text(label))
                .child(Node::new("span").class(score_class)),
        )
        .child(
            Node::new("div").class("progress").child(
                Node::new("div")
                    .class("progress-bar")
                    .class(bar_class)
                    .attr("role", "progressbar"),
            ),
        )
}

/// The card the result renderer fills in, addressed by `data-*` classes.
pub fn result_template() -> Node {
    Node::new("div")
        .class("card p-4 result-card")
        .child(Node::new("h2").class("h4 data-name"))
        .child(
            Node::new("p")
                .child(Node::new("span").class("data-email me-2"))
                .child(Node::new("span").class("badge bg-info data-level"))
                .child(Node::new("span").class("badge bg-secondary data-field")),
        )
        .child(Node::new("h3").class("h6").text("Skills"))
        .child(Node::new("div").class("data-skills mb-3"))
        .child(
            Node::new("div")
                .class("data-score-fallback text-center mb-3 d-none")
                .child(Node::new("h4").class("data-score-display"))
                .child(
                    Node::new("div").class("progress").child(
                        Node::new("div")
                            .class("progress-bar data-progress")
                            .attr("role", "progressbar")
                            .attr("aria-valuemin", "0")
                            .attr("aria-valuemax", "100"),
                    ),
                ),
        )
        .child(
            Node::new("div")
                .class("data-breakdown text-start small mb-3")
                .child(score_row("Total", "data-total-score", "data-total-progress"))
                .child(score_row("Skills", "data-skills-score", "data-skills-bar bg-success"))
                .child(score_row("Education", "data-edu-score", "data-edu-bar bg-info"))
                .child(score_row("Experience", "data-exp-score", "data-exp-bar bg-warning"))
                .child(
                    score_row(
                        "Semantic fit",
                        "data-semantic-score",
                        "data-semantic-bar bg-secondary",
                    )
                    .class("data-semantic-row"),
                ),
        )
        .child(Node::new("h3").class("h6").text("Recommended skills"))
        .child(Node::new("div").class("data-rec-skills mb-3"))
        .child(Node::new("h3").class("h6").text("Recommended courses"))
        .child(Node::new("ul").class("list-unstyled data-rec-courses"))
        .child(
            Node::new("div")
                .class("row")
                .child(
                    Node::new("div")
                        .class("col")
                        .child(Node::new("h3").class("h6").text("Present sections"))
                        .child(Node::new("ul").class("list-unstyled data-present-list")),
                )
                .child(
                    Node::new("div")
                        .class("col")
                        .child(Node::new("h3").class("h6").text("Missing sections"))
                        .child(Node::new("ul").class("list-unstyled data-missing-list")),
                ),
        )
}
