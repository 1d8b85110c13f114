use crate::view::{Node, Slot};

use super::{labelled, loader, nav};

pub const LOADER: Slot = Slot("loader");
pub const RESULTS_SECTION: Slot = Slot("results-section");
pub const RESULTS_BODY: Slot = Slot("results-body");
pub const JOB_DESC: Slot = Slot("jobDesc");

pub fn screen() -> Node {
    let form = Node::new("form")
        .attr("method", "post")
        .attr("action", "/shortlist")
        .attr("enctype", "multipart/form-data")
        .child(labelled(
            "Resumes (PDF, several allowed)",
            Node::new("input")
                .id("resumeFiles")
                .class("form-control")
                .attr("type", "file")
                .attr("name", "resumes")
                .attr("accept", ".pdf")
                .attr("multiple", "multiple"),
        ))
        .child(labelled(
            "Job description",
            Node::new("textarea")
                .id(JOB_DESC.id())
                .class("form-control")
                .attr("name", "job_description")
                .attr("rows", "5"),
        ))
        .child(
            Node::new("button")
                .class("btn btn-primary")
                .attr("type", "submit")
                .text("Rank candidates"),
        );

    let results = Node::new("div")
        .id(RESULTS_SECTION.id())
        .class("card p-3 d-none")
        .child(
            Node::new("table")
                .class("table align-middle")
                .child(
                    Node::new("thead").child(Node::new("tr").children(
                        ["Rank", "Candidate", "Email", "Score", "Top skills", ""]
                            .into_iter()
                            .map(|h| Node::new("th").text(h)),
                    )),
                )
                .child(Node::new("tbody").id(RESULTS_BODY.id())),
        );

    Node::new("div")
        .child(nav())
        .child(
            Node::new("div")
                .class("card p-4 mb-4")
                .child(Node::new("h1").class("h3").text("Batch shortlist"))
                .child(form),
        )
        .child(loader(LOADER.id()))
        .child(results)
}
