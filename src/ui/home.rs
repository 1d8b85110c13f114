use crate::view::Node;

use super::nav;

pub fn screen() -> Node {
    let tiles = [
        ("/user", "Analyze a resume", "Score one resume, optionally against a job description."),
        ("/shortlist", "Shortlist candidates", "Rank a batch of resumes for one role."),
        ("/generator", "Build a resume", "Import, edit, optimize and download a resume."),
        ("/admin", "Admin dashboard", "Browse stored candidates and analytics."),
    ];

    Node::new("div").child(nav()).child(
        Node::new("div").class("row").children(tiles.into_iter().map(
            |(href, title, blurb)| {
                Node::new("div").class("col-md-6 mb-4").child(
                    Node::new("a")
                        .class("card p-4 h-100 text-decoration-none text-dark")
                        .attr("href", href)
                        .child(Node::new("h2").class("h5").text(title))
                        .child(Node::new("p").class("mb-0 text-muted").text(blurb)),
                )
            },
        )),
    )
}
