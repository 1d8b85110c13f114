use crate::view::{Node, Slot};

use super::{labelled, nav};

pub const ADMIN_USER: Slot = Slot("adminUser");
pub const ADMIN_PASS: Slot = Slot("adminPass");
pub const LOGIN_ERROR: Slot = Slot("login-error");

pub const PRIVACY_TOGGLE: Slot = Slot("privacyToggle");
pub const TABLE_BODY: Slot = Slot("user-table-body");
pub const FIELD_CHART: Slot = Slot("fieldChart");
pub const LEVEL_CHART: Slot = Slot("levelChart");
pub const SKILLS_CHART: Slot = Slot("skillsChart");
pub const HIGH_POTENTIAL_LIST: Slot = Slot("highPotentialList");

pub fn login_screen() -> Node {
    Node::new("div").child(nav()).child(
        Node::new("div")
            .class("card p-4 mx-auto")
            .style("max-width", "420px")
            .child(Node::new("h1").class("h4").text("Admin login"))
            .child(
                Node::new("form")
                    .attr("method", "post")
                    .attr("action", "/admin")
                    .child(labelled(
                        "Username",
                        Node::new("input")
                            .id(ADMIN_USER.id())
                            .class("form-control")
                            .attr("name", "username"),
                    ))
                    .child(labelled(
                        "Password",
                        Node::new("input")
                            .id(ADMIN_PASS.id())
                            .class("form-control")
                            .attr("type", "password")
                            .attr("name", "password"),
                    ))
                    .child(
                        Node::new("div")
                            .id(LOGIN_ERROR.id())
                            .class("text-danger mb-3 d-none")
                            .text("Invalid username or password."),
                    )
                    .child(
                        Node::new("button")
                            .class("btn btn-primary w-100")
                            .attr("type", "submit")
                            .text("Login"),
                    ),
            ),
    )
}

fn chart_card(title: &str, id: &str) -> Node {
    Node::new("div").class("col-md-4 mb-4").child(
        Node::new("div")
            .class("card p-3 h-100")
            .child(Node::new("h2").class("h6").text(title))
            .child(Node::new("div").id(id).class("chart")),
    )
}

pub fn dashboard_screen() -> Node {
    let header = Node::new("div")
        .class("d-flex justify-content-between align-items-center mb-4")
        .child(Node::new("h1").class("h3").text("Candidate dashboard"))
        .child(
            Node::new("div")
                .class("d-flex gap-2 align-items-center")
                .child(
                    Node::new("form")
                        .class("form-check mb-0")
                        .attr("method", "get")
                        .attr("action", "/dashboard")
                        .child(
                            Node::new("input")
                                .id(PRIVACY_TOGGLE.id())
                                .class("form-check-input")
                                .attr("type", "checkbox")
                                .attr("name", "privacy")
                                .attr("value", "true")
                                .attr("onchange", "this.form.submit()"),
                        )
                        .child(
                            Node::new("label")
                                .class("form-check-label")
                                .attr("for", PRIVACY_TOGGLE.id())
                                .text("Privacy mode"),
                        ),
                )
                .child(
                    Node::new("a")
                        .class("btn btn-outline-secondary btn-sm")
                        .attr("href", "/dashboard/export")
                        .text("Export CSV"),
                )
                .child(
                    Node::new("form")
                        .attr("method", "post")
                        .attr("action", "/logout")
                        .child(
                            Node::new("button")
                                .class("btn btn-outline-danger btn-sm")
                                .attr("type", "submit")
                                .text("Logout"),
                        ),
                ),
        );

    let table = Node::new("div").class("card p-3 mb-4").child(
        Node::new("table")
            .class("table table-hover align-middle")
            .child(
                Node::new("thead").child(Node::new("tr").children(
                    ["Name", "Email", "Score", "Field", "Level", "Date", ""]
                        .into_iter()
                        .map(|h| Node::new("th").text(h)),
                )),
            )
            .child(Node::new("tbody").id(TABLE_BODY.id())),
    );

    Node::new("div")
        .child(nav())
        .child(header)
        .child(
            Node::new("div")
                .class("row")
                .child(chart_card("Candidates by field", FIELD_CHART.id()))
                .child(chart_card("Candidates by level", LEVEL_CHART.id()))
                .child(chart_card("Skills gap", SKILLS_CHART.id())),
        )
        .child(
            Node::new("div")
                .class("card p-3 mb-4")
                .child(Node::new("h2").class("h6").text("High potential"))
                .child(Node::new("ul").id(HIGH_POTENTIAL_LIST.id()).class("list-group")),
        )
        .child(table)
}
