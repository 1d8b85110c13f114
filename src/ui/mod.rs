//! Screen markup. Element ids exported as `Slot` constants are the contract
//! the controllers bind against.

pub mod admin;
pub mod generator;
pub mod home;
pub mod shortlist;
pub mod user;

use crate::view::{Node, Page, escape};

pub fn render_document(title: &str, page: &Page) -> String {
    let alerts = page
        .alerts()
        .iter()
        .map(|message| {
            Node::new("div")
                .class("alert alert-warning")
                .attr("role", "alert")
                .text(message.as_str())
                .to_html()
        })
        .collect::<String>();

    DOCUMENT_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{ALERTS}}", &alerts)
        .replace("{{BODY}}", &page.root().to_html())
}

pub(crate) fn nav() -> Node {
    Node::new("nav").class("navbar mb-4").child(
        Node::new("div").class("container").children(
            [
                ("/", "Home"),
                ("/user", "Analyze Resume"),
                ("/shortlist", "Shortlist"),
                ("/generator", "Resume Builder"),
                ("/admin", "Admin"),
            ]
            .into_iter()
            .map(|(href, label)| {
                Node::new("a")
                    .class("nav-link")
                    .attr("href", href)
                    .text(label)
            }),
        ),
    )
}

pub(crate) fn loader(id: &str) -> Node {
    Node::new("div")
        .id(id)
        .class("loader text-center my-4 d-none")
        .child(
            Node::new("div")
                .class("spinner-border text-primary")
                .attr("role", "status"),
        )
        .child(Node::new("p").class("mt-2").text("Processing..."))
}

pub(crate) fn labelled(label: &str, control: Node) -> Node {
    Node::new("div")
        .class("mb-3")
        .child(Node::new("label").class("form-label").text(label))
        .child(control)
}

const DOCUMENT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" />
  <style>
    :root {
      --ink: #2b2a28;
      --accent: #3498db;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.12);
    }

    body {
      min-height: 100vh;
      background: linear-gradient(135deg, #f4f7fb, #e9f1fa 60%, #f9fbfd 100%);
      color: var(--ink);
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 0 18px 48px;
    }

    .card {
      background: var(--card);
      border: none;
      border-radius: 18px;
      box-shadow: var(--shadow);
    }

    .badge {
      margin: 2px;
    }

    .progress {
      height: 12px;
    }

    .chart-legend {
      list-style: none;
      padding: 0;
      font-size: 0.9rem;
    }

    .alerts {
      position: sticky;
      top: 0;
      z-index: 10;
    }
  </style>
</head>
<body>
  <div class="alerts container">{{ALERTS}}</div>
  <main>{{BODY}}</main>
  <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
  <script>
    document.querySelectorAll('[data-chart]').forEach((el) => {
      if (typeof Chart === 'undefined') {
        return;
      }
      const spec = JSON.parse(el.dataset.chart);
      const canvas = document.createElement('canvas');
      el.querySelector('.chart-legend')?.classList.add('d-none');
      el.appendChild(canvas);
      new Chart(canvas.getContext('2d'), {
        type: spec.type,
        data: { labels: spec.labels, datasets: spec.datasets },
        options: { responsive: true, plugins: { legend: { position: spec.legend } } }
      });
    });
  </script>
</body>
</html>
"#;
