use serde::Serialize;

use super::Node;

/// Typed element id. The markup in `ui` must provide every slot a controller
/// binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(pub &'static str);

impl Slot {
    pub fn id(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One UI update. Renderers return these; only `Page::apply` performs them.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    Text { slot: Slot, text: String },
    Value { slot: Slot, value: String },
    Checked { slot: Slot, checked: bool },
    Width { slot: Slot, percent: f64 },
    Show(Slot),
    Hide(Slot),
    /// Replaces every child of the slot.
    Children { slot: Slot, nodes: Vec<Node> },
    Chart { slot: Slot, chart: ChartSpec },
}

impl Patch {
    pub fn slot(&self) -> Slot {
        match self {
            Patch::Text { slot, .. }
            | Patch::Value { slot, .. }
            | Patch::Checked { slot, .. }
            | Patch::Width { slot, .. }
            | Patch::Children { slot, .. }
            | Patch::Chart { slot, .. } => *slot,
            Patch::Show(slot) | Patch::Hide(slot) => *slot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
}

/// Everything a host charting library needs to paint one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub legend: &'static str,
}

impl ChartSpec {
    /// Pairs each label with its first-dataset value, for text fallbacks.
    pub fn entries(&self) -> Vec<(String, f64)> {
        let values = self
            .datasets
            .first()
            .map(|set| set.data.as_slice())
            .unwrap_or_default();
        self.labels
            .iter()
            .cloned()
            .zip(values.iter().copied())
            .collect()
    }
}

/// Formats a percentage for an inline `width` style.
pub fn percent(value: f64) -> String {
    format!("{value}%")
}
