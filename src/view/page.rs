use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::warn;

use super::{Node, Patch, Slot, percent};

pub const HIDDEN: &str = "d-none";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page has no element {0}")]
    MissingSlot(Slot),
    #[error("template has no element `.{0}`")]
    MissingClass(String),
    #[error("template {0} is empty")]
    EmptyTemplate(Slot),
    #[error("failed to encode chart: {0}")]
    Chart(#[from] serde_json::Error),
}

/// A file the host hands over for download.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Visible while held.
    Loader,
    /// Disabled and relabelled while held.
    Busy { label: &'static str },
}

#[derive(Debug)]
struct Hold {
    count: usize,
    restore_label: Option<String>,
}

/// The live element tree of one screen plus the side channels a browser
/// would provide: alerts, navigation and downloads.
#[derive(Debug)]
pub struct Page {
    root: Node,
    alerts: Vec<String>,
    navigation: Option<String>,
    download: Option<Download>,
    holds: HashMap<Slot, Hold>,
}

impl Page {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            alerts: Vec::new(),
            navigation: None,
            download: None,
            holds: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Fails on the first slot the markup does not provide.
    pub fn bind(&self, slots: &[Slot]) -> Result<(), PageError> {
        for slot in slots {
            self.node(*slot)?;
        }
        Ok(())
    }

    pub fn node(&self, slot: Slot) -> Result<&Node, PageError> {
        self.root
            .by_id(slot.id())
            .ok_or(PageError::MissingSlot(slot))
    }

    fn node_mut(&mut self, slot: Slot) -> Result<&mut Node, PageError> {
        self.root
            .by_id_mut(slot.id())
            .ok_or(PageError::MissingSlot(slot))
    }

    pub fn value(&self, slot: Slot) -> Result<String, PageError> {
        Ok(self.node(slot)?.value())
    }

    pub fn is_checked(&self, slot: Slot) -> Result<bool, PageError> {
        Ok(self.node(slot)?.attrs.contains_key("checked"))
    }

    pub fn is_visible(&self, slot: Slot) -> Result<bool, PageError> {
        Ok(!self.node(slot)?.has_class(HIDDEN))
    }

    /// Deep copy of a `<template>` element's content.
    pub fn template(&self, slot: Slot) -> Result<Node, PageError> {
        self.node(slot)?
            .children
            .first()
            .cloned()
            .ok_or(PageError::EmptyTemplate(slot))
    }

    pub fn toggle(&mut self, slot: Slot) -> Result<(), PageError> {
        let node = self.node_mut(slot)?;
        if node.has_class(HIDDEN) {
            node.remove_class(HIDDEN);
        } else {
            node.add_class(HIDDEN);
        }
        Ok(())
    }

    pub fn apply(&mut self, patches: impl IntoIterator<Item = Patch>) -> Result<(), PageError> {
        for patch in patches {
            self.apply_one(patch)?;
        }
        Ok(())
    }

    fn apply_one(&mut self, patch: Patch) -> Result<(), PageError> {
        let node = self.node_mut(patch.slot())?;
        match patch {
            Patch::Text { text, .. } => node.set_text(text),
            Patch::Value { value, .. } => node.set_value(value),
            Patch::Checked { checked, .. } => {
                if checked {
                    node.set_attr("checked", "checked");
                } else {
                    node.remove_attr("checked");
                }
            }
            Patch::Width { percent: value, .. } => node.set_style("width", percent(value)),
            Patch::Show(_) => node.remove_class(HIDDEN),
            Patch::Hide(_) => node.add_class(HIDDEN),
            Patch::Children { nodes, .. } => node.children = nodes,
            Patch::Chart { chart, .. } => {
                node.set_attr("data-chart", serde_json::to_string(&chart)?);
                let legend = chart
                    .entries()
                    .into_iter()
                    .map(|(label, value)| Node::new("li").text(format!("{label}: {value}")));
                node.children = vec![Node::new("ul").class("chart-legend").children(legend)];
            }
        }
        Ok(())
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn navigate(&mut self, target: impl Into<String>) {
        self.navigation = Some(target.into());
    }

    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }

    pub fn offer_download(&mut self, download: Download) {
        self.download = Some(download);
    }

    pub fn take_download(&mut self) -> Option<Download> {
        self.download.take()
    }

    fn acquire(&mut self, slot: Slot, indicator: Indicator) -> Result<(), PageError> {
        let node = self
            .root
            .by_id_mut(slot.id())
            .ok_or(PageError::MissingSlot(slot))?;
        let hold = self.holds.entry(slot).or_insert(Hold {
            count: 0,
            restore_label: None,
        });
        if hold.count == 0 {
            match indicator {
                Indicator::Loader => node.remove_class(HIDDEN),
                Indicator::Busy { label } => {
                    hold.restore_label = node.text.replace(label.to_string());
                    node.set_attr("disabled", "disabled");
                }
            }
        }
        hold.count += 1;
        Ok(())
    }

    fn release(&mut self, slot: Slot, indicator: Indicator) -> Result<(), PageError> {
        let Some(hold) = self.holds.get_mut(&slot) else {
            return Ok(());
        };
        hold.count = hold.count.saturating_sub(1);
        if hold.count > 0 {
            return Ok(());
        }
        let restore_label = hold.restore_label.take();
        self.holds.remove(&slot);

        let node = self.node_mut(slot)?;
        match indicator {
            Indicator::Loader => node.add_class(HIDDEN),
            Indicator::Busy { .. } => {
                node.text = restore_label;
                node.remove_attr("disabled");
            }
        }
        Ok(())
    }
}

/// Handle shared by a controller and its indicator guards. The lock is only
/// taken for synchronous page work, never across an await.
#[derive(Debug, Clone)]
pub struct SharedPage(Arc<Mutex<Page>>);

impl SharedPage {
    pub fn new(root: Node) -> Self {
        Self(Arc::new(Mutex::new(Page::new(root))))
    }

    pub fn lock(&self) -> MutexGuard<'_, Page> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn alert(&self, message: impl Into<String>) {
        self.lock().alert(message);
    }

    pub fn apply(&self, patches: impl IntoIterator<Item = Patch>) -> Result<(), PageError> {
        self.lock().apply(patches)
    }

    pub fn value(&self, slot: Slot) -> Result<String, PageError> {
        self.lock().value(slot)
    }

    pub fn to_html(&self) -> String {
        self.lock().root().to_html()
    }
}

/// Holds a loader or busy button for as long as it lives.
#[derive(Debug)]
pub struct IndicatorGuard {
    page: SharedPage,
    slot: Slot,
    indicator: Indicator,
}

impl IndicatorGuard {
    pub fn acquire(page: &SharedPage, slot: Slot, indicator: Indicator) -> Result<Self, PageError> {
        page.lock().acquire(slot, indicator)?;
        Ok(Self {
            page: page.clone(),
            slot,
            indicator,
        })
    }

    pub fn loader(page: &SharedPage, slot: Slot) -> Result<Self, PageError> {
        Self::acquire(page, slot, Indicator::Loader)
    }

    pub fn busy(page: &SharedPage, slot: Slot, label: &'static str) -> Result<Self, PageError> {
        Self::acquire(page, slot, Indicator::Busy { label })
    }
}

impl Drop for IndicatorGuard {
    fn drop(&mut self) {
        if let Err(err) = self.page.lock().release(self.slot, self.indicator) {
            warn!("failed to release {}: {err}", self.slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOADER: Slot = Slot("loader");
    const BUTTON: Slot = Slot("optimize");

    fn page() -> SharedPage {
        SharedPage::new(
            Node::new("main")
                .child(Node::new("div").id("loader").class("spinner d-none"))
                .child(Node::new("button").id("optimize").text("Optimize"))
                .child(Node::new("div").id("list").child(Node::new("span").text("stale"))),
        )
    }

    #[test]
    fn bind_reports_the_first_missing_slot() {
        let page = page();
        let err = page
            .lock()
            .bind(&[LOADER, Slot("nowhere"), Slot("also-missing")])
            .unwrap_err();
        assert!(matches!(err, PageError::MissingSlot(Slot("nowhere"))));
    }

    #[test]
    fn patch_on_missing_slot_fails() {
        let page = page();
        let err = page.apply([Patch::Show(Slot("nowhere"))]).unwrap_err();
        assert!(matches!(err, PageError::MissingSlot(_)));
    }

    #[test]
    fn children_patch_replaces_previous_content() {
        let page = page();
        page.apply([Patch::Children {
            slot: Slot("list"),
            nodes: vec![Node::new("span").text("fresh")],
        }])
        .unwrap();
        let guard = page.lock();
        let list = guard.node(Slot("list")).unwrap();
        assert_eq!(list.children.len(), 1);
        assert_eq!(list.text_content(), "fresh");
    }

    #[test]
    fn loader_stays_visible_until_last_hold_drops() {
        let page = page();
        let first = IndicatorGuard::loader(&page, LOADER).unwrap();
        let second = IndicatorGuard::loader(&page, LOADER).unwrap();
        assert!(page.lock().is_visible(LOADER).unwrap());
        drop(first);
        assert!(page.lock().is_visible(LOADER).unwrap());
        drop(second);
        assert!(!page.lock().is_visible(LOADER).unwrap());
    }

    #[test]
    fn busy_button_restores_the_label_from_the_first_hold() {
        let page = page();
        let first = IndicatorGuard::busy(&page, BUTTON, "Thinking...").unwrap();
        let second = IndicatorGuard::busy(&page, BUTTON, "Thinking...").unwrap();
        {
            let guard = page.lock();
            let button = guard.node(BUTTON).unwrap();
            assert_eq!(button.text.as_deref(), Some("Thinking..."));
            assert!(button.attrs.contains_key("disabled"));
        }
        drop(second);
        drop(first);
        let guard = page.lock();
        let button = guard.node(BUTTON).unwrap();
        assert_eq!(button.text.as_deref(), Some("Optimize"));
        assert!(!button.attrs.contains_key("disabled"));
    }
}
