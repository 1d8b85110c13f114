use std::collections::BTreeMap;
use std::fmt::Write;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// A virtual element. Screens are built from these and renderers return them;
/// nothing here touches a real document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Adds every whitespace-separated class in `classes`.
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn style(mut self, name: &str, value: impl Into<String>) -> Self {
        self.style.insert(name.to_string(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }

    pub fn set_style(&mut self, name: &str, value: impl Into<String>) {
        self.style.insert(name.to_string(), value.into());
    }

    /// Input-like value: textareas keep it as text, selects in their selected
    /// option (first option by default), everything else in `value`.
    pub fn value(&self) -> String {
        match self.tag.as_str() {
            "textarea" => self.text.clone().unwrap_or_default(),
            "select" => self
                .children
                .iter()
                .find(|option| option.attrs.contains_key("selected"))
                .or(self.children.first())
                .map(Node::value)
                .unwrap_or_default(),
            _ => self.attrs.get("value").cloned().unwrap_or_default(),
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self.tag.as_str() {
            "textarea" => self.set_text(value),
            "select" => {
                for option in &mut self.children {
                    if option.value() == value {
                        option.set_attr("selected", "selected");
                    } else {
                        option.remove_attr("selected");
                    }
                }
            }
            _ => self.set_attr("value", value),
        }
    }

    pub fn find(&self, pred: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(pred))
    }

    pub fn find_mut(&mut self, pred: &dyn Fn(&Node) -> bool) -> Option<&mut Node> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Some(found) = child.find_mut(pred) {
                return Some(found);
            }
        }
        None
    }

    pub fn by_id(&self, id: &str) -> Option<&Node> {
        self.find(&|node: &Node| node.id.as_deref() == Some(id))
    }

    pub fn by_id_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.find_mut(&|node: &Node| node.id.as_deref() == Some(id))
    }

    pub fn by_class(&self, class: &str) -> Option<&Node> {
        self.find(&|node: &Node| node.has_class(class))
    }

    pub fn by_class_mut(&mut self, class: &str) -> Option<&mut Node> {
        self.find_mut(&|node: &Node| node.has_class(class))
    }

    /// Concatenated text of this node and all descendants, depth first.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape(id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            if self.tag == "textarea" && name == "value" {
                continue;
            }
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if !self.style.is_empty() {
            let style = self
                .style
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
