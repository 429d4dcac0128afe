//! A small owned XML element tree
//!
//! The package reader builds one of these from `content.xml` and the writer
//! serializes it back. Element and attribute names keep their namespace prefix
//! (`table:table-row`, `office:value-type`); the tree does not resolve
//! namespace URIs.

/// A node in the element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }
}

/// An XML element with its attributes and children, in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with a qualified name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child setter
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_element(child);
        self
    }

    /// Builder-style text setter
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.push_text(text);
        self
    }

    /// Qualified tag name (e.g. `table:table-cell`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in document order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute by qualified name
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value in place
    pub fn set_attribute<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(pos).1)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push_element(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn push_text<S: Into<String>>(&mut self, text: S) {
        self.children.push(Node::Text(text.into()));
    }

    /// Append a child element and return a mutable reference to it
    pub fn push_element_mut(&mut self, child: Element) -> &mut Element {
        self.children.push(Node::Element(child));
        match self.children.last_mut() {
            Some(Node::Element(e)) => e,
            _ => unreachable!("just pushed an element"),
        }
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Remove direct child elements with the given name
    pub fn remove_children(&mut self, name: &str) {
        self.children
            .retain(|c| !matches!(c, Node::Element(e) if e.name == name));
    }

    /// Direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First direct child element with the given name
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.name == name)
    }

    /// Mutable first direct child element with the given name
    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|c| match c {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Insert a child element at `index` among all child nodes
    pub fn insert_element(&mut self, index: usize, child: Element) {
        self.insert_element_mut(index, child);
    }

    /// Insert a child element and return a mutable reference to it
    pub fn insert_element_mut(&mut self, index: usize, child: Element) -> &mut Element {
        let index = index.min(self.children.len());
        self.children.insert(index, Node::Element(child));
        match &mut self.children[index] {
            Node::Element(e) => e,
            Node::Text(_) => unreachable!("just inserted an element"),
        }
    }

    /// The child node at `index`, if it is an element
    pub fn child_element_mut(&mut self, index: usize) -> Option<&mut Element> {
        match self.children.get_mut(index) {
            Some(Node::Element(e)) => Some(e),
            _ => None,
        }
    }

    /// Child-node positions leading from this element to the `n`-th element
    /// named `tag`, in the order [`Element::descendants`] uses
    ///
    /// An empty path means this element itself.
    pub fn nth_descendant_path(&self, tag: &str, n: usize) -> Option<Vec<usize>> {
        let mut remaining = n;
        let mut path = self.descendant_path_inner(tag, &mut remaining)?;
        path.reverse();
        Some(path)
    }

    fn descendant_path_inner(&self, tag: &str, remaining: &mut usize) -> Option<Vec<usize>> {
        if self.name == tag {
            if *remaining == 0 {
                return Some(Vec::new());
            }
            *remaining -= 1;
        }
        for (i, child) in self.children.iter().enumerate() {
            if let Node::Element(e) = child {
                if let Some(mut path) = e.descendant_path_inner(tag, remaining) {
                    path.push(i);
                    return Some(path);
                }
            }
        }
        None
    }

    /// Follow child-node positions down from this element
    pub fn element_at_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        match path.split_first() {
            None => Some(self),
            Some((&first, rest)) => self.child_element_mut(first)?.element_at_path_mut(rest),
        }
    }

    /// All elements named `tag` in this subtree, in document order
    ///
    /// The element itself is included when it matches, and the search
    /// continues into matching elements, so nested matches are found too.
    pub fn descendants(&self, tag: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(tag, &mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        if self.name == tag {
            out.push(self);
        }
        for child in self.child_elements() {
            child.collect_descendants(tag, out);
        }
    }

    /// Number of elements [`Element::descendants`] would return
    pub fn count_descendants(&self, tag: &str) -> usize {
        let own = usize::from(self.name == tag);
        own + self
            .child_elements()
            .map(|c| c.count_descendants(tag))
            .sum::<usize>()
    }

    /// The `n`-th element named `tag` in document order, mutably
    pub fn nth_descendant_mut(&mut self, tag: &str, n: usize) -> Option<&mut Element> {
        let mut remaining = n;
        self.nth_descendant_inner(tag, &mut remaining)
    }

    fn nth_descendant_inner(&mut self, tag: &str, remaining: &mut usize) -> Option<&mut Element> {
        if self.name == tag {
            if *remaining == 0 {
                return Some(self);
            }
            *remaining -= 1;
        }
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                if let Some(found) = e.nth_descendant_inner(tag, remaining) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Element {
        Element::new("table:table")
            .with_attribute("table:name", "Sheet1")
            .with_child(
                Element::new("table:table-header-rows").with_child(
                    Element::new("table:table-row")
                        .with_child(Element::new("table:table-cell").with_text("h")),
                ),
            )
            .with_child(
                Element::new("table:table-row")
                    .with_child(Element::new("table:table-cell").with_text("a"))
                    .with_child(Element::new("table:table-cell").with_text("b")),
            )
    }

    #[test]
    fn test_attributes() {
        let mut e = Element::new("x").with_attribute("a", "1");
        assert_eq!(e.attribute("a"), Some("1"));
        e.set_attribute("a", "2");
        e.set_attribute("b", "3");
        assert_eq!(
            e.attributes(),
            &[("a".to_string(), "2".to_string()), ("b".to_string(), "3".to_string())]
        );
        assert_eq!(e.remove_attribute("a"), Some("2".to_string()));
        assert_eq!(e.attribute("a"), None);
        assert_eq!(e.remove_attribute("zzz"), None);
    }

    #[test]
    fn test_descendants_document_order() {
        let table = sample();
        let rows = table.descendants("table:table-row");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text_content(), "h");
        assert_eq!(rows[1].text_content(), "ab");

        let cells = table.descendants("table:table-cell");
        let texts: Vec<_> = cells.iter().map(|c| c.text_content()).collect();
        assert_eq!(texts, vec!["h", "a", "b"]);
        assert_eq!(table.count_descendants("table:table-cell"), 3);

        // Self is included when it matches
        assert_eq!(table.descendants("table:table").len(), 1);
    }

    #[test]
    fn test_nth_descendant_mut() {
        let mut table = sample();
        let cell = table.nth_descendant_mut("table:table-cell", 2).unwrap();
        cell.clear_children();
        cell.push_text("B");
        assert_eq!(table.text_content(), "haB");
        assert!(table.nth_descendant_mut("table:table-cell", 3).is_none());
    }

    #[test]
    fn test_descendant_paths() {
        let mut table = sample();
        assert_eq!(table.nth_descendant_path("table:table", 0), Some(vec![]));
        assert_eq!(
            table.nth_descendant_path("table:table-row", 0),
            Some(vec![0, 0])
        );
        assert_eq!(
            table.nth_descendant_path("table:table-cell", 2),
            Some(vec![1, 1])
        );
        assert_eq!(table.nth_descendant_path("table:table-cell", 3), None);

        let row = table.element_at_path_mut(&[1]).unwrap();
        row.insert_element(1, Element::new("table:table-cell").with_text("x"));
        assert_eq!(table.text_content(), "haxb");
        assert!(table.element_at_path_mut(&[5]).is_none());
    }

    #[test]
    fn test_find_and_remove_children() {
        let mut table = sample();
        assert!(table.find_child("table:table-header-rows").is_some());
        table.remove_children("table:table-header-rows");
        assert!(table.find_child("table:table-header-rows").is_none());
        assert_eq!(table.child_elements().count(), 1);

        let row = table.find_child_mut("table:table-row").unwrap();
        row.push_element_mut(Element::new("table:table-cell"))
            .push_text("c");
        assert_eq!(table.text_content(), "abc");
    }
}
