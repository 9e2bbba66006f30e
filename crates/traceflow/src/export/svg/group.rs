//! `<g>` element carrying user-supplied attribute values.
//!
//! `svg::node::element::Group` runs its own escape over attribute values,
//! which leaves CR, LF and TAB untouched and would encode an already escaped
//! value a second time. [`DataGroup`] stores each value after exactly one
//! [`escape_attr`] pass and writes it verbatim.

use std::{collections::hash_map::DefaultHasher, fmt, hash::Hash};

use svg::node::{Children, Node, NodeDefaultHash, Value};

use traceflow_core::escape::escape_attr;

/// A `<g>` whose attributes are escaped once, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DataGroup {
    attributes: Vec<(String, String)>,
    children: Children,
}

impl DataGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets attribute `name`, escaping `value` for a double-quoted attribute.
    pub fn set(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.assign(name, value.to_string());
        self
    }

    pub fn add<T>(mut self, node: T) -> Self
    where
        T: Into<Box<dyn Node>>,
    {
        self.append(node);
        self
    }
}

impl fmt::Display for DataGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<g")?;
        for (name, value) in &self.attributes {
            write!(f, r#" {name}="{value}""#)?;
        }
        if self.children.is_empty() {
            return write!(f, "/>");
        }
        write!(f, ">")?;
        let mut bare = false;
        for child in &self.children {
            bare = child.is_bare() && !f.alternate();
            if !bare {
                writeln!(f)?;
            }
            write!(f, "{child}")?;
        }
        if !bare {
            writeln!(f)?;
        }
        write!(f, "</g>")
    }
}

impl Node for DataGroup {
    fn append<T>(&mut self, node: T)
    where
        T: Into<Box<dyn Node>>,
    {
        self.children.push(node.into());
    }

    fn assign<T, U>(&mut self, name: T, value: U)
    where
        T: Into<String>,
        U: Into<Value>,
    {
        let name = name.into();
        let value: Value = value.into();
        let value = escape_attr(&value).into_owned();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    fn get_name(&self) -> &str {
        "g"
    }

    fn get_children(&self) -> Option<&Children> {
        Some(&self.children)
    }

    fn get_children_mut(&mut self) -> Option<&mut Children> {
        Some(&mut self.children)
    }
}

impl NodeDefaultHash for DataGroup {
    fn default_hash(&self, state: &mut DefaultHasher) {
        "g".hash(state);
        self.attributes.hash(state);
        self.children
            .iter()
            .for_each(|child| child.default_hash(state));
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_attribute_values_are_escaped_once() {
        let markup = DataGroup::new()
            .set("data-id", "a&b")
            .set("data-note", "x\r\ny\tz")
            .set("data-quote", "it's \"q\" <p>")
            .to_string();

        assert_eq!(
            markup,
            "<g data-id=\"a&amp;b\" data-note=\"x&#xD;&#xA;y&#x9;z\" \
             data-quote=\"it&#x27;s &quot;q&quot; &lt;p&gt;\"/>"
        );
        assert!(!markup.contains("&amp;amp;"));
    }

    #[test]
    fn test_set_replaces_value_in_place() {
        let markup = DataGroup::new()
            .set("class", "trace-node")
            .set("opacity", 0.6)
            .set("class", "trace-edge")
            .to_string();
        assert_eq!(markup, "<g class=\"trace-edge\" opacity=\"0.6\"/>");
    }

    #[test]
    fn test_children_are_nested() {
        let group = DataGroup::new()
            .set("class", "outer")
            .add(svg_element::Rectangle::new().set("width", 10));
        assert_eq!(group.get_children().map(Vec::len), Some(1));
        assert_eq!(
            group.to_string(),
            "<g class=\"outer\">\n<rect width=\"10\"/>\n</g>"
        );
    }
}
