//! Generic attribute/element tree built from the music database XML.
//!
//! Conventions:
//! - every attribute is stored under `-name`;
//! - a leaf element without attributes is a plain [`TreeValue::Text`];
//! - a leaf element with attributes is a [`Record`] holding its text under `#text`;
//! - sibling elements sharing a name collapse into a [`TreeValue::List`].

use indexmap::IndexMap;
use std::str::FromStr;
use thiserror::Error;

pub const TEXT_KEY: &str = "#text";
pub const ATTRIBUTE_PREFIX: char = '-';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("missing field `{0}`")]
    Missing(String),

    #[error("field `{field}` is not {expected}")]
    Shape {
        field: String,
        expected: &'static str,
    },

    #[error("field `{field}` has invalid value {value:?}")]
    Invalid { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    Text(String),
    Record(Record),
    List(Vec<TreeValue>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: IndexMap<String, TreeValue>,
}

impl TreeValue {
    /// Parses an XML document into a tree rooted at a single-entry record
    /// keyed by the root element name.
    pub fn parse_document(xml: &str) -> Result<Record, roxmltree::Error> {
        let document = roxmltree::Document::parse(xml)?;
        let root = document.root_element();
        let mut record = Record::default();
        record.push(root.tag_name().name(), TreeValue::from_element(root));
        Ok(record)
    }

    fn from_element(node: roxmltree::Node) -> TreeValue {
        let text: String = node
            .children()
            .filter(|child| child.is_text())
            .filter_map(|child| child.text())
            .collect();
        let text = text.trim();
        let has_attributes = node.attributes().next().is_some();
        let has_children = node.children().any(|child| child.is_element());

        if !has_attributes && !has_children {
            return TreeValue::Text(text.to_owned());
        }

        let mut record = Record::default();
        for attribute in node.attributes() {
            record.push(
                &format!("{ATTRIBUTE_PREFIX}{}", attribute.name()),
                TreeValue::Text(attribute.value().to_owned()),
            );
        }
        for child in node.children().filter(|child| child.is_element()) {
            record.push(child.tag_name().name(), TreeValue::from_element(child));
        }
        if !has_children || !text.is_empty() {
            record.push(TEXT_KEY, TreeValue::Text(text.to_owned()));
        }
        TreeValue::Record(record)
    }

    /// Views a repeated element as a list of records. A single occurrence
    /// is a one-element list.
    pub fn as_records(&self, field: &str) -> Result<Vec<&Record>, ExtractError> {
        let shape_error = || ExtractError::Shape {
            field: field.to_owned(),
            expected: "a record or list of records",
        };
        match self {
            TreeValue::Record(record) => Ok(vec![record]),
            TreeValue::List(items) => items
                .iter()
                .map(|item| match item {
                    TreeValue::Record(record) => Ok(record),
                    _ => Err(shape_error()),
                })
                .collect(),
            TreeValue::Text(_) => Err(shape_error()),
        }
    }
}

impl Record {
    fn push(&mut self, key: &str, value: TreeValue) {
        match self.fields.get_mut(key) {
            None => {
                self.fields.insert(key.to_owned(), value);
            }
            Some(TreeValue::List(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, TreeValue::List(Vec::new()));
                *existing = TreeValue::List(vec![first, value]);
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<&TreeValue, ExtractError> {
        self.fields
            .get(key)
            .ok_or_else(|| ExtractError::Missing(key.to_owned()))
    }

    pub fn record(&self, key: &str) -> Result<&Record, ExtractError> {
        match self.get(key)? {
            TreeValue::Record(record) => Ok(record),
            _ => Err(ExtractError::Shape {
                field: key.to_owned(),
                expected: "a record",
            }),
        }
    }

    /// Text of a plain leaf element.
    pub fn text(&self, key: &str) -> Result<&str, ExtractError> {
        match self.get(key)? {
            TreeValue::Text(text) => Ok(text),
            _ => Err(ExtractError::Shape {
                field: key.to_owned(),
                expected: "plain text",
            }),
        }
    }

    /// Value of an attribute, addressed without its `-` prefix.
    pub fn attribute(&self, name: &str) -> Result<&str, ExtractError> {
        self.text(&format!("{ATTRIBUTE_PREFIX}{name}"))
    }

    /// Text of a leaf element carrying attributes, read from its `#text`.
    pub fn typed_text(&self, key: &str) -> Result<&str, ExtractError> {
        let shape_error = || ExtractError::Shape {
            field: key.to_owned(),
            expected: "a typed value",
        };
        match self.get(key)? {
            TreeValue::Record(record) => record.text(TEXT_KEY).map_err(|_| shape_error()),
            _ => Err(shape_error()),
        }
    }

    pub fn parse_typed<T: FromStr>(&self, key: &str) -> Result<T, ExtractError> {
        let raw = self.typed_text(key)?;
        raw.parse().map_err(|_| ExtractError::Invalid {
            field: key.to_owned(),
            value: raw.to_owned(),
        })
    }
}
