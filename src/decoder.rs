//! Structured-text decoding for manifest files
//!
//! XML is turned into a [`serde_json::Value`] tree so that every dialect,
//! XML or JSON, is walked with the same accessors:
//!
//! - the document decodes to `{ "<root>": <element> }`
//! - an element with neither attributes nor child elements becomes its
//!   trimmed text (`""` when empty)
//! - any other element becomes an object holding its attributes under
//!   `"$"`, its trimmed text under `"_"` and each child element name mapped
//!   to an array of children in document order

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Key holding an element's attributes
pub const ATTRIBUTES_KEY: &str = "$";
/// Key holding an element's text when it also has attributes or children
pub const TEXT_KEY: &str = "_";

/// Deepest element nesting accepted, in line with `serde_json`'s recursion limit
pub const MAX_DEPTH: usize = 256;

const BOM: char = '\u{feff}';

/// Decode XML text into a nested value tree.
///
/// Fails with [`Error::InvalidUserInput`] when the text is not well-formed.
pub fn decode_xml(content: &str) -> Result<Value> {
    let mut reader = Reader::from_str(content.trim_start_matches(BOM));
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event().map_err(Error::invalid_xml)? {
            Event::Start(start) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(Error::invalid_xml(format!(
                        "element nesting exceeds {MAX_DEPTH} levels"
                    )));
                }
                stack.push(Element::open(&start)?);
            }
            Event::Empty(start) => {
                let element = Element::open(&start)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::invalid_xml("closing tag without matching opening tag"))?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let raw = utf8(&text)?;
                match stack.last_mut() {
                    Some(current) => {
                        current.text.push_str(&unescape(raw).map_err(Error::invalid_xml)?)
                    }
                    None if raw.trim().is_empty() => {}
                    None => return Err(Error::invalid_xml("text outside of the root element")),
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(utf8(&data)?);
                }
            }
            Event::GeneralRef(reference) => {
                let entity = format!("&{};", utf8(&reference)?);
                let resolved = unescape(&entity).map_err(Error::invalid_xml)?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = stack.last() {
        return Err(Error::invalid_xml(format!(
            "unclosed element <{}>",
            unclosed.name
        )));
    }

    root.ok_or_else(|| Error::invalid_xml("document has no root element"))
}

/// Decode JSON text, keeping object keys in document order.
pub fn decode_json(content: &str) -> Result<Value> {
    serde_json::from_str(content.trim_start_matches(BOM)).map_err(Error::invalid_json)
}

/// An element that has been opened but not yet closed.
struct Element {
    name: String,
    attributes: Map<String, Value>,
    children: IndexMap<String, Vec<Value>>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = utf8(start.name().as_ref())?.to_string();
        let mut attributes = Map::new();

        for attribute in start.attributes() {
            let attribute = attribute.map_err(Error::invalid_xml)?;
            let key = utf8(attribute.key.as_ref())?.to_string();
            let value = unescape(utf8(&attribute.value)?).map_err(Error::invalid_xml)?;
            attributes.insert(key, Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            children: IndexMap::new(),
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let text = self.text.trim();

        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(text.to_string()));
        }

        let mut object = Map::new();
        if !self.attributes.is_empty() {
            object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        if !text.is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        for (child, values) in self.children {
            object.insert(child, Value::Array(values));
        }

        (self.name, Value::Object(object))
    }
}

/// Hand a closed element to its parent, or make it the document root.
fn attach(element: Element, stack: &mut [Element], root: &mut Option<Value>) -> Result<()> {
    let (name, value) = element.close();

    if let Some(parent) = stack.last_mut() {
        parent.children.entry(name).or_default().push(value);
        return Ok(());
    }

    if root.is_some() {
        return Err(Error::invalid_xml("multiple root elements"));
    }

    let mut document = Map::new();
    document.insert(name, value);
    *root = Some(Value::Object(document));
    Ok(())
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(Error::invalid_xml)
}
