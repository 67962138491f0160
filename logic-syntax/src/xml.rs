//! The Logic XML format.
//!
//! Elements mirror the compact format node for node: the element name is the
//! node kind and the attributes are the node attributes, except that type
//! annotations are written as `type`. Declarations nested in statement blocks
//! may carry a `Declaration.` prefix, e.g. `<Declaration.Variable>`.
//!
//! ```xml
//! <Declarations>
//!   <Record name="ThemedColor">
//!     <Variable name="light" type="Color"/>
//!     <Variable name="dark" type="Color"/>
//!   </Record>
//! </Declarations>
//! ```

use crate::ast::Document;
use crate::errors::{Error, Result};
use crate::ids::IdGenerator;
use crate::raw::{make, unmake, RawNode};
use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use serde_json::Value;

const DECLARATION_PREFIX: &str = "Declaration.";

fn xml_error(e: impl std::fmt::Display) -> Error {
    Error::Xml(e.to_string())
}

/// Parses a Logic XML document.
pub fn from_str(s: &str, ids: &mut dyn IdGenerator) -> Result<Document> {
    make(&parse(s)?, ids)
}

/// Parses XML markup into compact nodes.
pub fn parse(s: &str) -> Result<RawNode> {
    let mut reader = Reader::from_str(s);
    reader.config_mut().trim_text(true);

    let mut open: Vec<RawNode> = Vec::new();
    let mut root = None;
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => open.push(element(&e)?),
            Event::Empty(e) => attach(&mut open, &mut root, element(&e)?)?,
            Event::End(_) => {
                let node = open.pop().ok_or_else(|| xml_error("unexpected end tag"))?;
                attach(&mut open, &mut root, node)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !open.is_empty() {
        return Err(xml_error("unclosed element"));
    }
    root.ok_or_else(|| xml_error("no root element"))
}

fn attach(open: &mut [RawNode], root: &mut Option<RawNode>, node: RawNode) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(xml_error("more than one root element")),
    }
    Ok(())
}

fn element(e: &BytesStart) -> Result<RawNode> {
    let qname = e.name();
    let name = std::str::from_utf8(qname.as_ref()).map_err(xml_error)?;
    let kind = name.strip_prefix(DECLARATION_PREFIX).unwrap_or(name).to_owned();
    let mut attributes = IndexMap::new();
    for attribute in e.attributes() {
        let attribute = attribute.map_err(xml_error)?;
        let key = std::str::from_utf8(attribute.key.as_ref()).map_err(xml_error)?;
        let key = if key == "type" { "annotation" } else { key };
        let value = attribute.unescape_value().map_err(xml_error)?;
        attributes.insert(key.to_owned(), Value::String(value.into_owned()));
    }
    Ok(RawNode {
        kind,
        children: vec![],
        attributes,
    })
}

/// Prints a document as indented XML. Identifiers are not written.
pub fn to_string(doc: &Document) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
        .map_err(xml_error)?;
    write_node(&mut writer, &unmake(doc)?)?;
    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &RawNode) -> Result<()> {
    let mut start = BytesStart::new(node.kind.as_str());
    for key in node.attributes.keys() {
        if let Some(value) = node.text(key) {
            let key = if key == "annotation" { "type" } else { key.as_str() };
            start.push_attribute((key, value.as_str()));
        }
    }
    if node.children.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(xml_error)?;
        return Ok(());
    }
    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for child in node.children.iter() {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.kind.as_str())))
        .map_err(xml_error)?;
    Ok(())
}
