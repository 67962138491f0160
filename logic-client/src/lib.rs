pub mod cli;
pub mod config;
pub mod preview;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod loader_tests;

use logic_compiler::errors::{Error, Kind, Result};
use logic_compiler::{BuiltinLoader, CachedLoader, Loader};
use logic_syntax::ast::{Document, Program};
use logic_syntax::ids::SequentialIds;
use logic_syntax::raw::{make, RawNode};
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// The file extension of Logic libraries.
pub const LIBRARY_EXTENSION: &str = "logic";

const CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// Loads `<name>.logic` libraries from a directory, falling back on the
/// built-in libraries.
#[derive(Debug, Default)]
pub struct DirectoryLoader {
    root: Option<PathBuf>,
}

impl DirectoryLoader {
    pub fn new(root: Option<PathBuf>) -> Self {
        DirectoryLoader { root }
    }

    fn path(&self, name: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        let path = root.join(name).with_extension(LIBRARY_EXTENSION);
        path.is_file().then_some(path)
    }
}

impl Loader for DirectoryLoader {
    fn load(&mut self, name: &str) -> Result<Option<Program>> {
        let Some(path) = self.path(name) else {
            return BuiltinLoader.load(name);
        };
        log::info!("loading library {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|e| {
            Error::new(Kind::ImportFailed, &format!("cannot read library {name}")).with(&e.to_string())
        })?;
        Ok(Some(parse_library(name, &text)?.into_program()))
    }
}

/// A directory loader remembering the libraries it loaded.
pub fn loader(libraries: Option<PathBuf>) -> CachedLoader<DirectoryLoader> {
    CachedLoader::new(DirectoryLoader::new(libraries), CACHE_CAPACITY)
}

/// The encodings a document may arrive in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Compact,
    Xml,
}

impl Format {
    /// Tells the formats apart by their first token and, for JSON text, by
    /// the top-level `type`.
    pub fn detect(text: &str) -> Self {
        if text.trim_start().starts_with('<') {
            return Format::Xml;
        }
        let top = serde_json::from_str::<serde_json::Value>(text).ok();
        match top.as_ref().and_then(|v| v.get("type")).and_then(|t| t.as_str()) {
            Some("Program" | "Declarations") => Format::Compact,
            _ => Format::Json,
        }
    }
}

/// Parses a document in Logic JSON, the compact format or XML. Nodes of the
/// compact and XML forms are numbered in document order.
pub fn parse_document(text: &str) -> Result<Document> {
    parse_numbered(text, "n")
}

/// Parses a library, numbering its nodes apart from the program's.
pub fn parse_library(name: &str, text: &str) -> Result<Document> {
    parse_numbered(text, &format!("{name}-"))
}

fn parse_numbered(text: &str, prefix: &str) -> Result<Document> {
    let format = Format::detect(text);
    log::debug!("parsing a {format:?} document");
    let mut ids = SequentialIds::new(prefix);
    let doc = match format {
        Format::Json => logic_syntax::json::from_str(text)?,
        Format::Compact => make(&RawNode::parse(text)?, &mut ids)?,
        Format::Xml => logic_syntax::xml::from_str(text, &mut ids)?,
    };
    Ok(doc)
}

/// Reads the file at the given path, or the standard input.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => Ok(std::fs::read_to_string(p)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Writes to the file at the given path, or the standard output.
pub fn write_output(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match path {
        Some(p) => Ok(std::fs::write(p, text)?),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}
