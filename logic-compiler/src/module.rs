use crate::errors::Result;
use indexmap::IndexSet;
use logic_syntax::ast::{Declaration, DeclarationStatement, Program, Statement};
use logic_syntax::NodeId;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Looks libraries up by name.
///
/// Loaders are expected to be deterministic: the same name always yields
/// structurally equal programs.
pub trait Loader {
    fn load(&mut self, name: &str) -> Result<Option<Program>>;
}

impl<F> Loader for F
where
    F: FnMut(&str) -> Result<Option<Program>>,
{
    fn load(&mut self, name: &str) -> Result<Option<Program>> {
        self(name)
    }
}

/// A loader memoizing another by library name, evicting the least
/// recently used libraries beyond its capacity.
pub struct CachedLoader<L> {
    inner: L,
    cache: LruCache<String, Option<Program>>,
}

impl<L> CachedLoader<L> {
    pub fn new(inner: L, capacity: NonZeroUsize) -> Self {
        CachedLoader {
            inner,
            cache: LruCache::new(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<L: Loader> Loader for CachedLoader<L> {
    fn load(&mut self, name: &str) -> Result<Option<Program>> {
        if let Some(program) = self.cache.get(name) {
            return Ok(program.clone());
        }
        let program = self.inner.load(name)?;
        self.cache.put(name.to_owned(), program.clone());
        Ok(program)
    }
}

/// A program with its imports spliced in.
#[derive(Clone, Debug)]
pub struct Expansion {
    pub program: Program,
    /// Libraries expanded, in import order.
    pub libraries: IndexSet<String>,
    /// Libraries the loader could not find, with the importing declaration.
    pub missing: Vec<(String, NodeId)>,
    /// Statements that come from libraries.
    pub imported: IndexSet<NodeId>,
}

/// Expands the imports of a program.
///
/// The statements of each imported library are inserted right after the
/// import declaration, recursively. Each library is expanded at most once,
/// which also cuts import cycles.
pub fn expand_imports<L: Loader>(program: Program, loader: &mut L) -> Result<Expansion> {
    let mut expansion = Expansion {
        program: Program {
            id: program.id,
            block: Vec::new(),
        },
        libraries: IndexSet::new(),
        missing: Vec::new(),
        imported: IndexSet::new(),
    };
    let block = expand_block(program.block, loader, &mut expansion, false)?;
    expansion.program.block = block;
    Ok(expansion)
}

fn expand_block<L: Loader>(
    block: Vec<Statement>,
    loader: &mut L,
    expansion: &mut Expansion,
    from_library: bool,
) -> Result<Vec<Statement>> {
    let mut statements = Vec::with_capacity(block.len());
    for stmt in block {
        let import = match &stmt {
            Statement::Declaration(DeclarationStatement {
                content: Declaration::ImportDeclaration(i),
                ..
            }) => Some((i.name.name.clone(), i.id.clone())),
            _ => None,
        };
        if from_library {
            expansion.imported.insert(stmt.id().clone());
        }
        statements.push(stmt);

        let Some((name, id)) = import else { continue };
        if !expansion.libraries.insert(name.clone()) {
            continue;
        }
        match loader.load(&name)? {
            Some(library) => {
                log::debug!("expanding library {name}");
                let expanded = expand_block(library.block, loader, expansion, true)?;
                statements.extend(expanded);
            }
            None => {
                log::warn!("library {name} not found");
                expansion.libraries.shift_remove(&name);
                expansion.missing.push((name, id));
            }
        }
    }
    Ok(statements)
}
