pub mod color;
pub mod compile;
pub mod env;
pub mod errors;
pub mod eval;
pub mod inference;
pub mod module;
pub mod scope;
pub mod stdlib;
pub mod value;

#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod scope_tests;
#[cfg(test)]
mod stdlib_tests;

pub use crate::compile::{analyze, Analysis};
pub use crate::errors::{Error, Kind, Result};
pub use crate::module::{CachedLoader, Loader};
pub use crate::stdlib::BuiltinLoader;
