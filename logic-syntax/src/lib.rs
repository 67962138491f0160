pub mod ast;
pub mod builder;
pub mod component;
pub mod errors;
pub mod ids;
pub mod json;
pub mod raw;
pub mod traverse;
pub mod xml;

#[cfg(test)]
mod component_tests;
#[cfg(test)]
mod xml_tests;

pub use crate::ids::{IdGenerator, NodeId};
pub use crate::raw::make;
