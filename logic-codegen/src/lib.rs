pub mod compile;
pub mod emit;
pub mod js;
pub mod layout;
pub mod names;
pub mod react;
pub mod style;
pub mod swift;
pub mod target;
pub mod theme;
pub mod uikit;

#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod component_tests;
#[cfg(test)]
mod names_tests;
#[cfg(test)]
mod tests;

pub use crate::compile::{compile, serialize, GenerationOutput, OutputKind, Request};
pub use crate::target::{Framework, Language, Output, Target};
