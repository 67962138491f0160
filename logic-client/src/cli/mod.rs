use crate::config::{Config, Mode};
use crate::{loader, parse_document, read_input, DirectoryLoader};
use anyhow::anyhow;
use logic_codegen::{compile, GenerationOutput, Output, Request};
use logic_compiler::CachedLoader;
use logic_syntax::ast::{Document, Program};
use logic_syntax::component::Component;
use logic_syntax::NodeId;

/// The CLI compilation processor.
pub struct Processor {
    loader: CachedLoader<DirectoryLoader>,
}

impl Processor {
    pub fn new(config: &Config) -> Self {
        Processor {
            loader: loader(config.libraries()),
        }
    }

    /// Reports a diagnostic to the standard error output.
    pub fn report(&self, diagnostic: &logic_compiler::Error) {
        match diagnostic.details() {
            [] => eprintln!("warning: {diagnostic}"),
            details => eprintln!("warning: {diagnostic} {}", details.join(", ")),
        }
    }

    /// Runs the compilation the configuration asks for.
    pub fn run(&mut self, config: &Config) -> anyhow::Result<GenerationOutput> {
        let input = read_input(config.input())?;
        let (document, request) = match config.mode() {
            Mode::Ast => (
                parse_document(&input)?,
                Request {
                    output: Output::Json,
                    component: None,
                },
            ),
            Mode::Logic => (
                parse_document(&input)?,
                Request {
                    output: Output::Logic(config.target()?),
                    component: None,
                },
            ),
            Mode::Component => {
                let component = Component::parse(&input)?;
                let program = match config.program() {
                    Some(path) => parse_document(&std::fs::read_to_string(path)?)?,
                    None => Document::Program(Program {
                        id: NodeId::new("program"),
                        block: Vec::new(),
                    }),
                };
                (
                    program,
                    Request {
                        output: Output::Component(config.target()?),
                        component: Some(component),
                    },
                )
            }
        };

        match compile(document, &request, &mut self.loader) {
            Ok(output) => {
                if !config.is_quiet() {
                    output.diagnostics.iter().for_each(|d| self.report(d));
                }
                Ok(output)
            }
            Err(err) => {
                eprintln!("error: {err}");
                Err(anyhow!("compilation failed"))
            }
        }
    }
}
