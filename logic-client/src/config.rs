use clap::Parser as ClapParser;
use logic_codegen::Target;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Re-serialize the document as canonical Logic JSON
    Ast,
    /// Translate a Logic program
    Logic,
    /// Generate a component
    Component,
}

/// Compiles Logic programs and components into UI framework sources.
#[derive(ClapParser, Debug)]
#[command(name = "lonac")]
struct Args {
    /// What to generate
    #[arg(value_enum)]
    mode: Mode,

    /// The path to the input document, standard input if omitted
    input: Option<PathBuf>,

    /// The target language
    #[arg(short = 't', long)]
    target: Option<String>,

    /// The target framework
    #[arg(short = 'f', long)]
    framework: Option<String>,

    /// The directory holding the libraries to import
    #[arg(short = 'l', long)]
    libraries: Option<PathBuf>,

    /// The Logic program providing theme tokens to a component
    #[arg(short = 'p', long)]
    program: Option<PathBuf>,

    /// The path to the generated file, standard output if omitted
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// The path to the configuration file
    #[arg(short = 'c', long = "conf")]
    config: Option<PathBuf>,

    /// Increase message verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all output
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Deserialize, Default, Debug)]
struct File {
    #[serde(default)]
    compile: Compile,
}

#[derive(Deserialize, Default, Debug)]
struct Compile {
    target: Option<String>,
    framework: Option<String>,
    libraries: Option<PathBuf>,
    program: Option<PathBuf>,
}

/// Command line arguments, completed by the configuration file.
#[derive(Debug)]
pub struct Config {
    args: Args,
    file: File,
    /// The directory file paths of the configuration are relative to.
    root: PathBuf,
}

impl Config {
    pub fn new() -> anyhow::Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn parse_from<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::from_args(Args::try_parse_from(args)?)
    }

    fn from_args(args: Args) -> anyhow::Result<Self> {
        let (root, file) = match &args.config {
            Some(path) => {
                let cfg = std::fs::read_to_string(path)?;
                let file = toml::from_str::<File>(&cfg)?;
                let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                (root, file)
            }
            None => (PathBuf::new(), File::default()),
        };
        Ok(Config { args, file, root })
    }

    #[cfg(test)]
    pub(crate) fn with_file(args: &[&str], toml: &str) -> anyhow::Result<Self> {
        let args = Args::try_parse_from(args)?;
        let file = toml::from_str::<File>(toml)?;
        Ok(Config {
            args,
            file,
            root: PathBuf::from("conf"),
        })
    }

    pub fn mode(&self) -> Mode {
        self.args.mode
    }

    pub fn input(&self) -> Option<&Path> {
        self.args.input.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.args.output.as_deref()
    }

    /// The compilation target, `js` for React DOM unless configured.
    pub fn target(&self) -> anyhow::Result<Target> {
        let language = self
            .args
            .target
            .as_ref()
            .or(self.file.compile.target.as_ref())
            .map_or("js", String::as_str);
        let framework = self
            .args
            .framework
            .as_ref()
            .or(self.file.compile.framework.as_ref());
        Ok(Target::parse(language, framework.map(String::as_str))?)
    }

    pub fn libraries(&self) -> Option<PathBuf> {
        match (&self.args.libraries, &self.file.compile.libraries) {
            (Some(p), _) => Some(p.clone()),
            (None, Some(p)) => Some(self.root.join(p)),
            (None, None) => None,
        }
    }

    pub fn program(&self) -> Option<PathBuf> {
        match (&self.args.program, &self.file.compile.program) {
            (Some(p), _) => Some(p.clone()),
            (None, Some(p)) => Some(self.root.join(p)),
            (None, None) => None,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    pub fn verbosity(&self) -> usize {
        self.args.verbose as usize
    }
}
