use enum_map::{enum_map, Enum, EnumMap};
use logic_compiler::errors::{Error, Kind, Result};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enum)]
pub enum Language {
    Js,
    Swift,
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "js" | "javascript" => Ok(Language::Js),
            "swift" => Ok(Language::Swift),
            _ => Err(Error::new(Kind::InvalidTarget, "unknown language").with(&s)),
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Language::Js => "js",
            Language::Swift => "swift",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enum)]
pub enum Framework {
    ReactDom,
    ReactNative,
    UiKit,
    AppKit,
}

impl Framework {
    pub fn language(&self) -> Language {
        match self {
            Framework::ReactDom | Framework::ReactNative => Language::Js,
            Framework::UiKit | Framework::AppKit => Language::Swift,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::ReactDom => "reactdom",
            Framework::ReactNative => "reactnative",
            Framework::UiKit => "uikit",
            Framework::AppKit => "appkit",
        }
    }
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "reactdom" => Ok(Framework::ReactDom),
            "reactnative" => Ok(Framework::ReactNative),
            "uikit" => Ok(Framework::UiKit),
            "appkit" => Ok(Framework::AppKit),
            _ => Err(Error::new(Kind::InvalidTarget, "unknown framework").with(&s)),
        }
    }
}

impl Display for Framework {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a framework generator can express.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub vectors: bool,
    /// Dimensions are CSS lengths rather than plain numbers.
    pub css_units: bool,
    pub extension: &'static str,
}

pub fn capabilities() -> EnumMap<Framework, Capabilities> {
    enum_map! {
        Framework::ReactDom => Capabilities { vectors: true, css_units: true, extension: "js" },
        Framework::ReactNative => Capabilities { vectors: false, css_units: false, extension: "js" },
        Framework::UiKit => Capabilities { vectors: false, css_units: false, extension: "swift" },
        Framework::AppKit => Capabilities { vectors: false, css_units: false, extension: "swift" },
    }
}

/// A language and framework pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    pub language: Language,
    pub framework: Framework,
}

impl Target {
    pub fn new(language: Language, framework: Framework) -> Result<Self> {
        if framework.language() != language {
            return Err(Error::new(
                Kind::InvalidTarget,
                &format!("{framework} does not generate {language}"),
            ));
        }
        Ok(Target {
            language,
            framework,
        })
    }

    /// Parses a target, defaulting the framework for the language.
    pub fn parse(language: &str, framework: Option<&str>) -> Result<Self> {
        let language: Language = language.parse()?;
        let framework = match framework {
            Some(f) => f.parse()?,
            None => match language {
                Language::Js => Framework::ReactDom,
                Language::Swift => Framework::UiKit,
            },
        };
        Target::new(language, framework)
    }

    pub fn capabilities(&self) -> Capabilities {
        capabilities()[self.framework]
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.language, self.framework)
    }
}

/// The kind of text requested from the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    /// The document itself, as canonical Logic JSON.
    Json,
    /// The Logic program translated to a language.
    Logic(Target),
    /// A component, using the program for its theme.
    Component(Target),
}
