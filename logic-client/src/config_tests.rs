use crate::config::{Config, Mode};
use logic_codegen::{Framework, Language};
use std::path::PathBuf;

const FILE: &str = r#"
[compile]
target = "swift"
framework = "appkit"
libraries = "libs"
"#;

#[test]
fn command_line_wins() -> anyhow::Result<()> {
    let config = Config::with_file(
        &["lonac", "logic", "--target", "js", "--framework", "reactnative"],
        FILE,
    )?;
    let target = config.target()?;
    assert_eq!(target.language, Language::Js);
    assert_eq!(target.framework, Framework::ReactNative);
    assert_eq!(config.mode(), Mode::Logic);
    Ok(())
}

#[test]
fn file_fills_the_gaps() -> anyhow::Result<()> {
    let config = Config::with_file(&["lonac", "component", "card.json"], FILE)?;
    assert_eq!(config.target()?.framework, Framework::AppKit);
    assert_eq!(config.libraries(), Some(PathBuf::from("conf").join("libs")));
    assert_eq!(config.input(), Some(PathBuf::from("card.json").as_path()));
    assert_eq!(config.program(), None);
    Ok(())
}

#[test]
fn defaults_to_react_dom() -> anyhow::Result<()> {
    let config = Config::parse_from(["lonac", "ast", "-vv"])?;
    assert_eq!(config.target()?.framework, Framework::ReactDom);
    assert_eq!(config.verbosity(), 2);
    assert!(!config.is_quiet());
    Ok(())
}

#[test]
fn verbose_conflicts_with_quiet() {
    assert!(Config::parse_from(["lonac", "ast", "-v", "-q"]).is_err());
}
