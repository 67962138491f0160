use crate::names::{camel_case, pascal_case, path_key, NameGenerator};

#[test]
fn names_are_suffixed_in_order() {
    let mut names = NameGenerator::new();
    let given: Vec<String> = ["View", "View", "Text", "View", ""]
        .iter()
        .map(|base| names.name(base))
        .collect();
    assert_eq!(given, vec!["view", "view1", "text", "view2", "layer"]);
}

#[test]
fn user_names_are_camel_cased_and_deduplicated() {
    let mut names = NameGenerator::new();
    assert_eq!(names.name("Primary Button"), "primaryButton");
    assert_eq!(names.name("primary-button"), "primaryButton1");
    assert_eq!(camel_case("2 columns"), "_2Columns");
    assert_eq!(pascal_case("my card"), "MyCard");
}

#[test]
fn paths_become_keys() {
    assert_eq!(path_key(&["Colors", "primary"]), "colorsPrimary");
    assert_eq!(path_key(&["body"]), "body");
}
