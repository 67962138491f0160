use crate::env::Env;
use crate::scope::resolve;
use crate::tests::{declaration_named, identifiers_named, initializer_of, program_from};
use logic_syntax::ast::{Declaration, EnumerationCase, FunctionParameter, Statement};
use logic_syntax::traverse::{descendants, NodeRef};
use logic_syntax::NodeId;

#[test]
fn environment_scopes() {
    let mut e = Env::new();
    let outer = NodeId::from("outer");
    let inner = NodeId::from("inner");

    assert_eq!(e.lookup("a"), None);
    e.declare("a".to_owned(), outer.clone());
    assert_eq!(e.lookup("a"), Some(&outer));

    e.open();
    assert_eq!(e.lookup("a"), Some(&outer));
    e.declare("a".to_owned(), inner.clone());
    assert_eq!(e.lookup("a"), Some(&inner));
    e.close();

    assert_eq!(e.lookup("a"), Some(&outer));
}

#[test]
fn parameters_shadow_globals() -> anyhow::Result<()> {
    let program = program_from(
        r#"{ "type": "Program", "children": [
            { "type": "Variable", "name": "x", "annotation": "Number", "value": 1 },
            { "type": "Function", "name": "f", "returnType": "Number", "children": [
                { "type": "Parameter", "name": "x", "annotation": "Number" },
                { "type": "Return", "children": [
                    { "type": "IdentifierExpression", "name": "x" }
                ] }
            ] },
            { "type": "Variable", "name": "y", "children": [
                { "type": "IdentifierExpression", "name": "x" }
            ] }
        ] }"#,
    )?;
    let ctx = resolve(&program);

    let global = declaration_named(&program, "x");
    let uses = identifiers_named(&program, "x");
    assert_eq!(uses.len(), 2);

    let param = ctx.identifier_to_declaration.get(&uses[0]).cloned();
    assert!(param.is_some());
    assert_ne!(param, Some(global.clone()));
    assert_eq!(ctx.identifier_to_declaration.get(&uses[1]), Some(&global));
    assert!(!ctx.has_unresolved());

    Ok(())
}

#[test]
fn locals_are_declared_after_their_initializer() -> anyhow::Result<()> {
    let program = program_from(
        r#"{ "type": "Program", "children": [
            { "type": "Variable", "name": "a", "annotation": "Number", "value": 1 },
            { "type": "Function", "name": "f", "returnType": "Number", "children": [
                { "type": "Variable", "name": "a", "children": [
                    { "type": "IdentifierExpression", "name": "a" }
                ] },
                { "type": "Return", "children": [
                    { "type": "IdentifierExpression", "name": "a" }
                ] }
            ] }
        ] }"#,
    )?;
    let ctx = resolve(&program);

    let global = declaration_named(&program, "a");
    let uses = identifiers_named(&program, "a");
    assert_eq!(ctx.identifier_to_declaration.get(&uses[0]), Some(&global));
    let local = ctx.identifier_to_declaration.get(&uses[1]);
    assert!(local.is_some());
    assert_ne!(local, Some(&global));

    Ok(())
}

#[test]
fn undefined_identifiers() -> anyhow::Result<()> {
    let program = program_from(
        r#"{ "type": "Program", "children": [
            { "type": "Variable", "name": "y", "children": [
                { "type": "IdentifierExpression", "name": "z" }
            ] }
        ] }"#,
    )?;
    let ctx = resolve(&program);

    assert_eq!(ctx.undefined_identifiers.len(), 1);
    assert!(ctx.undefined_identifiers.contains(&identifiers_named(&program, "z")[0]));
    assert!(ctx.has_unresolved());

    Ok(())
}

#[test]
fn namespace_members() -> anyhow::Result<()> {
    let program = program_from(
        r##"{ "type": "Program", "children": [
            { "type": "Namespace", "name": "Colors", "children": [
                { "type": "Variable", "name": "primary", "annotation": "Color", "value": "#FF0000" },
                { "type": "Variable", "name": "accent", "children": [
                    { "type": "IdentifierExpression", "name": "primary" }
                ] }
            ] },
            { "type": "Variable", "name": "c", "children": [
                { "type": "MemberExpression", "name": "primary", "children": [
                    { "type": "IdentifierExpression", "name": "Colors" }
                ] }
            ] },
            { "type": "Variable", "name": "d", "children": [
                { "type": "MemberExpression", "name": "missing", "children": [
                    { "type": "IdentifierExpression", "name": "Colors" }
                ] }
            ] }
        ] }"##,
    )?;
    let ctx = resolve(&program);
    let primary = declaration_named(&program, "primary");

    assert_eq!(
        ctx.path_of(&primary),
        Some(&["Colors".to_owned(), "primary".to_owned()][..])
    );
    let nested = identifiers_named(&program, "primary")[0].clone();
    assert_eq!(ctx.identifier_to_declaration.get(&nested), Some(&primary));

    let member = initializer_of(&program, "c");
    assert_eq!(ctx.member_to_declaration.get(&member), Some(&primary));

    let missing = initializer_of(&program, "d");
    assert!(ctx.undefined_member_expressions.contains(&missing));
    assert_eq!(ctx.undefined_member_expressions.len(), 1);

    Ok(())
}

#[test]
fn record_fields_are_dynamic() -> anyhow::Result<()> {
    let program = program_from(
        r#"{ "type": "Program", "children": [
            { "type": "Function", "name": "make", "returnType": "Shadow" },
            { "type": "Variable", "name": "s", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "IdentifierExpression", "name": "make" }
                ] }
            ] },
            { "type": "Variable", "name": "blur", "children": [
                { "type": "MemberExpression", "name": "blur", "children": [
                    { "type": "IdentifierExpression", "name": "s" }
                ] }
            ] }
        ] }"#,
    )?;
    let ctx = resolve(&program);

    let member = initializer_of(&program, "blur");
    assert!(ctx.dynamic_members.contains(&member));
    let head = identifiers_named(&program, "s")[0].clone();
    assert_eq!(
        ctx.identifier_to_declaration.get(&head),
        Some(&declaration_named(&program, "s"))
    );
    assert!(!ctx.has_unresolved());

    Ok(())
}

#[test]
fn shadowing_across_three_levels() -> anyhow::Result<()> {
    let program = program_from(
        r#"{ "type": "Program", "children": [
            { "type": "Variable", "name": "x", "annotation": "Number", "value": 1 },
            { "type": "Function", "name": "f", "returnType": "Number", "children": [
                { "type": "Parameter", "name": "x", "annotation": "Number" },
                { "type": "Function", "name": "g", "returnType": "Number", "children": [
                    { "type": "Parameter", "name": "x", "annotation": "Number" },
                    { "type": "Return", "children": [
                        { "type": "IdentifierExpression", "name": "x" }
                    ] }
                ] },
                { "type": "Branch", "children": [
                    { "type": "Literal", "annotation": "Boolean", "value": true },
                    { "type": "Variable", "name": "x", "annotation": "Number", "value": 2 },
                    { "type": "Return", "children": [
                        { "type": "IdentifierExpression", "name": "x" }
                    ] }
                ] },
                { "type": "Return", "children": [
                    { "type": "IdentifierExpression", "name": "x" }
                ] }
            ] },
            { "type": "Variable", "name": "y", "children": [
                { "type": "IdentifierExpression", "name": "x" }
            ] }
        ] }"#,
    )?;
    let ctx = resolve(&program);

    let variables: Vec<NodeId> = descendants(NodeRef::Program(&program))
        .into_iter()
        .filter_map(|n| match n {
            NodeRef::Declaration(Declaration::Variable(v)) if v.name.name == "x" => Some(v.id.clone()),
            _ => None,
        })
        .collect();
    let parameters: Vec<NodeId> = descendants(NodeRef::Program(&program))
        .into_iter()
        .filter_map(|n| match n {
            NodeRef::Parameter(FunctionParameter::Parameter(p)) => Some(p.id.clone()),
            _ => None,
        })
        .collect();
    let [global, branch_local] = variables.as_slice() else { panic!("expected two variables") };
    let [f_param, g_param] = parameters.as_slice() else { panic!("expected two parameters") };

    let targets: Vec<_> = identifiers_named(&program, "x")
        .iter()
        .map(|use_| ctx.identifier_to_declaration.get(use_).cloned())
        .collect();
    assert_eq!(
        targets,
        vec![
            Some(g_param.clone()),
            Some(branch_local.clone()),
            Some(f_param.clone()),
            Some(global.clone()),
        ]
    );
    assert!(!ctx.has_unresolved());

    Ok(())
}

#[test]
fn records_enumerations_and_loops() -> anyhow::Result<()> {
    let program = program_from(
        r#"{ "type": "Program", "children": [
            { "type": "Record", "name": "Point", "children": [
                { "type": "Variable", "name": "px", "annotation": "Number", "children": [
                    { "type": "IdentifierExpression", "name": "origin" }
                ] }
            ] },
            { "type": "Variable", "name": "origin", "annotation": "Number", "value": 0 },
            { "type": "Enumeration", "name": "Size", "children": [
                { "type": "Case", "name": "small" }
            ] },
            { "type": "Variable", "name": "s", "children": [
                { "type": "MemberExpression", "name": "small", "children": [
                    { "type": "IdentifierExpression", "name": "Size" }
                ] }
            ] },
            { "type": "Variable", "name": "p", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "IdentifierExpression", "name": "Point" }
                ] }
            ] },
            { "type": "Loop", "pattern": "item", "children": [
                { "type": "IdentifierExpression", "name": "items" },
                { "type": "ExpressionStatement", "children": [
                    { "type": "IdentifierExpression", "name": "item" }
                ] }
            ] },
            { "type": "Variable", "name": "after", "children": [
                { "type": "IdentifierExpression", "name": "item" }
            ] }
        ] }"#,
    )?;
    let ctx = resolve(&program);

    let small = descendants(NodeRef::Program(&program))
        .into_iter()
        .find_map(|n| match n {
            NodeRef::Case(EnumerationCase::EnumerationCase(c)) => Some(c.id.clone()),
            _ => None,
        })
        .expect("a case");
    assert_eq!(
        ctx.path_of(&small),
        Some(&["Size".to_owned(), "small".to_owned()][..])
    );
    assert_eq!(ctx.member_to_declaration.get(&initializer_of(&program, "s")), Some(&small));

    let point = declaration_named(&program, "Point");
    assert_eq!(
        ctx.identifier_to_declaration.get(&identifiers_named(&program, "Point")[0]),
        Some(&point)
    );
    assert!(ctx.namespace.get(&vec!["px".to_owned()]).is_none());
    assert_eq!(
        ctx.identifier_to_declaration.get(&identifiers_named(&program, "origin")[0]),
        Some(&declaration_named(&program, "origin"))
    );

    let Some(Statement::Loop(l)) = program.block.get(5) else { panic!("expected a loop") };
    let uses = identifiers_named(&program, "item");
    assert_eq!(ctx.identifier_to_declaration.get(&uses[0]), Some(&l.pattern.id));
    assert!(ctx.undefined_identifiers.contains(&uses[1]));
    assert!(ctx.undefined_identifiers.contains(&identifiers_named(&program, "items")[0]));

    Ok(())
}
