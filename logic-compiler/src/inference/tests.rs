use crate::errors::Kind;
use crate::inference::ty::{Seq, Type};
use crate::inference::unify::{solve, unify};
use crate::inference::union::UnionFind;
use crate::inference::{constrain, UnificationContext};
use crate::scope::resolve;
use crate::tests::{declaration_named, initializer_of, program_from};
use logic_syntax::ast::Program;

fn constraints_of(code: &str) -> anyhow::Result<(Program, UnificationContext)> {
    let program = program_from(code)?;
    let scope = resolve(&program);
    let ctx = constrain(&program, &scope);
    Ok((program, ctx))
}

#[test]
fn union_prefers_concrete_types() {
    let mut sets = UnionFind::new();
    sets.union(Type::Var(1), Type::Var(0));
    sets.union(Type::Var(1), Type::number());

    assert_eq!(sets.find(&Type::Var(0)), Some((&Type::number(), true)));
    assert_eq!(sets.find(&Type::number()), Some((&Type::number(), false)));
}

#[test]
fn literals_against_annotations() -> anyhow::Result<()> {
    let (program, ctx) = constraints_of(
        r#"{ "type": "Program", "children": [
            { "type": "Variable", "name": "ok", "annotation": "Number", "value": 1 },
            { "type": "Variable", "name": "bad", "annotation": "Number", "children": [
                { "type": "Literal", "annotation": "String", "value": "one" }
            ] }
        ] }"#,
    )?;
    let failure = solve(&ctx).expect_err("expected a mismatch");

    assert_eq!(failure.errors.len(), 1);
    assert_eq!(failure.errors[0].kind(), Kind::Unification);
    assert_eq!(
        failure.errors[0].node(),
        Some(&declaration_named(&program, "bad"))
    );

    // The satisfiable part is still solved.
    let ok = ctx.pattern_types[&declaration_named(&program, "ok")].clone();
    assert_eq!(failure.partial.apply(&ok), Type::number());

    Ok(())
}

#[test]
fn generic_functions_are_instantiated_per_use() -> anyhow::Result<()> {
    let (program, ctx) = constraints_of(
        r#"{ "type": "Program", "children": [
            { "type": "Function", "name": "first", "generics": "T", "returnType": "T", "children": [
                { "type": "Parameter", "name": "items", "annotation": "Array(T)" }
            ] },
            { "type": "Variable", "name": "n", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "IdentifierExpression", "name": "first" },
                    { "type": "Argument", "children": [
                        { "type": "Literal", "annotation": "Array(Number)", "children": [
                            { "type": "Literal", "annotation": "Number", "value": 1 }
                        ] }
                    ] }
                ] }
            ] },
            { "type": "Variable", "name": "s", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "IdentifierExpression", "name": "first" },
                    { "type": "Argument", "children": [
                        { "type": "Literal", "annotation": "Array(String)", "children": [
                            { "type": "Literal", "annotation": "String", "value": "a" }
                        ] }
                    ] }
                ] }
            ] }
        ] }"#,
    )?;
    let substitution = solve(&ctx).map_err(|f| anyhow::anyhow!("{:?}", f.errors))?;

    let n = &ctx.pattern_types[&declaration_named(&program, "n")];
    let s = &ctx.pattern_types[&declaration_named(&program, "s")];
    assert_eq!(substitution.apply(n), Type::number());
    assert_eq!(substitution.apply(s), Type::string());

    let first = &ctx.pattern_types[&declaration_named(&program, "first")];
    assert_eq!(first.to_string(), "(items: Array<T>) -> T");

    Ok(())
}

#[test]
fn labelled_arguments_match_by_name() -> anyhow::Result<()> {
    let (program, ctx) = constraints_of(
        r#"{ "type": "Program", "children": [
            { "type": "Function", "name": "pair", "returnType": "Boolean", "children": [
                { "type": "Parameter", "name": "a", "annotation": "Number" },
                { "type": "Parameter", "name": "b", "annotation": "String" }
            ] },
            { "type": "Variable", "name": "good", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "IdentifierExpression", "name": "pair" },
                    { "type": "Argument", "label": "b", "children": [
                        { "type": "Literal", "annotation": "String", "value": "x" }
                    ] },
                    { "type": "Argument", "label": "a", "children": [
                        { "type": "Literal", "annotation": "Number", "value": 1 }
                    ] }
                ] }
            ] },
            { "type": "Variable", "name": "wrong", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "IdentifierExpression", "name": "pair" },
                    { "type": "Argument", "label": "a", "children": [
                        { "type": "Literal", "annotation": "String", "value": "x" }
                    ] }
                ] }
            ] }
        ] }"#,
    )?;
    let failure = solve(&ctx).expect_err("expected a mismatch");

    assert_eq!(failure.errors.len(), 1);
    let call = initializer_of(&program, "wrong");
    assert_eq!(failure.errors[0].node(), Some(&call));

    let good = &ctx.pattern_types[&declaration_named(&program, "good")];
    assert_eq!(failure.partial.apply(good), Type::boolean());

    Ok(())
}

#[test]
fn returns_match_the_declared_type() -> anyhow::Result<()> {
    let (_, ctx) = constraints_of(
        r#"{ "type": "Program", "children": [
            { "type": "Function", "name": "f", "returnType": "Number", "children": [
                { "type": "Return", "children": [
                    { "type": "Literal", "annotation": "String", "value": "no" }
                ] }
            ] }
        ] }"#,
    )?;
    let failure = solve(&ctx).expect_err("expected a mismatch");

    assert_eq!(failure.errors.len(), 1);
    assert!(failure.errors[0].node().is_some());

    Ok(())
}

#[test]
fn solution_ignores_constraint_order() -> anyhow::Result<()> {
    let (_, ctx) = constraints_of(
        r#"{ "type": "Program", "children": [
            { "type": "Variable", "name": "a", "children": [
                { "type": "IdentifierExpression", "name": "b" }
            ] },
            { "type": "Variable", "name": "b", "children": [
                { "type": "IdentifierExpression", "name": "c" }
            ] },
            { "type": "Variable", "name": "c", "children": [
                { "type": "Literal", "annotation": "Array(Number)", "children": [] }
            ] },
            { "type": "Variable", "name": "d", "children": [
                { "type": "BinaryExpression", "operator": "isEqualTo", "children": [
                    { "type": "IdentifierExpression", "name": "a" },
                    { "type": "IdentifierExpression", "name": "c" }
                ] }
            ] }
        ] }"#,
    )?;
    let forward = unify(&ctx.constraints);
    let mut reversed = ctx.constraints.clone();
    reversed.reverse();
    let backward = unify(&reversed);

    assert!(forward.errors.is_empty());
    assert!(backward.errors.is_empty());
    for t in ctx.nodes.values().chain(ctx.pattern_types.values()) {
        assert_eq!(
            forward.substitution.apply(t),
            backward.substitution.apply(t)
        );
    }
    assert_eq!(forward.substitution.resolved(), backward.substitution.resolved());

    Ok(())
}

#[test]
fn occurs_check() {
    let mut seq = Seq::new();
    let v = seq.fresh();
    let constraints = vec![crate::inference::Constraint {
        head: v.clone(),
        tail: Type::array(v),
        node: "node".into(),
    }];
    let unified = unify(&constraints);

    assert_eq!(unified.errors.len(), 1);
    assert_eq!(unified.errors[0].message(), "recursive type");
}

#[test]
fn records_and_cases_are_constructors() -> anyhow::Result<()> {
    let (program, ctx) = constraints_of(
        r#"{ "type": "Program", "children": [
            { "type": "Record", "name": "Point", "children": [
                { "type": "Variable", "name": "px", "annotation": "Number", "value": 0 },
                { "type": "Variable", "name": "py", "annotation": "Number" }
            ] },
            { "type": "Enumeration", "name": "Size", "children": [
                { "type": "Case", "name": "small" },
                { "type": "Case", "name": "custom", "associatedValueTypes": "Number, String" }
            ] },
            { "type": "Variable", "name": "p", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "IdentifierExpression", "name": "Point" },
                    { "type": "Argument", "label": "py", "children": [
                        { "type": "Literal", "annotation": "Number", "value": 1 }
                    ] }
                ] }
            ] },
            { "type": "Variable", "name": "bad", "children": [
                { "type": "FunctionCallExpression", "children": [
                    { "type": "IdentifierExpression", "name": "Point" },
                    { "type": "Argument", "label": "px", "children": [
                        { "type": "Literal", "annotation": "String", "value": "far" }
                    ] }
                ] }
            ] }
        ] }"#,
    )?;
    let failure = solve(&ctx).expect_err("expected a mismatch");

    let point = &ctx.pattern_types[&declaration_named(&program, "Point")];
    assert_eq!(point.to_string(), "(px: Number, py: Number) -> Point");
    assert_eq!(failure.errors.len(), 1);
    assert_eq!(failure.errors[0].node(), Some(&initializer_of(&program, "bad")));

    let p = &ctx.pattern_types[&declaration_named(&program, "p")];
    assert_eq!(failure.partial.apply(p), Type::constant("Point"));

    let cases: Vec<String> = ["small", "custom"]
        .iter()
        .map(|name| ctx.pattern_types[&case_named(&program, name)].to_string())
        .collect();
    assert_eq!(cases, vec!["Size".to_owned(), "(Number, String) -> Size".to_owned()]);

    Ok(())
}

fn case_named(program: &Program, name: &str) -> logic_syntax::NodeId {
    use logic_syntax::ast::EnumerationCase;
    use logic_syntax::traverse::{descendants, NodeRef};
    descendants(NodeRef::Program(program))
        .into_iter()
        .find_map(|n| match n {
            NodeRef::Case(EnumerationCase::EnumerationCase(c)) if c.name.name == name => Some(c.id.clone()),
            _ => None,
        })
        .expect("case not found")
}

#[test]
fn loop_patterns_take_the_element_type() -> anyhow::Result<()> {
    let (program, ctx) = constraints_of(
        r#"{ "type": "Program", "children": [
            { "type": "Variable", "name": "xs", "annotation": "Array(String)", "children": [
                { "type": "Literal", "annotation": "String", "value": "a" }
            ] },
            { "type": "Loop", "pattern": "item", "children": [
                { "type": "IdentifierExpression", "name": "xs" }
            ] }
        ] }"#,
    )?;
    let substitution = solve(&ctx).map_err(|f| anyhow::anyhow!("{:?}", f.errors))?;

    let Some(logic_syntax::ast::Statement::Loop(l)) = program.block.get(1) else {
        panic!("expected a loop")
    };
    assert_eq!(substitution.apply(&ctx.pattern_types[&l.pattern.id]), Type::string());

    Ok(())
}
