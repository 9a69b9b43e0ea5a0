mod common;

use common::{addition, value};
use descent::{Error, Grammar, GrammarError, Parser, Symbol, Value};
use pretty_assertions::assert_eq;

fn nested() -> Grammar {
    let mut nested = Grammar::new("nested");
    nested.expression("nested").rule([":operator"]);
    nested.expression("operator").rule(["+"]).rule(["-"]);
    nested
}

#[test]
fn it_resolves_qualified_references() {
    let mut grammar = Grammar::new("math");
    grammar.use_grammar(nested());
    grammar.expression("math").rule_map(
        [
            Symbol::pattern(r"\d+").unwrap(),
            ":nested:operator".into(),
            Symbol::pattern(r"\d+").unwrap(),
        ],
        addition,
    );

    let mut parser = Parser::new(&grammar);
    assert_eq!(parser.parse("1+2").unwrap(), Some(Value::Integer(3)));
}

#[test]
fn it_keeps_nested_lookups_in_the_imported_grammar() {
    // both grammars define `operator`; the importer's version must not leak in
    let mut grammar = Grammar::new("math");
    grammar.use_grammar(nested());
    grammar
        .expression("math")
        .rule_map([":nested:nested"], value);
    grammar.expression("operator").rule_map(["*"], |_| Value::from("importer"));

    let mut parser = Parser::new(&grammar);
    assert_eq!(parser.parse("+").unwrap(), Some(Value::from("+")));
    assert_eq!(parser.parse("*").unwrap(), None);
}

#[test]
fn it_returns_to_the_importer_after_a_qualified_match() {
    let mut grammar = Grammar::new("math");
    grammar.use_grammar(nested());
    grammar
        .expression("math")
        .rule_map([":digit", ":nested:nested", ":digit"], Value::List);
    grammar.expression("digit").rule([Symbol::pattern(r"\d").unwrap()]);

    let mut parser = Parser::new(&grammar);
    assert_eq!(
        parser.parse("4-2").unwrap(),
        Some(Value::List(vec![
            Value::from("4"),
            Value::from("-"),
            Value::from("2")
        ]))
    );
}

#[test]
fn it_reports_the_active_grammar_to_transforms() {
    let mut inner = Grammar::new("inner");
    inner
        .expression("word")
        .rule_with([":letter+"], |_, ctx| Value::from(ctx.grammar.name()));
    inner
        .expression("letter")
        .rule([Symbol::pattern("[a-z]").unwrap()]);

    let mut grammar = Grammar::new("outer");
    grammar.use_grammar(inner);
    grammar.expression("outer").rule_map([":inner:word"], value);

    let mut parser = Parser::new(&grammar);
    assert_eq!(parser.parse("abc").unwrap(), Some(Value::from("inner")));
}

#[test]
fn it_composes_quantifiers_with_qualified_references() {
    let mut grammar = Grammar::new("ops");
    grammar.use_grammar(nested());
    grammar.expression("ops").rule_map([":nested:operator*"], value);

    let mut parser = Parser::new(&grammar);
    assert_eq!(
        parser.parse("+-+x").unwrap(),
        Some(Value::List(vec![
            Value::from("+"),
            Value::from("-"),
            Value::from("+")
        ]))
    );
}

#[test]
fn it_aborts_on_unknown_sub_grammars() {
    let mut grammar = Grammar::new("math");
    grammar.expression("math").rule([":nested:operator"]).rule(["+"]);

    let mut parser = Parser::new(&grammar);
    let err = parser.parse("+").unwrap_err();
    assert!(matches!(
        err,
        Error::Grammar(GrammarError::UnknownGrammar { ref grammar, ref active, ref referenced_from })
            if grammar == "nested" && active == "math" && referenced_from == "math"
    ));
    assert!(err.to_string().contains("nested"));
}

#[test]
fn it_aborts_on_unknown_expressions_inside_imports() {
    let mut grammar = Grammar::new("math");
    grammar.use_grammar(nested());
    grammar.expression("math").rule([":nested:missing"]);

    let mut parser = Parser::new(&grammar);
    let err = parser.parse("+").unwrap_err();
    assert_eq!(
        err.as_grammar_error(),
        Some(&GrammarError::UnknownExpression {
            expression: "missing".to_string(),
            grammar: "nested".to_string(),
            referenced_from: "math".to_string(),
        })
    );
}

#[test]
fn it_shares_one_grammar_across_threads() {
    let mut grammar = Grammar::new("math");
    grammar.use_grammar(nested());
    grammar.expression("math").rule_map(
        [
            Symbol::pattern(r"\d+").unwrap(),
            ":nested:operator".into(),
            Symbol::pattern(r"\d+").unwrap(),
        ],
        addition,
    );

    std::thread::scope(|scope| {
        for n in 0..4i64 {
            let grammar = &grammar;
            scope.spawn(move || {
                let mut parser = Parser::new(grammar);
                let input = format!("{}+{}", n, n);
                assert_eq!(parser.parse(&input).unwrap(), Some(Value::Integer(2 * n)));
            });
        }
    });
}
