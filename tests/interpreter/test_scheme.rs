//! Scheme evaluation through the `Interpreter` contract

use scheme_relay::core::interpreter::Interpreter;
use scheme_relay::core::scheme::{EvalError, SchemeInterpreter};
use scheme_relay::core::store::KnowledgeStore;

fn eval(store: &KnowledgeStore, command: &str) -> Result<String, EvalError> {
    SchemeInterpreter::new().evaluate(store, command)
}

#[test]
fn test_arithmetic() {
    let store = KnowledgeStore::new();
    assert_eq!(eval(&store, "(+ 1 2)").unwrap(), "3\n");
    assert_eq!(eval(&store, "(* 2 (- 10 4))").unwrap(), "12\n");
    assert_eq!(eval(&store, "(/ 1.0 4)").unwrap(), "0.25\n");
}

#[test]
fn test_last_form_wins() {
    let store = KnowledgeStore::new();
    assert_eq!(eval(&store, "(define x 2) (define y 3) (* x y)").unwrap(), "6\n");
}

#[test]
fn test_definitions_render_nothing() {
    let store = KnowledgeStore::new();
    assert_eq!(eval(&store, "(define greeting \"hello\")").unwrap(), "");
    assert_eq!(eval(&store, "greeting").unwrap(), "\"hello\"\n");
}

#[test]
fn test_nodes_are_shared_between_commands() {
    let store = KnowledgeStore::new();

    eval(&store, "(ConceptNode \"cat\")").unwrap();
    eval(&store, "(ConceptNode \"cat\")").unwrap();
    eval(&store, "(GeneNode \"IGLV1-50\")").unwrap();

    assert_eq!(eval(&store, "(cog-count-atoms)").unwrap(), "2\n");
    assert_eq!(
        eval(&store, "(cog-count-atoms 'ConceptNode)").unwrap(),
        "1\n"
    );
    assert_eq!(
        eval(&store, "(cog-name (GeneNode \"IGLV1-50\"))").unwrap(),
        "\"IGLV1-50\"\n"
    );
}

#[test]
fn test_attention_boundary() {
    let store = KnowledgeStore::new();

    assert_eq!(eval(&store, "(cog-set-af-boundary! 100)").unwrap(), "100\n");
    assert_eq!(eval(&store, "(cog-af-boundary)").unwrap(), "100\n");
    assert_eq!(store.af_boundary(), 100);
}

#[test]
fn test_errors_leave_store_usable() {
    let store = KnowledgeStore::new();

    assert!(matches!(
        eval(&store, "(undefined-proc)"),
        Err(EvalError::UnboundVariable(_))
    ));
    assert!(matches!(eval(&store, "(+ 1"), Err(EvalError::Syntax(_))));
    assert!(matches!(
        eval(&store, "(/ 1 0)"),
        Err(EvalError::DivisionByZero(_))
    ));

    assert_eq!(eval(&store, "(+ 1 2)").unwrap(), "3\n");
}

#[test]
fn test_empty_command_renders_nothing() {
    let store = KnowledgeStore::new();
    assert_eq!(eval(&store, "").unwrap(), "");
    assert_eq!(eval(&store, "  ; only a comment\n").unwrap(), "");
}
