use librei18n::Message;
use librei18n_sc_parser::error::ScParserError;
use librei18n_sc_parser::{MessageVisitor, parse_source};
use rstest::rstest;
use syn::visit::Visit as _;

fn ids(messages: &[Message]) -> Vec<&str> {
    messages.iter().map(|m| m.id.as_str()).collect()
}

#[test]
fn exported_style_fields_yield_one_record() {
    let source = r#"
fn main() {
    let m = i18n::Message { ID: "Hello", Other: "Hi there" };
}
"#;

    let messages = parse_source(source).unwrap();

    assert_eq!(
        messages,
        vec![Message {
            id: "Hello".to_string(),
            one: String::new(),
            other: "Hi there".to_string(),
        }]
    );
}

#[test]
fn all_three_forms_are_read() {
    let source = r#"
const CATS: Message = Message {
    id: "PersonCats",
    one: "{{.Name}} has {{.Count}} cat.",
    other: "{{.Name}} has {{.Count}} cats.",
};
"#;

    let messages = parse_source(source).unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].one, "{{.Name}} has {{.Count}} cat.");
    assert_eq!(messages[0].other, "{{.Name}} has {{.Count}} cats.");
}

#[test]
fn non_literal_fields_are_left_empty() {
    let source = r#"
fn build(text: &str) {
    let m = Message { id: "Dynamic", other: text.to_string(), one: "single" };
}
"#;

    let messages = parse_source(source).unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, "Dynamic");
    assert_eq!(messages[0].one, "single");
    assert!(messages[0].other.is_empty());
}

#[test]
fn other_struct_literals_are_ignored() {
    let source = r#"
fn main() {
    let p = Point { x: 1, y: 2 };
    let c = Config { id: "NotAMessage" };
    let m = Message { id: "Real" };
}
"#;

    assert_eq!(ids(&parse_source(source).unwrap()), vec!["Real"]);
}

#[test]
fn messages_are_returned_in_source_order_with_duplicates() {
    let source = r#"
fn first() {
    let a = Message { id: "B" };
    let b = Message { id: "A" };
}

mod inner {
    fn second() {
        let c = Message { id: "B", other: "again" };
    }
}
"#;

    assert_eq!(ids(&parse_source(source).unwrap()), vec!["B", "A", "B"]);
}

#[test]
fn literals_inside_macros_are_found() {
    let source = r#"
fn all() -> Vec<Message> {
    vec![
        Message { id: "First", other: "1" },
        Message { id: "Second", other: "2" },
    ]
}
"#;

    assert_eq!(
        ids(&parse_source(source).unwrap()),
        vec!["First", "Second"]
    );
}

#[test]
fn nested_literals_follow_their_container() {
    let source = r#"
fn main() {
    let w = Wrapper {
        inner: Message { id: "Inner" },
        extra: Message { id: "Extra" },
    };
}
"#;

    assert_eq!(
        ids(&parse_source(source).unwrap()),
        vec!["Inner", "Extra"]
    );
}

#[test]
fn source_without_messages_is_empty() {
    assert!(parse_source("fn main() {}").unwrap().is_empty());
}

#[rstest]
#[case::statement_at_item_level("fn main() {}\n\n\nlet x = 1;\n", 4)]
#[case::bad_expression("fn main() {\n    let x = ;\n}\n", 2)]
fn invalid_source_reports_line(#[case] source: &str, #[case] expected_line: usize) {
    match parse_source(source) {
        Err(ScParserError::Parse { line, column, .. }) => {
            assert_eq!(line, expected_line);
            assert!(column >= 1);
        },
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn visitor_collects_from_a_parsed_expression() {
    let expr: syn::Expr = syn::parse_str(
        r#"vec![Message { id: "First", other: "one" }, Message { id: "Second", one: "x" }]"#,
    )
    .unwrap();

    let mut visitor = MessageVisitor::default();
    visitor.visit_expr(&expr);

    assert_eq!(ids(visitor.messages()), vec!["First", "Second"]);
    assert_eq!(visitor.messages()[1].one, "x");
    assert_eq!(visitor.into_messages().len(), 2);
}
