use librei18n::{Catalog, Format, Message, RenderError, TemplateData, load, render};
use rstest::rstest;
use serde_json::json;

fn count_data(count: i64) -> TemplateData {
    json!({ "Count": count }).as_object().cloned().unwrap()
}

fn cats() -> Message {
    Message::builder()
        .id("x")
        .one("{{.Count}} cat")
        .other("{{.Count}} cats")
        .build()
}

#[rstest]
#[case(1, "1 cat")]
#[case(2, "2 cats")]
#[case(0, "0 cats")]
#[case(-1, "-1 cats")]
fn test_plural_selection(#[case] count: i64, #[case] expected: &str) {
    assert_eq!(render(&cats(), &count_data(count), count).unwrap(), expected);
}

#[test]
fn test_empty_one_uses_other_for_a_single_item() {
    let message = Message::builder().id("x").other("{{.Count}} item(s)").build();
    assert_eq!(render(&message, &count_data(1), 1).unwrap(), "1 item(s)");
}

#[test]
fn test_plural_count_is_independent_of_data() {
    assert_eq!(render(&cats(), &count_data(5), 1).unwrap(), "5 cat");
}

#[test]
fn test_syntax_error_is_reported_for_selected_form_only() {
    let message = Message::builder().id("broken").one("{{.Count").other("fine").build();

    assert_eq!(render(&message, &count_data(2), 2).unwrap(), "fine");
    assert!(matches!(
        render(&message, &count_data(1), 1),
        Err(RenderError::Syntax { .. })
    ));
}

#[test]
fn test_missing_field_is_an_execution_error() {
    let err = render(&cats(), &TemplateData::new(), 3).unwrap_err();
    assert!(matches!(err, RenderError::Execution { .. }));
    assert!(err.to_string().contains(".Count"), "{err}");
}

#[test]
fn test_render_message_looked_up_from_catalog() {
    let catalog: Catalog = load(
        br#"
[PersonCats]
one = "{{.Name}} has {{.Count}} cat."
other = "{{.Name}} has {{.Count}} cats."
"#,
        Format::Toml,
    )
    .unwrap();
    let message = catalog.message("PersonCats").unwrap();
    let data = json!({ "Name": "Nick", "Count": 2 })
        .as_object()
        .cloned()
        .unwrap();

    assert_eq!(render(&message, &data, 2).unwrap(), "Nick has 2 cats.");
}
