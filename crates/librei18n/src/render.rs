//! Plural selection and `{{.Field}}` substitution.

use crate::error::RenderError;
use crate::message::Message;
use bon::Builder;
use serde_json::Value as JsonValue;

/// Named substitution values for a template.
pub type TemplateData = serde_json::Map<String, JsonValue>;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Node {
    Text(String),
    /// A field path; empty means the whole data map (`{{.}}`).
    Field(Vec<String>),
}

/// A parsed message template.
///
/// Actions are field references: `{{.Name}}`, `{{ .User.Name }}` or `{{.}}`.
/// Parsing once and executing many times is how callers cache templates.
#[derive(Clone, Debug)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, RenderError> {
        let name = name.into();
        let mut nodes = Vec::new();
        let mut rest = text;
        let mut consumed = 0;

        while let Some(open) = rest.find("{{") {
            if open > 0 {
                nodes.push(Node::Text(rest[..open].to_owned()));
            }

            let offset = consumed + open;
            let action = &rest[open + 2..];
            let Some(close) = action.find("}}") else {
                return Err(RenderError::Syntax {
                    name,
                    offset,
                    reason: "unclosed action".to_string(),
                });
            };

            let path = parse_field_path(action[..close].trim()).map_err(|reason| {
                RenderError::Syntax {
                    name: name.clone(),
                    offset,
                    reason,
                }
            })?;
            nodes.push(Node::Field(path));

            let advance = open + 2 + close + 2;
            rest = &rest[advance..];
            consumed += advance;
        }

        if !rest.is_empty() {
            nodes.push(Node::Text(rest.to_owned()));
        }

        Ok(Self { name, nodes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substitutes every field reference with its value from `data`.
    pub fn execute(&self, data: &TemplateData) -> Result<String, RenderError> {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Field(path) => out.push_str(&self.resolve(data, path)?),
            }
        }
        Ok(out)
    }

    fn resolve(&self, data: &TemplateData, path: &[String]) -> Result<String, RenderError> {
        let field = format!(".{}", path.join("."));
        let fail = |reason: String| RenderError::Execution {
            name: self.name.clone(),
            field: field.clone(),
            reason,
        };

        let Some((first, tail)) = path.split_first() else {
            return Err(fail("the data map is not a printable scalar".to_string()));
        };

        let mut current = data
            .get(first)
            .ok_or_else(|| fail(format!("no field '{}' in template data", first)))?;

        for segment in tail {
            current = match current {
                JsonValue::Object(map) => map
                    .get(segment)
                    .ok_or_else(|| fail(format!("no field '{}'", segment)))?,
                other => {
                    return Err(fail(format!(
                        "cannot read field '{}' of {}",
                        segment,
                        kind_of(other)
                    )));
                },
            };
        }

        match current {
            JsonValue::String(text) => Ok(text.clone()),
            JsonValue::Number(number) => Ok(format_number(number)),
            JsonValue::Bool(flag) => Ok(flag.to_string()),
            other => Err(fail(format!("{} is not a printable scalar", kind_of(other)))),
        }
    }
}

/// Whole-number floats print without a fractional part, so `2.0` renders as `2`.
fn format_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float)
            if number.is_f64() && float.fract() == 0.0 && float.abs() < MAX_EXACT_FLOAT =>
        {
            (float as i64).to_string()
        },
        _ => number.to_string(),
    }
}

const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

fn parse_field_path(action: &str) -> Result<Vec<String>, String> {
    if action.is_empty() {
        return Err("empty action".to_string());
    }

    let Some(path) = action.strip_prefix('.') else {
        return Err(format!(
            "unsupported action '{}'; expected a field reference such as {{{{.Name}}}}",
            action
        ));
    };

    if path.is_empty() {
        return Ok(Vec::new());
    }

    path.split('.')
        .map(|segment| {
            if is_identifier(segment) {
                Ok(segment.to_owned())
            } else {
                Err(format!("invalid field name '{}'", segment))
            }
        })
        .collect()
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Renders `message` for `plural_count` with `data`.
///
/// The `one` form is used only when the count is exactly one and the form is
/// non-empty; otherwise `other` is used.
pub fn render(
    message: &Message,
    data: &TemplateData,
    plural_count: i64,
) -> Result<String, RenderError> {
    let source = message.select_variant(plural_count);
    Template::parse(message.id.as_str(), source)?.execute(data)
}

/// A render request assembled field by field.
#[derive(Builder, Clone, Debug)]
pub struct LocalizeConfig<'a> {
    pub message: &'a Message,
    #[builder(default)]
    pub template_data: TemplateData,
    #[builder(default)]
    pub plural_count: i64,
}

/// Renders a [`LocalizeConfig`].
pub fn localize(config: &LocalizeConfig<'_>) -> Result<String, RenderError> {
    render(config.message, &config.template_data, config.plural_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: JsonValue) -> TemplateData {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_text_only() {
        let template = Template::parse("plain", "no actions here").unwrap();
        assert_eq!(template.nodes, vec![Node::Text("no actions here".into())]);
    }

    #[test]
    fn test_parse_nested_field() {
        let template = Template::parse("nested", "Hi {{ .User.Name }}!").unwrap();
        assert_eq!(
            template.nodes,
            vec![
                Node::Text("Hi ".into()),
                Node::Field(vec!["User".into(), "Name".into()]),
                Node::Text("!".into()),
            ]
        );
    }

    #[test]
    fn test_parse_unclosed_action() {
        let err = Template::parse("broken", "Hello {{.Name").unwrap_err();
        assert!(matches!(
            err,
            RenderError::Syntax { offset: 6, ref name, .. } if name == "broken"
        ));
    }

    #[test]
    fn test_parse_rejects_non_field_action() {
        assert!(matches!(
            Template::parse("call", "{{printf \"%d\" 3}}"),
            Err(RenderError::Syntax { .. })
        ));
        assert!(matches!(
            Template::parse("empty", "{{ }}"),
            Err(RenderError::Syntax { .. })
        ));
        assert!(matches!(
            Template::parse("bad", "{{.Na-me}}"),
            Err(RenderError::Syntax { .. })
        ));
    }

    #[test]
    fn test_execute_scalars() {
        let template = Template::parse("scalars", "{{.Name}} {{.Count}} {{.Ok}}").unwrap();
        let out = template
            .execute(&data(json!({ "Name": "Nick", "Count": 2, "Ok": true })))
            .unwrap();
        assert_eq!(out, "Nick 2 true");
    }

    #[test]
    fn test_execute_whole_float_drops_fraction() {
        let template = Template::parse("floats", "{{.Whole}} {{.Half}} {{.Negative}}").unwrap();
        let out = template
            .execute(&data(json!({ "Whole": 2.0, "Half": 2.5, "Negative": -3.0 })))
            .unwrap();
        assert_eq!(out, "2 2.5 -3");
    }

    #[test]
    fn test_execute_missing_field() {
        let template = Template::parse("missing", "{{.Name}}").unwrap();
        let err = template.execute(&TemplateData::new()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Execution { ref field, .. } if field == ".Name"
        ));
    }

    #[test]
    fn test_execute_type_mismatch() {
        let template = Template::parse("mismatch", "{{.Items}} {{.Name.First}}").unwrap();
        let err = template
            .execute(&data(json!({ "Items": [1, 2], "Name": "Nick" })))
            .unwrap_err();
        assert!(matches!(err, RenderError::Execution { .. }));
    }

    #[test]
    fn test_localize_defaults_to_other() {
        let message = Message::builder()
            .id("PersonCats")
            .one("{{.Name}} has {{.Count}} cat.")
            .other("{{.Name}} has {{.Count}} cats.")
            .build();
        let config = LocalizeConfig::builder()
            .message(&message)
            .template_data(data(json!({ "Name": "Nick", "Count": 2 })))
            .plural_count(2)
            .build();

        assert_eq!(localize(&config).unwrap(), "Nick has 2 cats.");
    }
}
