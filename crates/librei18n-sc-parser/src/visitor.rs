use getset::Getters;
use librei18n::Message;
use syn::punctuated::Punctuated;
use syn::visit::{self, Visit};
use syn::{Expr, ExprLit, ExprStruct, Lit, Member, Token};

/// Collects `Message { .. }` literals in the order they appear.
#[derive(Debug, Default, Getters)]
pub struct MessageVisitor {
    #[getset(get = "pub")]
    messages: Vec<Message>,
}

impl MessageVisitor {
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl<'ast> Visit<'ast> for MessageVisitor {
    fn visit_expr_struct(&mut self, node: &'ast ExprStruct) {
        if is_message_path(&node.path) {
            let message = read_message(node);
            if message.id.is_empty() {
                tracing::warn!(
                    "Found a Message literal without a literal id; it will be written under an empty key"
                );
            }
            tracing::trace!(id = %message.id, "Extracted message");
            self.messages.push(message);
        }

        // Nested literals come after the one that contains them.
        visit::visit_expr_struct(self, node);
    }

    fn visit_macro(&mut self, mac: &'ast syn::Macro) {
        match mac.parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated) {
            Ok(args) => {
                for arg in &args {
                    self.visit_expr(arg);
                }
            },
            Err(e) => {
                tracing::trace!(
                    "Skipping macro body that is not an expression list: {}",
                    e
                );
            },
        }

        visit::visit_macro(self, mac);
    }
}

fn is_message_path(path: &syn::Path) -> bool {
    path.segments
        .last()
        .is_some_and(|segment| segment.ident == "Message")
}

fn read_message(node: &ExprStruct) -> Message {
    let mut message = Message::default();

    for field in &node.fields {
        let Member::Named(name) = &field.member else {
            continue;
        };
        let Some(text) = string_literal(&field.expr) else {
            tracing::trace!(field = %name, "Ignoring non-literal Message field");
            continue;
        };

        match name.to_string().as_str() {
            "ID" | "id" => message.id = text,
            "One" | "one" => message.one = text,
            "Other" | "other" => message.other = text,
            _ => {},
        }
    }

    message
}

fn string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Some(lit.value()),
        _ => None,
    }
}
