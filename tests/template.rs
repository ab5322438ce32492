//! Tests for template substitution and highlighting.
mod common;
use common::*;
use serde_json::json;
use switchyard::prelude::*;

#[test]
fn test_literal_text_is_unchanged() {
    let ctx = create_user_context();
    assert_eq!(switchyard::substitute("hello world", &ctx), "hello world");
}

#[test]
fn test_substitution_example() {
    let ctx = InputContext::new().with_node("A", json!({"user": {"name": "Tom"}}));
    let output = switchyard::render_template("Hi {{A.user.name}}!", &ctx, RenderMode::Substitute);
    assert_eq!(output, RenderedOutput::Substituted("Hi Tom!".to_string()));
}

#[test]
fn test_unresolved_token_is_preserved() {
    let ctx = InputContext::new().with_node("A", json!({"user": {"name": "Tom"}}));
    assert_eq!(switchyard::substitute("{{A.missing}}", &ctx), "{{A.missing}}");
    assert_eq!(
        switchyard::substitute("x {{ A.items[bad] }} y", &ctx),
        "x {{ A.items[bad] }} y"
    );
}

#[test]
fn test_non_string_values_render_as_json() {
    let ctx = create_user_context();
    assert_eq!(
        switchyard::substitute(
            "{{A.items[0]}} {{A.tags}} {{A.note}} {{A.active}} {{Orders.count}}",
            &ctx,
        ),
        r#"{"qty":2,"sku":"X-1"} ["vip","beta"] null true 0"#
    );
}

#[test]
fn test_large_ids_render_without_exponent() {
    let ctx = InputContext::new().with_node("A", json!({"id": 1_234_567_890_123_456_789u64}));
    assert_eq!(switchyard::substitute("id={{A.id}}", &ctx), "id=1234567890123456800");
}

#[test]
fn test_whitespace_inside_braces_is_trimmed() {
    let ctx = create_user_context();
    assert_eq!(switchyard::substitute("{{   A.user.name\t}}", &ctx), "Tom");
}

#[test]
fn test_unterminated_token_is_literal() {
    let ctx = create_user_context();
    assert_eq!(
        switchyard::substitute("{{A.user.name}} {{A.user.name", &ctx),
        "Tom {{A.user.name"
    );
}

#[test]
fn test_resolved_values_are_not_expanded_again() {
    let ctx = InputContext::new().with_node("A", json!({"t": "{{A.u}}", "u": "deep"}));
    assert_eq!(switchyard::substitute("{{A.t}}", &ctx), "{{A.u}}");
}

#[test]
fn test_rendering_is_idempotent() {
    let ctx = create_user_context();
    let text = "{{A.user.email}} has {{A.items[1].qty}} of {{A.nope}}";
    for mode in [RenderMode::Substitute, RenderMode::Highlight] {
        let first = switchyard::render_template(text, &ctx, mode);
        let second = switchyard::render_template(text, &ctx, mode);
        assert_eq!(first, second);
    }
}

#[test]
fn test_highlight_spans() {
    let ctx = create_user_context();
    let spans = Engine::new().highlight("Dear {{A.user.name}}, see {{A.gone}} at {{now}}", &ctx);

    let summary: Vec<(SpanKind, &str, bool)> = spans
        .iter()
        .map(|s| (s.kind, s.text.as_str(), s.exists))
        .collect();
    assert_eq!(
        summary,
        vec![
            (SpanKind::Literal, "Dear ", true),
            (SpanKind::Variable, "{{A.user.name}}", true),
            (SpanKind::Literal, ", see ", true),
            (SpanKind::Variable, "{{A.gone}}", false),
            (SpanKind::Literal, " at ", true),
            (SpanKind::Variable, "{{now}}", true),
        ]
    );
}

#[test]
fn test_variables_listing() {
    assert_eq!(
        switchyard::template::variables("{{A.x}} and {{ B.items[0] }} {{"),
        vec!["A.x", "B.items[0]"]
    );
}
