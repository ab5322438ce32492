use proptest::prelude::*;
use serde_json::json;
use switchyard::prelude::*;

fn segment() -> impl Strategy<Value = PathSegment> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_-]{0,8}".prop_map(PathSegment::Key),
        (0usize..50).prop_map(PathSegment::Index),
    ]
}

fn json_tree() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i32>().prop_map(serde_json::Value::from),
        "[a-z ]{0,6}".prop_map(serde_json::Value::from),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-zA-Z_][a-zA-Z0-9_]{0,6}", inner, 0..4)
                .prop_map(|map| serde_json::Value::Object(map.into_iter().collect())),
        ]
    })
}

fn node_output() -> impl Strategy<Value = serde_json::Value> {
    prop::collection::btree_map("[a-zA-Z_][a-zA-Z0-9_]{0,6}", json_tree(), 0..5)
        .prop_map(|map| serde_json::Value::Object(map.into_iter().collect()))
}

proptest! {
    #[test]
    fn test_path_display_round_trips(
        root in "[a-zA-Z_][a-zA-Z0-9_]{0,8}",
        rest in prop::collection::vec(segment(), 0..6),
    ) {
        let mut segments = vec![PathSegment::Key(root)];
        segments.extend(rest);
        let path = VariablePath::from_segments(segments).unwrap();

        let reparsed = VariablePath::parse(&path.to_string()).unwrap();
        prop_assert_eq!(reparsed, path);
    }

    #[test]
    fn test_every_leaf_resolves_through_its_path(output in node_output()) {
        let ctx = InputContext::new().with_node("Node", output);
        let node = ctx.get("Node").unwrap();
        for (path, leaf) in node.leaf_paths("Node") {
            let result = switchyard::resolve_path(&path.to_string(), &ctx);
            prop_assert_eq!(result, ResolutionResult { exists: true, value: Some(leaf.clone()) });
        }
    }

    #[test]
    fn test_text_without_tokens_is_unchanged(s: String) {
        // Only test strings without placeholder patterns
        if !s.contains("{{") {
            let ctx = InputContext::new().with_node("A", json!({"x": 1}));
            prop_assert_eq!(switchyard::substitute(&s, &ctx), s);
        }
    }

    #[test]
    fn test_highlight_spans_cover_the_input(
        text in "[A-Zxy {}.\\[\\]0-9]{0,40}",
    ) {
        let ctx = InputContext::new().with_node("A", json!({"x": [1, 2]}));
        let spans = Engine::new().highlight(&text, &ctx);
        let joined: String = spans.iter().map(|s| s.text.as_str()).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn test_missing_paths_render_verbatim(
        key in "[a-z]{1,8}",
        prefix in "[a-zA-Z0-9 ]*",
        suffix in "[a-zA-Z0-9 ]*",
    ) {
        // Node `Empty` has no keys, so every token stays in place.
        let ctx = InputContext::new().with_node("Empty", json!({}));
        let template = format!("{}{{{{Empty.{}}}}}{}", prefix, key, suffix);
        prop_assert_eq!(switchyard::substitute(&template, &ctx), template);
    }

    #[test]
    fn test_resolved_strings_render_exactly(value in "[^{}]*") {
        let ctx = InputContext::new().with_node("A", json!({"v": value.clone()}));
        prop_assert_eq!(switchyard::substitute("{{A.v}}", &ctx), value);
    }

    #[test]
    fn test_rendering_twice_gives_the_same_output(
        text in "[A-Zxy {}.\\[\\]0-9]{0,40}",
        substitute in any::<bool>(),
    ) {
        let ctx = InputContext::new().with_node("A", json!({"x": [1, 2], "y": "{{A.x}}"}));
        let mode = if substitute { RenderMode::Substitute } else { RenderMode::Highlight };
        let first = switchyard::render_template(&text, &ctx, mode);
        let second = switchyard::render_template(&text, &ctx, mode);
        prop_assert_eq!(first, second);
    }
}
