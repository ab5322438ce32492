//! Integration tests for Switchyard
//!
//! End-to-end tests that load contexts and node configurations from disk and route them.
//!
mod common;
use common::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use switchyard::prelude::*;

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("switchyard_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).expect("Failed to create test directory");
        dir
    }

    fn write(dir: &Path, file: &str, contents: &str) -> String {
        let path = dir.join(file);
        fs::write(&path, contents).expect("Failed to write test file");
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_route_nodes_loaded_from_files() {
        let dir = scratch_dir("route");
        let context_json = serde_json::to_string(&json!({
            "A": {"user": {"name": "Tom", "email": "tom@example.com"}, "tags": ["vip"]},
            "Orders": {"createdAt": "2025-06-01T09:30:00Z"}
        }))
        .unwrap();
        let context_path = write(&dir, "context.json", &context_json);
        let switch_path = write(&dir, "switch.json", SWITCH_NODE_JSON);
        let if_path = write(&dir, "if.json", IF_NODE_JSON);

        let ctx = InputContext::from_file(&context_path).expect("Failed to load context");
        let switch = NodeConfig::from_file(&switch_path).expect("Failed to load switch node");
        let if_node = NodeConfig::from_file(&if_path).expect("Failed to load if node");

        let engine = Engine::new();
        assert_eq!(engine.route_node(&switch, &ctx).unwrap().output_name, "customer");
        assert_eq!(engine.route_node(&if_node, &ctx).unwrap().output_name, "true");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_engine_config_limits_regex_size() {
        let dir = scratch_dir("config");
        let config_path = write(&dir, "engine.json", r#"{"regexSizeLimit": 10}"#);
        let config = EngineConfig::from_file(&config_path).expect("Failed to load engine config");
        let _ = fs::remove_dir_all(&dir);

        let node = NodeConfig::from_json_str(SWITCH_NODE_JSON).unwrap();
        let ctx = create_user_context();

        let strict = Engine::builder().with_config(config).build();
        let decision = strict.route_node(&node, &ctx).unwrap();
        assert_eq!(decision.output_name, "other");
        assert!(matches!(decision.traces[1].outcome, Outcome::Invalid(_)));

        assert_eq!(Engine::new().route_node(&node, &ctx).unwrap().output_name, "customer");
    }

    #[test]
    fn test_missing_files_report_io_errors() {
        let missing = std::env::temp_dir().join("switchyard_does_not_exist.json");
        let result = InputContext::from_file(&missing.to_string_lossy());
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_upstream_outputs_drive_routing() {
        // An order node routes on values produced by two upstream nodes.
        let ctx = InputContext::new()
            .with_node(
                "Fetch",
                json!({"status": 200, "body": {"items": [{"price": 12.5}, {"price": 80}]}}),
            )
            .with_node("Auth", json!({"role": "admin"}));

        let ok = ConditionSet::new(
            vec![
                Condition::new(DataType::Number, "{{Fetch.status}}", Operator::Equal, "200"),
                Condition::new(DataType::Array, "{{Fetch.body.items}}", Operator::LengthGte, "2"),
                Condition::new(
                    DataType::Number,
                    "{{Fetch.body.items[1].price}}",
                    Operator::Gt,
                    "{{Fetch.body.items[0].price}}",
                ),
            ],
            Combine::And,
        )
        .unwrap();
        assert!(switchyard::evaluate_condition_set(&ok, &ctx).unwrap());

        let rules = RuleSet::new(
            vec![
                Rule::new("{{Auth.role}}", Operator::Equal, "guest", "limited"),
                Rule::new("{{Auth.role}}", Operator::Regex, "^(admin|owner)$", "full"),
            ],
            "denied",
        )
        .unwrap();
        assert_eq!(switchyard::evaluate_rule_set(&rules, &ctx).unwrap(), "full");

        let message = switchyard::substitute(
            "{{Auth.role}} saw {{Fetch.body.items[1].price}} in {{Fetch.body.items[5]}}",
            &ctx,
        );
        assert_eq!(message, "admin saw 80 in {{Fetch.body.items[5]}}");
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(Engine::new());
        let handles: Vec<_> = ["Tom", "Ann", ""]
            .into_iter()
            .map(|name| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    let ctx = InputContext::new().with_node("A", json!({"user": {"name": name}}));
                    let set = RuleSet::new(create_name_rules(), "fallback").unwrap();
                    engine.evaluate_rule_set(&set, &ctx).unwrap()
                })
            })
            .collect();

        let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(outputs, vec!["R1", "R2", "R2"]);
    }
}
