//! Common test utilities for building input contexts and node configurations.
use serde_json::json;
use switchyard::prelude::*;

/// The context used throughout the examples: node `A` with a user and a list of items.
#[allow(dead_code)]
pub fn create_user_context() -> InputContext {
    InputContext::new()
        .with_node(
            "A",
            json!({
                "user": {"name": "Tom", "email": "tom@example.com", "age": 31},
                "items": [
                    {"sku": "X-1", "qty": 2},
                    {"sku": "Y-9", "qty": 0},
                    {"sku": "Z-3", "qty": 5}
                ],
                "tags": ["vip", "beta"],
                "active": true,
                "note": null
            }),
        )
        .with_node(
            "Orders",
            json!({
                "count": 0,
                "createdAt": "2025-06-01T09:30:00Z",
                "meta": {}
            }),
        )
}

/// Two conditions: the first true, the second false, against `create_user_context`.
#[allow(dead_code)]
pub fn create_true_and_false_conditions() -> Vec<Condition> {
    vec![
        Condition::new(DataType::String, "{{A.user.name}}", Operator::Equal, "Tom"),
        Condition::new(DataType::Number, "{{A.user.age}}", Operator::Lt, "18"),
    ]
}

/// The Switch-node rules from the routing examples.
#[allow(dead_code)]
pub fn create_name_rules() -> Vec<Rule> {
    vec![
        Rule::new("{{A.user.name}}", Operator::Equal, "Tom", "R1"),
        Rule::new("{{A.user.name}}", Operator::Exists, "", "R2"),
    ]
}

/// A Switch-node configuration as the node-configuration UI stores it.
#[allow(dead_code)]
pub const SWITCH_NODE_JSON: &str = r#"{
    "type": "switch",
    "fallbackOutputName": "other",
    "rules": [
        {"value": "{{A.user.email}}", "operator": "endsWith", "value2": "@corp.com", "outputName": "staff"},
        {"valueTemplate": "{{A.user.email}}", "operator": "regex", "value2Template": "^[a-z]+@example\\.com$", "outputName": "customer"}
    ]
}"#;

/// An If-node configuration as the node-configuration UI stores it.
#[allow(dead_code)]
pub const IF_NODE_JSON: &str = r#"{
    "type": "if",
    "combine": "OR",
    "conditions": [
        {"dataType": "array", "value1": "{{A.tags}}", "operator": "contains", "value2": "vip"},
        {"dataType": "dateTime", "value1": "{{Orders.createdAt}}", "operator": "before", "value2": "2020-01-01"}
    ]
}"#;
