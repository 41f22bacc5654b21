//! Request bodies for the API tests.

use serde_json::{json, Value};

/// Create deck request body from (chinese, english) pairs.
pub fn create_deck_request(name: &str, phrases: &[(&str, &str)]) -> Value {
    let phrases: Vec<Value> = phrases
        .iter()
        .map(|(chinese, english)| json!({ "chinese": chinese, "english": english }))
        .collect();
    json!({ "name": name, "phrases": phrases })
}

pub fn greetings() -> Vec<(&'static str, &'static str)> {
    vec![("你好", "hello"), ("谢谢", "thank you"), ("再见", "goodbye")]
}

pub fn action_request(action: &str, elapsed_seconds: u64) -> Value {
    json!({ "action": action, "elapsed_seconds": elapsed_seconds })
}

/// Settings update body; absent values are omitted.
pub fn settings_request(reinsertion_distance: Option<usize>, mastery_threshold: Option<u32>) -> Value {
    let mut obj = serde_json::Map::new();
    if let Some(d) = reinsertion_distance {
        obj.insert("reinsertion_distance".to_string(), json!(d));
    }
    if let Some(t) = mastery_threshold {
        obj.insert("mastery_threshold".to_string(), json!(t));
    }
    Value::Object(obj)
}
