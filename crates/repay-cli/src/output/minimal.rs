use serde_json::Value;

use super::CURRENCY_PREFIX;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // (field, is_money) in priority order
    let priority_keys = [
        ("total_interest", true),
        ("payoff_years", false),
        ("monthly_installment", true),
        ("initial_installment", true),
    ];

    if let Value::Object(map) = result_obj {
        for (key, is_money) in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    if *is_money {
                        println!("{} {}", CURRENCY_PREFIX, format_minimal(val));
                    } else {
                        println!("{}", format_minimal(val));
                    }
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
