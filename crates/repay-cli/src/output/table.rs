use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::CURRENCY_PREFIX;

/// Field names carrying currency amounts, prefixed for display.
const MONEY_FIELDS: [&str; 9] = [
    "monthly_installment",
    "initial_installment",
    "final_installment",
    "annual_lump",
    "total_payments",
    "total_interest",
    "interest_saved",
    "principal",
    "extra_amount",
];

const SCHEDULE_COLUMNS: [(&str, &str, bool); 6] = [
    ("month", "Month", false),
    ("installment", "Installment", true),
    ("principal", "Principal", true),
    ("interest", "Interest", true),
    ("balance", "Balance", true),
    ("year", "Year", false),
];

/// Format output as tables using the tabled crate: a summary table, the
/// month-by-month schedule when one is present, then warnings and the
/// methodology footer.
pub fn print_table(value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{}", value);
        return;
    };

    match map.get("result") {
        Some(Value::Object(result)) => {
            if is_comparison(result) {
                print_comparison_table(result);
            } else {
                print_summary_table(result);
                if let Some(Value::Array(periods)) = result.get("periods") {
                    println!("\nSchedule:");
                    print_schedule_table(periods);
                }
            }
        }
        _ => print_flat_object(value),
    }

    if let Some(Value::Array(warnings)) = map.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = map.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn is_comparison(result: &serde_json::Map<String, Value>) -> bool {
    result.contains_key("baseline")
        && result.contains_key("extra_payment")
        && result.contains_key("step_up")
}

fn print_summary_table(result: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in result {
        // Arrays get their own rendering (or none at all).
        if val.is_array() {
            continue;
        }
        builder.push_record([key.as_str(), &format_field(key, val)]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

fn print_schedule_table(periods: &[Value]) {
    if periods.is_empty() {
        println!("(empty)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(SCHEDULE_COLUMNS.map(|(_, header, _)| header));

    for period in periods {
        if let Value::Object(map) = period {
            let row: Vec<String> = SCHEDULE_COLUMNS
                .iter()
                .map(|(key, _, is_money)| {
                    let raw = map.get(*key).map(plain_value).unwrap_or_default();
                    if *is_money {
                        format!("{} {}", CURRENCY_PREFIX, raw)
                    } else {
                        raw
                    }
                })
                .collect();
            builder.push_record(row);
        }
    }

    let table = Table::from(builder);
    println!("{}", table);
}

fn print_comparison_table(result: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record([
        "Strategy",
        "Monthly EMI",
        "Total Payments",
        "Total Interest",
        "Payoff (years)",
        "Interest Saved",
        "Years Saved",
    ]);

    for key in ["baseline", "extra_payment", "step_up"] {
        if let Some(Value::Object(summary)) = result.get(key) {
            builder.push_record([
                summary.get("strategy").map(plain_value).unwrap_or_default(),
                money_cell(summary, "monthly_installment"),
                money_cell(summary, "total_payments"),
                money_cell(summary, "total_interest"),
                summary
                    .get("payoff_years")
                    .map(plain_value)
                    .unwrap_or_default(),
                money_cell(summary, "interest_saved"),
                summary
                    .get("years_saved")
                    .map(plain_value)
                    .unwrap_or_default(),
            ]);
        }
    }

    let table = Table::from(builder);
    println!("{}", table);
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_field(key, val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    } else {
        println!("{}", value);
    }
}

fn money_cell(map: &serde_json::Map<String, Value>, key: &str) -> String {
    map.get(key)
        .map(|v| format!("{} {}", CURRENCY_PREFIX, plain_value(v)))
        .unwrap_or_default()
}

fn format_field(key: &str, value: &Value) -> String {
    let raw = plain_value(value);
    if MONEY_FIELDS.contains(&key) {
        format!("{} {}", CURRENCY_PREFIX, raw)
    } else {
        raw
    }
}

fn plain_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
