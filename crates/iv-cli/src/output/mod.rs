use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(value)?)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

fn render_table(value: &Value) -> String {
    let width = ui::prefs().term_width;
    match value {
        Value::Array(items) => list_table(items, width),
        // `{ "interviews": [...] }`-style wrappers render as the list itself.
        Value::Object(map) if map.len() == 1 && map.values().all(Value::is_array) => {
            map.values()
                .next()
                .and_then(Value::as_array)
                .map_or_else(String::new, |items| list_table(items, width))
        }
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect();
            table::render_rows(&["field", "value"], &rows, width)
        }
        scalar => cell(scalar),
    }
}

fn list_table(items: &[Value], width: Option<usize>) -> String {
    if items.is_empty() {
        return String::from("(none)");
    }
    // Column order follows the first appearance of each key.
    let mut columns: Vec<&str> = Vec::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }
    if columns.is_empty() {
        let rows: Vec<Vec<String>> = items.iter().map(|v| vec![cell(v)]).collect();
        return table::render_rows(&["value"], &rows, width);
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|col| item.get(*col).map_or_else(|| "-".to_string(), cell))
                .collect()
        })
        .collect();
    table::render_rows(&columns, &rows, width)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => if *b { "yes" } else { "no" }.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => format!("[{}]", items.len()),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: &'static str,
        starred: bool,
    }

    #[test]
    fn json_render_is_pretty() {
        let out = render(&Row { id: "r1", starred: true }, OutputFormat::Json).unwrap();
        assert!(out.contains('\n'));
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["id"], "r1");
    }

    #[test]
    fn raw_render_is_single_line() {
        let out = render(&Row { id: "r1", starred: false }, OutputFormat::Raw).unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn wrapped_list_renders_as_rows() {
        let value = json!({ "results": [
            { "id": "r1", "starred": true },
            { "id": "r2", "starred": false, "notes": "call back" }
        ]});
        let out = render(&value, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("id"));
        assert!(lines[0].contains("notes"));
        assert!(lines[2].contains("yes"));
        assert!(lines[3].contains("call back"));
    }

    #[test]
    fn empty_list_says_none() {
        let out = render(&json!({ "tokens": [] }), OutputFormat::Table).unwrap();
        assert_eq!(out, "(none)");
    }

    #[test]
    fn object_renders_field_value_pairs() {
        let out = render(&json!({ "healthy": true, "services": [1, 2] }), OutputFormat::Table)
            .unwrap();
        assert!(out.contains("healthy"));
        assert!(out.contains("[2]"));
    }
}
