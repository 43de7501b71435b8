//! Rendering of JSON values for converter names and issue messages.

use std::fmt;

use serde_json::Value;

/// Formats a value the way converter names and issue messages show it.
///
/// Strings are double-quoted with JSON escaping, numbers and booleans render
/// bare, arrays as `[1, 2]`, and objects as `{key: value}` with unquoted keys.
pub fn display_value(value: &Value) -> String {
    DisplayValue(value).to_string()
}

/// Borrowing [`fmt::Display`] adapter around [`display_value`]'s format.
pub struct DisplayValue<'a>(pub &'a Value);

impl fmt::Display for DisplayValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Null => f.write_str("null"),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Number(number) => write!(f, "{number}"),
            Value::String(text) => match serde_json::to_string(text) {
                Ok(quoted) => f.write_str(&quoted),
                Err(_) => write!(f, "{text:?}"),
            },
            Value::Array(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", DisplayValue(item))?;
                }
                f.write_str("]")
            }
            Value::Object(entries) => {
                f.write_str("{")?;
                for (index, (key, item)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {}", DisplayValue(item))?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(5)), "5");
        assert_eq!(display_value(&json!(-1.5)), "-1.5");
    }

    #[test]
    fn test_display_strings_are_quoted_and_escaped() {
        assert_eq!(display_value(&json!("hello")), "\"hello\"");
        assert_eq!(display_value(&json!("say \"hi\"")), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_display_array() {
        assert_eq!(display_value(&json!([1, "two", null])), "[1, \"two\", null]");
    }

    #[test]
    fn test_display_object_keys_unquoted() {
        let value = json!({"one": 1, "two": {"three": [3]}});
        assert_eq!(display_value(&value), "{one: 1, two: {three: [3]}}");
    }
}
