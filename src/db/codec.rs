//! Text encoding for list-valued columns.
//!
//! Lists are stored as JSON arrays of strings. Decoding never fails: anything
//! that is not a JSON array of strings reads back as an empty list.

/// Encode a list of strings for storage in a TEXT column.
pub fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a stored list, degrading to an empty list on malformed input.
pub fn decode_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::debug!("Discarding malformed list column {:?}: {}", raw, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            strings(&[]),
            strings(&["Meta", "Google"]),
            strings(&["", "quote \" and, comma", "ünïcødé", "[\"nested\"]"]),
        ];

        for values in cases {
            let encoded = encode_list(&values);
            assert_eq!(decode_list(Some(&encoded)), values);
        }
    }

    #[test]
    fn test_empty_list_encoding() {
        assert_eq!(encode_list(&[]), "[]");
    }

    #[test]
    fn test_malformed_decodes_to_empty() {
        for raw in ["", "not json", "{\"a\":1}", "[1, 2]", "[\"ok\", 3]", "null"] {
            assert!(decode_list(Some(raw)).is_empty(), "{:?}", raw);
        }
        assert!(decode_list(None).is_empty());
    }
}
