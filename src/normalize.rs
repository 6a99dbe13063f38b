use serde_json::{json, Value};

/// Prepares a clinical patient resource for the clinical-resource server.
///
/// The server refuses a few shapes the bridge can produce, so before
/// forwarding: the gender token is normalized case-insensitively, the
/// resource `id` is stripped (not accepted on create), empty `extension`
/// and `address` sequences are dropped, and a single empty line is removed
/// from the first address entry.
pub fn normalize_outbound(mut body: Value) -> Value {
    if let Some(resource) = body.as_object_mut() {
        let token = resource
            .get("gender")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_lowercase();
        let gender = match token.as_str() {
            "m" | "male" => "male",
            "f" | "female" => "female",
            "o" | "other" => "other",
            _ => "unknown",
        };
        resource.insert("gender".to_string(), json!(gender));

        resource.remove("id");

        if resource
            .get("extension")
            .and_then(Value::as_array)
            .is_some_and(|extensions| extensions.is_empty())
        {
            resource.remove("extension");
        }

        let drop_address = resource
            .get("address")
            .and_then(Value::as_array)
            .is_some_and(|addresses| addresses.is_empty());
        if drop_address {
            resource.remove("address");
        } else if let Some(addresses) = resource.get_mut("address").and_then(Value::as_array_mut) {
            if let Some(first) = addresses.first_mut().and_then(Value::as_object_mut) {
                if first.get("line") == Some(&json!([""])) {
                    first.remove("line");
                }
            }
        }
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_tokens_are_normalized_case_insensitively() {
        for (token, expected) in [
            ("M", "male"),
            ("male", "male"),
            ("F", "female"),
            ("Female", "female"),
            ("o", "other"),
            ("OTHER", "other"),
            ("divers", "unknown"),
            ("", "unknown"),
        ] {
            let out = normalize_outbound(json!({ "gender": token }));
            assert_eq!(out["gender"], expected, "token {token:?}");
        }

        // A record without a gender still gets one.
        let out = normalize_outbound(json!({}));
        assert_eq!(out["gender"], "unknown");
    }

    #[test]
    fn resource_id_is_stripped() {
        let out = normalize_outbound(json!({ "id": "abc", "gender": "male" }));
        assert!(out.get("id").is_none());
    }

    #[test]
    fn empty_extension_sequence_is_dropped() {
        let out = normalize_outbound(json!({ "extension": [] }));
        assert!(out.get("extension").is_none());

        let out = normalize_outbound(json!({ "extension": [{ "display": "kept" }] }));
        assert_eq!(out["extension"][0]["display"], "kept");
    }

    #[test]
    fn empty_address_sequence_is_dropped() {
        let out = normalize_outbound(json!({ "address": [] }));
        assert!(out.get("address").is_none());
    }

    #[test]
    fn single_empty_line_is_stripped_from_the_first_address() {
        let out = normalize_outbound(json!({
            "address": [{ "line": [""], "city": "Santiago" }],
        }));
        assert!(out["address"][0].get("line").is_none());
        assert_eq!(out["address"][0]["city"], "Santiago");

        // A non-empty line stays.
        let out = normalize_outbound(json!({
            "address": [{ "line": ["Av. Providencia 1234"] }],
        }));
        assert_eq!(out["address"][0]["line"], json!(["Av. Providencia 1234"]));
    }

    #[test]
    fn non_object_bodies_pass_through() {
        assert_eq!(normalize_outbound(json!([1, 2])), json!([1, 2]));
        assert_eq!(normalize_outbound(Value::Null), Value::Null);
    }
}
