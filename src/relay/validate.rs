//! Structural checks on the incoming chat payload

use serde_json::Value;

use super::RelayError;
use crate::openai::Message;

/// Parse a raw request body into a conversation.
///
/// The body must be a JSON object with a `messages` field, otherwise
/// it's an `InvalidPayload`. Every element of `messages` must be an
/// object with `role` and `content` keys, otherwise it's an
/// `InvalidMessageFormat`. Elements are otherwise forwarded as sent:
/// `content` may be `null` or a list of content parts, extra keys are
/// kept and roles are not restricted to the ones the API documents.
pub fn parse_conversation(body: &[u8]) -> Result<Vec<Message>, RelayError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| RelayError::InvalidPayload)?;
    let messages = payload
        .as_object()
        .and_then(|obj| obj.get("messages"))
        .ok_or(RelayError::InvalidPayload)?;

    messages
        .as_array()
        .ok_or(RelayError::InvalidMessageFormat)?
        .iter()
        .map(|item| to_message(item).ok_or(RelayError::InvalidMessageFormat))
        .collect()
}

fn to_message(item: &Value) -> Option<Message> {
    let obj = item.as_object()?;
    if !obj.contains_key("role") || !obj.contains_key("content") {
        return None;
    }
    // Only the role has to be a string, it's what `Role` is built from
    serde_json::from_value(item.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::Role;
    use serde_json::json;

    fn parse(value: Value) -> Result<Vec<Message>, RelayError> {
        parse_conversation(value.to_string().as_bytes())
    }

    #[test]
    fn it_parses_a_conversation_in_order() {
        let messages = parse(json!({
            "messages": [
                {"role": "user", "content": "Hi"},
                {"role": "assistant", "content": "Hello"},
                {"role": "user", "content": "How are you?"}
            ]
        }))
        .unwrap();

        assert_eq!(
            messages,
            vec![
                Message::new(Role::User, "Hi"),
                Message::new(Role::Assistant, "Hello"),
                Message::new(Role::User, "How are you?"),
            ]
        );
    }

    #[test]
    fn it_accepts_an_empty_conversation() {
        let messages = parse(json!({"messages": []})).unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn it_keeps_extra_message_fields() {
        let messages = parse(json!({
            "session": "abc",
            "messages": [{"role": "user", "content": "Hi", "name": "alex"}]
        }))
        .unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "Hi");
        assert_eq!(messages[0].extra.get("name"), Some(&json!("alex")));
    }

    #[test]
    fn it_accepts_content_that_is_not_a_string() {
        let parts = json!([{"type": "text", "text": "hi"}]);
        let messages = parse(json!({
            "messages": [
                {"role": "user", "content": parts.clone()},
                {"role": "assistant", "content": null, "tool_calls": []}
            ]
        }))
        .unwrap();

        assert_eq!(messages[0].content, parts);
        assert_eq!(messages[1].content, Value::Null);
        assert_eq!(messages[1].extra.get("tool_calls"), Some(&json!([])));
    }

    #[test]
    fn it_keeps_unknown_roles() {
        let messages = parse(json!({"messages": [{"role": "narrator", "content": "Once"}]})).unwrap();
        assert_eq!(messages[0].role, Role::Other("narrator".to_string()));
    }

    #[test]
    fn it_rejects_bodies_without_messages() {
        assert!(matches!(parse(json!({})), Err(RelayError::InvalidPayload)));
        assert!(matches!(
            parse(json!({"message": "hi"})),
            Err(RelayError::InvalidPayload)
        ));
        assert!(matches!(
            parse(json!(["messages"])),
            Err(RelayError::InvalidPayload)
        ));
        assert!(matches!(parse(json!(null)), Err(RelayError::InvalidPayload)));
    }

    #[test]
    fn it_rejects_malformed_json() {
        assert!(matches!(
            parse_conversation(b"{\"messages\": ["),
            Err(RelayError::InvalidPayload)
        ));
        assert!(matches!(
            parse_conversation(b""),
            Err(RelayError::InvalidPayload)
        ));
    }

    #[test]
    fn it_rejects_messages_that_are_not_a_list() {
        assert!(matches!(
            parse(json!({"messages": "hi"})),
            Err(RelayError::InvalidMessageFormat)
        ));
        assert!(matches!(
            parse(json!({"messages": null})),
            Err(RelayError::InvalidMessageFormat)
        ));
    }

    #[test]
    fn it_rejects_malformed_messages() {
        let cases = vec![
            json!({"messages": [{"role": "user"}]}),
            json!({"messages": [{"content": "hi"}]}),
            json!({"messages": ["hi"]}),
            json!({"messages": [{"role": "user", "content": "hi"}, 42]}),
            json!({"messages": [{"role": 1, "content": "hi"}]}),
            json!({"messages": [{"role": null, "content": "hi"}]}),
        ];

        for case in cases {
            assert!(
                matches!(parse(case.clone()), Err(RelayError::InvalidMessageFormat)),
                "expected invalid message format for {}",
                case
            );
        }
    }
}
