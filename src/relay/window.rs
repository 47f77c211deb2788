use crate::openai::{Message, Role};

/// The last `window` messages of the history, or all of them when
/// there are fewer. A window of 0 is always empty.
pub fn trailing_window(history: &[Message], window: usize) -> &[Message] {
    let start = history.len().saturating_sub(window);
    &history[start..]
}

/// Build the conversation sent to the model: the system message
/// followed by the most recent `window` messages of the history in
/// their original order.
pub fn outbound_conversation(
    system_message: &str,
    history: &[Message],
    window: usize,
) -> Vec<Message> {
    let recent = trailing_window(history, window);
    let mut conversation = Vec::with_capacity(recent.len() + 1);
    conversation.push(Message::new(Role::System, system_message));
    conversation.extend_from_slice(recent);
    conversation
}
