//! Conversation history for an ongoing chat.
//!
//! The DeepSeek API does not keep any state remotely, so every request carries the full
//! [`Transcript`]. The transcript alternates user and assistant turns, starting with a user
//! turn: a user turn is pushed before a completion is requested and must either be answered with
//! [`Transcript::push_assistant`] or withdrawn with [`Transcript::rollback`].
//!
//! ## Example
//!
//! ```
//! use redraft::{Api, Role, Transcript};
//!
//! let api = Api::new("sk-...");
//! let mut transcript = Transcript::new();
//!
//! transcript.push_user("Hello!");
//! let http_request = transcript.request(&api).unwrap();
//! assert!(http_request.body.contains("Hello!"));
//!
//! // ... send http_request, then record the (possibly edited) reply ...
//! transcript.push_assistant("Hi there");
//!
//! assert_eq!(transcript.len(), 2);
//! assert_eq!(transcript.history()[1].role, Role::Assistant);
//! ```

use crate::{
    Api, ChatRequestBuilder,
    deepseek::{Message, Role},
    http_request::HttpRequest,
};

/// The ordered message history of a conversation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: im::Vector<Message>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user turn.
    pub fn push_user<S: Into<String>>(&mut self, text: S) {
        debug_assert!(self.expects(Role::User), "user turn out of order");
        self.messages
            .push_back(Message::from_text(Role::User, text));
    }

    /// Appends an assistant turn.
    pub fn push_assistant<S: Into<String>>(&mut self, text: S) {
        debug_assert!(self.expects(Role::Assistant), "assistant turn out of order");
        self.messages
            .push_back(Message::from_text(Role::Assistant, text));
    }

    /// Removes the most recent turn if it is an unanswered user turn.
    ///
    /// Returns the removed turn. Answered turns are never removed.
    pub fn rollback(&mut self) -> Option<Message> {
        match self.messages.last() {
            Some(message) if message.role == Role::User => self.messages.pop_back(),
            _ => None,
        }
    }

    /// Builds the HTTP request asking for a completion of the whole transcript.
    pub fn request(&self, api: &Api) -> Result<HttpRequest, serde_json::Error> {
        ChatRequestBuilder::new()
            .set_messages(self.messages.clone())
            .build(api)
    }

    /// Returns the message history.
    pub fn history(&self) -> &im::Vector<Message> {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the role the next turn must have.
    fn expects(&self, role: Role) -> bool {
        let next = match self.messages.last() {
            None => Role::User,
            Some(message) if message.role == Role::User => Role::Assistant,
            Some(_) => Role::User,
        };
        next == role
    }
}

#[cfg(test)]
mod tests {
    use super::Transcript;
    use crate::{Api, Role, deepseek::Message};

    #[test]
    fn test_rollback_removes_unanswered_user_turn() {
        let mut transcript = Transcript::new();
        transcript.push_user("Hello");
        transcript.push_assistant("Hi there");
        transcript.push_user("How are you?");

        let removed = transcript.rollback().expect("should remove user turn");
        assert_eq!(removed, Message::from_text(Role::User, "How are you?"));
        assert_eq!(transcript.len(), 2);

        // The answered exchange stays put.
        assert!(transcript.rollback().is_none());
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_rollback_on_empty_transcript() {
        let mut transcript = Transcript::new();
        assert!(transcript.rollback().is_none());
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_request_contains_full_history_in_order() {
        let api = Api::new("sk-test");
        let mut transcript = Transcript::new();
        transcript.push_user("first");
        transcript.push_assistant("second");
        transcript.push_user("third");

        let http_request = transcript.request(&api).expect("should build request");
        let body: serde_json::Value =
            serde_json::from_str(&http_request.body).expect("body should be json");

        let messages = body["messages"].as_array().expect("messages array");
        let turns: Vec<(&str, &str)> = messages
            .iter()
            .map(|m| (m["role"].as_str().unwrap(), m["content"].as_str().unwrap()))
            .collect();
        assert_eq!(
            turns,
            vec![
                ("user", "first"),
                ("assistant", "second"),
                ("user", "third")
            ]
        );
    }
}
