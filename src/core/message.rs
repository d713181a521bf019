//! # Transcript
//!
//! Message history for one session. The transcript is strictly append-only:
//! once a message is in, it is never edited or removed, and ids grow
//! monotonically so insertion order and display order always agree.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Assistant => "assistant",
        }
    }
}

/// A citation attached to an assistant reply. Immutable once constructed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Reference {
    pub id: String,
    pub title: String,
    pub url: String,
    pub domain: String,
    pub snippet: String,
}

/// One entry in the transcript.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    /// Unique within the session, monotonic by creation.
    pub id: u64,
    pub role: Role,
    pub content: String,
    /// Catalog id of the model this message was addressed to / produced by.
    pub model_id: String,
    /// Citations carried by assistant replies. Empty for user messages and
    /// for replies from offline models.
    pub references: Vec<Reference>,
}

impl Message {
    pub fn has_references(&self) -> bool {
        !self.references.is_empty()
    }
}

/// Append-only message container and id allocator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, role: Role, content: String, model_id: String, references: Vec<Reference>) -> &Message {
        let message = Message {
            id: self.next_id,
            role,
            content,
            model_id,
            references,
        };
        self.next_id += 1;
        self.messages.push(message);
        self.messages.last().expect("just pushed")
    }

    pub fn push_user(&mut self, content: String, model_id: String) -> &Message {
        self.push(Role::User, content, model_id, Vec::new())
    }

    pub fn push_assistant(
        &mut self,
        content: String,
        model_id: String,
        references: Vec<Reference>,
    ) -> &Message {
        self.push(Role::Assistant, content, model_id, references)
    }

    pub fn get(&self, id: u64) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Count of messages with the given role.
    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(id: &str) -> Reference {
        Reference {
            id: id.to_string(),
            title: "A title".to_string(),
            url: "https://example.com".to_string(),
            domain: "example.com".to_string(),
            snippet: "A snippet.".to_string(),
        }
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut t = Transcript::new();
        let a = t.push_user("one".to_string(), "local".to_string()).id;
        let b = t
            .push_assistant("two".to_string(), "local".to_string(), Vec::new())
            .id;
        let c = t.push_user("three".to_string(), "local".to_string()).id;
        assert!(a < b && b < c);
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let mut t = Transcript::new();
        t.push_user("first".to_string(), "search".to_string());
        t.push_assistant("second".to_string(), "search".to_string(), Vec::new());
        let contents: Vec<&str> = t.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_get_by_id() {
        let mut t = Transcript::new();
        t.push_user("hello".to_string(), "entity".to_string());
        let id = t
            .push_assistant("hi".to_string(), "entity".to_string(), vec![reference("r1")])
            .id;

        let found = t.get(id).unwrap();
        assert_eq!(found.role, Role::Assistant);
        assert!(found.has_references());
        assert!(t.get(999).is_none());
    }

    #[test]
    fn test_count_role() {
        let mut t = Transcript::new();
        t.push_user("a".to_string(), "local".to_string());
        t.push_user("b".to_string(), "local".to_string());
        t.push_assistant("c".to_string(), "local".to_string(), Vec::new());
        assert_eq!(t.count_role(Role::User), 2);
        assert_eq!(t.count_role(Role::Assistant), 1);
    }

    #[test]
    fn test_user_messages_carry_no_references() {
        let mut t = Transcript::new();
        let msg = t.push_user("q".to_string(), "search".to_string());
        assert!(!msg.has_references());
    }
}
