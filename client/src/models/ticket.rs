//! Support tickets and their message threads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::error::ModelError;

wire_enum! {
    pub enum TicketCategory as "ticket category" {
        Technical => "technical",
        Billing => "billing",
        Account => "account",
        Content => "content",
        Promotion => "promotion",
        Other => "other",
    }
}

wire_enum! {
    pub enum TicketPriority as "ticket priority" {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

wire_enum! {
    /// Ticket lifecycle as tracked by support staff.
    pub enum TicketStatus as "ticket status" {
        Open => "open",
        InProgress => "in_progress",
        WaitingResponse => "waiting_response",
        Resolved => "resolved",
        Closed => "closed",
    }
}

impl TicketStatus {
    /// Resolved and closed tickets accept a rating but no new messages.
    pub fn is_finished(&self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }
}

wire_enum! {
    pub enum SenderRole as "sender role" {
        User => "user",
        Support => "support",
        Admin => "admin",
    }
}

/// File attached to a ticket message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAttachment {
    pub name: String,
    pub url: String,
}

/// One entry of a ticket thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: SenderRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
}

/// A support ticket as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: String,
    pub subject: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// Oldest first.
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for SupportTicket {
    fn id(&self) -> &str {
        &self.id
    }
}

impl SupportTicket {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether the last word in the thread is from staff.
    pub fn has_unread_reply(&self) -> bool {
        self.last_message().is_some_and(|m| m.sender != SenderRole::User)
    }

    /// Appends a message, keeping the thread ordered by timestamp.
    pub fn push_message(&mut self, message: Message) {
        self.updated_at = self.updated_at.max(message.timestamp);
        let pos = self
            .messages
            .partition_point(|m| m.timestamp <= message.timestamp);
        self.messages.insert(pos, message);
    }

    /// Records a 1-5 satisfaction rating.
    pub fn rate(&mut self, rating: u8) -> Result<(), ModelError> {
        validate_rating(rating)?;
        self.rating = Some(rating);
        Ok(())
    }
}

/// Ratings are 1 to 5 stars.
pub fn validate_rating(rating: u8) -> Result<u8, ModelError> {
    if (1..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err(ModelError::InvalidRating(rating))
    }
}

/// Payload for `POST /tickets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub subject: String,
    pub category: Option<TicketCategory>,
    pub priority: TicketPriority,
    pub message: String,
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
}

/// Payload for `POST /tickets/{id}/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn message(id: &str, sender: SenderRole, minute: u32) -> Message {
        Message {
            id: id.into(),
            sender,
            text: format!("message {id}"),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0).unwrap(),
            attachments: Vec::new(),
        }
    }

    fn ticket() -> SupportTicket {
        SupportTicket {
            id: "t-1".into(),
            subject: "Не загружается видео".into(),
            category: TicketCategory::Technical,
            priority: TicketPriority::High,
            status: TicketStatus::Open,
            messages: vec![message("m1", SenderRole::User, 0), message("m2", SenderRole::Support, 10)],
            rating: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 10, 0).unwrap(),
        }
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&TicketStatus::WaitingResponse).unwrap(), "\"waiting_response\"");
        assert_eq!(TicketStatus::ALL.len(), 5);
    }

    #[test]
    fn test_push_message_keeps_order() {
        let mut t = ticket();
        t.push_message(message("m3", SenderRole::User, 5));
        let ids: Vec<_> = t.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m3", "m2"]);
        assert!(t.has_unread_reply());

        t.push_message(message("m4", SenderRole::User, 20));
        assert!(!t.has_unread_reply());
        assert_eq!(t.updated_at, Utc.with_ymd_and_hms(2026, 3, 1, 12, 20, 0).unwrap());
    }

    #[test]
    fn test_rating_bounds() {
        let mut t = ticket();
        assert_eq!(t.rate(0), Err(ModelError::InvalidRating(0)));
        assert_eq!(t.rate(6), Err(ModelError::InvalidRating(6)));
        assert!(t.rate(5).is_ok());
        assert_eq!(t.rating, Some(5));
    }
}
