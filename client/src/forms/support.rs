//! Support ticket forms.

use serde::Deserialize;

use super::{empty_as_none, Form};
use crate::attachment::Attachment;
use crate::models::{MessageAttachment, NewMessage, NewTicket, TicketCategory, TicketPriority};
use crate::validation::FieldErrors;

const MESSAGE_MAX: usize = 5000;
const MAX_ATTACHMENTS: usize = 5;

fn message_attachments(attachments: &[Attachment]) -> Vec<MessageAttachment> {
    attachments
        .iter()
        .map(|a| MessageAttachment {
            name: a.file_name.clone(),
            url: a.reference().to_string(),
        })
        .collect()
}

fn check_attachments(errors: &mut FieldErrors, attachments: &[Attachment]) {
    if attachments.len() > MAX_ATTACHMENTS {
        errors.insert("attachments", format!("Не более {MAX_ATTACHMENTS} файлов"));
    }
}

/// "New ticket" modal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TicketForm {
    pub subject: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub category: Option<TicketCategory>,
    pub priority: TicketPriority,
    pub message: String,
    pub attachments: Vec<Attachment>,
}

impl Default for TicketForm {
    fn default() -> Self {
        Self {
            subject: String::new(),
            category: None,
            priority: TicketPriority::Medium,
            message: String::new(),
            attachments: Vec::new(),
        }
    }
}

impl Form for TicketForm {
    type Payload = NewTicket;

    const REQUIRED: &'static [&'static str] = &["subject", "category", "message"];

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("subject", &self.subject);
        errors.require_choice("category", &self.category);
        errors.require_text("message", &self.message);
        errors.check_max_len("message", &self.message, MESSAGE_MAX);
        check_attachments(&mut errors, &self.attachments);
        errors
    }

    fn build(&self, _is_draft: bool) -> NewTicket {
        NewTicket {
            subject: self.subject.trim().to_string(),
            category: self.category,
            priority: self.priority,
            message: self.message.trim().to_string(),
            attachments: message_attachments(&self.attachments),
        }
    }

    fn attachments(&self) -> Vec<&Attachment> {
        self.attachments.iter().collect()
    }
}

/// Reply box under a ticket thread.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplyForm {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl Form for ReplyForm {
    type Payload = NewMessage;

    const REQUIRED: &'static [&'static str] = &["text"];

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("text", &self.text);
        errors.check_max_len("text", &self.text, MESSAGE_MAX);
        check_attachments(&mut errors, &self.attachments);
        errors
    }

    fn build(&self, _is_draft: bool) -> NewMessage {
        NewMessage {
            text: self.text.trim().to_string(),
            attachments: message_attachments(&self.attachments),
        }
    }

    fn attachments(&self) -> Vec<&Attachment> {
        self.attachments.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::AttachmentData;

    #[test]
    fn test_ticket_defaults_to_medium_priority() {
        let form: TicketForm = serde_json::from_str(r#"{"subject":"Оплата","category":""}"#).unwrap();
        assert_eq!(form.priority, TicketPriority::Medium);
        assert!(form.category.is_none());
        let keys: Vec<_> = form.validate().keys().collect();
        assert_eq!(keys, vec!["category", "message"]);
    }

    #[test]
    fn test_ticket_payload_carries_attachments() {
        let form = TicketForm {
            subject: "Не проходит оплата".into(),
            category: Some(TicketCategory::Billing),
            priority: TicketPriority::Urgent,
            message: "Списали дважды".into(),
            attachments: vec![Attachment {
                file_name: "receipt.png".into(),
                mime_type: "image/png".into(),
                size_bytes: 1000,
                data: AttachmentData::DataUri("data:image/png;base64,AA".into()),
            }],
        };
        assert!(form.validate().is_empty());
        let payload = form.build(false);
        assert_eq!(payload.attachments.len(), 1);
        assert_eq!(payload.attachments[0].name, "receipt.png");
    }

    #[test]
    fn test_reply_requires_text() {
        assert!(ReplyForm::default().validate().contains("text"));
        let reply = ReplyForm { text: "Спасибо!".into(), attachments: Vec::new() };
        assert!(reply.is_valid());
    }
}
