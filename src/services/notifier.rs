use crate::models::{Match, Role, UserId};
use crate::services::store::{ContactStore, RequestStore, StoreError};
use crate::services::whatsapp::{
    confirmation_reminder_message, match_finalized_message, WhatsAppClient, WhatsAppError,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Outbound text channel
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, phone: &str, message: &str) -> Result<(), WhatsAppError>;
}

#[async_trait]
impl MessageSender for WhatsAppClient {
    async fn send(&self, phone: &str, message: &str) -> Result<(), WhatsAppError> {
        self.send_message(phone, message).await
    }
}

/// Best-effort notifications to the parties of a match
///
/// Failures are logged and swallowed; a notification never fails the
/// operation that triggered it.
#[derive(Clone)]
pub struct MatchNotifier {
    sender: Arc<dyn MessageSender>,
    contacts: Arc<dyn ContactStore>,
    requests: Arc<dyn RequestStore>,
}

impl MatchNotifier {
    pub fn new(
        sender: Arc<dyn MessageSender>,
        contacts: Arc<dyn ContactStore>,
        requests: Arc<dyn RequestStore>,
    ) -> Self {
        Self {
            sender,
            contacts,
            requests,
        }
    }

    /// Tell both parties their match is finalized
    pub async fn notify_finalized(&self, record: &Match) {
        let request = match self.requests.get_request(record.student_request_id).await {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Skipping finalization notice for match {}: {}", record.id, e);
                return;
            }
        };

        let message = match_finalized_message(&request.location);
        self.send_to(record.host_id, &message).await;
        self.send_to(request.student_id, &message).await;
    }

    /// Remind each party that has not confirmed yet; returns messages sent
    pub async fn remind_pending(&self, record: &Match) -> Result<usize, StoreError> {
        let message = confirmation_reminder_message();
        let mut sent = 0;

        if !record.is_confirmed_by(Role::Host) && self.send_to(record.host_id, &message).await {
            sent += 1;
        }

        if !record.is_confirmed_by(Role::Student) {
            let student_id = self.requests.get_request(record.student_request_id).await?.student_id;
            if self.send_to(student_id, &message).await {
                sent += 1;
            }
        }

        Ok(sent)
    }

    async fn send_to(&self, user_id: UserId, message: &str) -> bool {
        let contact = match self.contacts.get_contact(user_id).await {
            Ok(Some(contact)) => contact,
            Ok(None) => {
                tracing::warn!("No contact on file for user {}", user_id);
                return false;
            }
            Err(e) => {
                tracing::warn!("Failed to look up contact for user {}: {}", user_id, e);
                return false;
            }
        };

        match self.sender.send(&contact.phone, message).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to notify user {}: {}", user_id, e);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tokio::sync::Mutex;

    /// Sender that records every message instead of sending it
    #[derive(Default)]
    pub struct RecordingSender {
        pub sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl MessageSender for RecordingSender {
        async fn send(&self, phone: &str, message: &str) -> Result<(), WhatsAppError> {
            self.sent.lock().await.push((phone.to_string(), message.to_string()));
            Ok(())
        }
    }
}
