// Service exports
pub mod memory;
pub mod notifier;
pub mod postgres;
pub mod reminders;
pub mod store;
pub mod whatsapp;

pub use memory::InMemoryStore;
pub use notifier::{MatchNotifier, MessageSender};
pub use postgres::PostgresClient;
pub use reminders::{ReminderSweep, SweepReport};
pub use store::{ContactStore, FlagUpdate, MatchStore, RequestStore, StoreError};
pub use whatsapp::{WhatsAppClient, WhatsAppError};
