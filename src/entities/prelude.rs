pub use super::log_entries::Entity as LogEntries;
pub use super::users::Entity as Users;
