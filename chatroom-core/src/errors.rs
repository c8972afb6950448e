pub mod join_error;
pub mod message_error;
