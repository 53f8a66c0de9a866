pub mod account;
pub mod messages;
