pub mod error;
pub mod id;
pub mod money;
pub mod notification;
pub mod oracle;
pub mod signature;
pub mod status;
pub mod store;
pub mod ticket;
