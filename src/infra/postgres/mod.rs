pub mod inventory_repo;
pub mod notification_repo;
pub mod ticket_repo;
