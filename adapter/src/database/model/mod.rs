pub mod admin;
pub mod contact;
pub mod outbox;
pub mod reservation;
