pub mod auth;
pub mod contact;
pub mod health;
pub mod outbox;
pub mod reservation;
