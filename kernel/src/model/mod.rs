pub mod admin;
pub mod auth;
pub mod contact;
pub mod hours;
pub mod id;
pub mod notification;
pub mod outbox;
pub mod reservation;
