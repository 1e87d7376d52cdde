pub mod admin;
pub mod auth;
pub mod contact;
pub mod health;
pub mod reservation;
pub mod v1;
