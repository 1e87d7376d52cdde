pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod health;
pub mod reservation;
