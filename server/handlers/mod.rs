pub mod classify;
pub mod health;
