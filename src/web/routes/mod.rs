pub mod health;
pub mod overview;
