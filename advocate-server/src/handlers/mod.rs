pub mod advocates;
pub mod health;
pub mod seed;
