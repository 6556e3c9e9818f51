pub mod assessment;
pub mod health;
pub mod insight;
pub mod vitals;
