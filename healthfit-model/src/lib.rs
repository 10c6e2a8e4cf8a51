pub mod chat;
pub mod energy;
pub mod meal;
pub mod profile;
pub mod user;
pub mod workout;
