pub mod catalog;
pub mod clock;
pub mod favorites;
pub mod gamification;
pub mod models;
pub mod service;
pub mod store;
pub mod wellness;
