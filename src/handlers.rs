pub mod auth;
pub mod catalog;
pub mod customers;
pub mod dashboard;
pub mod discounts;
pub mod notifications;
pub mod sales;
pub mod staff;
