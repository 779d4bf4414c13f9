pub mod auth;
pub mod catalog;
pub mod customer;
pub mod dashboard;
pub mod discount;
pub mod notification;
pub mod sale;
pub mod staff;
