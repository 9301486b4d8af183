pub mod auth;
pub mod base;
pub mod catalog;
pub mod empresa;
