pub mod auth;
pub mod catalog_service;
pub mod empresa_service;
pub mod password_policy;
pub mod token;
