//! Configuration, request/response models and option storage

pub mod config;
pub mod models;
pub mod options;
