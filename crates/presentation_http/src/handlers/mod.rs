//! HTTP request handlers

pub mod chaos;
pub mod demo;
pub mod health;
