// ABOUTME: Library crate for the demo scheduler exposing the wizard, models, and host for testing

#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod models;
