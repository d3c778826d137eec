//! Library crate for sideline-tracker, exposing modules for the operator console and tests.

pub mod commands;
pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod services;
pub mod state;
