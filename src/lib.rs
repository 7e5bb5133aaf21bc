//! gpt-log: AI-written changelogs inside pull request descriptions
//!
//! Each run reads the changelog embedded in a pull request's description,
//! asks a text-generation service to describe every commit that has no entry
//! yet, and writes the extended log back. The log is kept in a hidden HTML
//! comment so the human-written part of the description is left alone.

pub mod auth;
pub mod changelog;
pub mod config;
pub mod error;
pub mod event;
pub mod generation;
pub mod platform;
pub mod progress;
pub mod types;
