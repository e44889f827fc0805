//! Staff document expiry reports.
//!
//! This crate extracts the employees of a business location from a staff
//! roster workbook, looks up their registration and work permit records,
//! computes how long each document remains valid, and writes the result as a
//! report workbook. A CLI, a password-gated HTTP API and a weekly scheduler
//! trigger the reports.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod extraction;
pub mod models;
pub mod schedule;
pub mod summary;
pub mod workbook;
