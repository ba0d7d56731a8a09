//! Paycheck estimation engine
//!
//! This crate derives semi-monthly fiscal pay periods, aggregates the shift
//! and call records stored for each day of a period, reconciles unrecorded
//! overtime against call logs, and prices the result with a configured rate
//! table.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
