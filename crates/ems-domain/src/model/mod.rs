//! Domain Models
//!
//! The vocabulary of EMS. Every name here should match how the
//! HTTP API and the store talk about employees.

pub mod employee;
