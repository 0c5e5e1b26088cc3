//! Task-list demo for the tabula browser.
//!
//! Seeds a mock task collection, defines the task columns and wires a
//! browser over them. The binary drives a short scripted session.

pub mod browse;
pub mod columns;
pub mod model;
pub mod seed;
