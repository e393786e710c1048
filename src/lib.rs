//! Shared test and benchmark utilities for the MAC sanitizer workspace.

pub mod bench_support;
