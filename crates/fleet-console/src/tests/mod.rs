//! Test suites for the console.

mod support;
