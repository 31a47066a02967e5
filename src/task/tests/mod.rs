//! Unit tests for the task lifecycle module.

mod service_tests;
