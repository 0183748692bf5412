//! Unit tests for the dependency module.
