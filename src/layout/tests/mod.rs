//! Unit tests for the layout module.
