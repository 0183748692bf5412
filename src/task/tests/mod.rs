//! Unit tests for the task module.
