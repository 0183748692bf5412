//! Step definitions for dependency editing scenarios.


mod given;
mod then;
mod when;
