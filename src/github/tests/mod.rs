//! Unit tests for the GitHub module's identifiers and value types.

mod branch_reference;
