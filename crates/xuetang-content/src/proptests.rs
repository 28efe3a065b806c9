//! Property-based tests for the content schema.
