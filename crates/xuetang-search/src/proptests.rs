//! Property-based tests for filtering, search, and domain detection.
