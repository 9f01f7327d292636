//! Unit tests for coordination tree paths, adapters, and publishing.
