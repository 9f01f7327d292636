//! Unit tests for tenant clients.

mod publisher_tests;
