//! Unit tests for relational provisioning.

mod scripts_tests;
