//! Unit tests for cluster configuration documents and services.
