//! Unit tests for the service implementations
