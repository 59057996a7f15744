//! Test modules for the data layer queue
//!
//! Tests are organized by component.
