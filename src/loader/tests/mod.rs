//! Test modules for container script loading
//!
//! Tests are organized by component.

mod markup;
mod script;
