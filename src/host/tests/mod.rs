//! Test modules for page hosts
