//! Test modules for consent signalling
