//! Network services
//!
//! This module provides the local wireless (`nwm::`) service tables.

pub mod nwm;
