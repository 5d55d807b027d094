//! Application module

pub mod startup;
