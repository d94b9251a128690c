//! Integration test modules

mod config_integration;
mod end_to_end;
mod timeout;
