pub mod block_validation;
pub mod config;
pub mod sequencer;
pub mod services;
