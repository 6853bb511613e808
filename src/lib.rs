#![cfg_attr(not(test), no_std)]

pub mod gesture;
pub mod layers;
pub mod status;
pub mod telemetry;
