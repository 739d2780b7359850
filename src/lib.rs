// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;

pub mod chart;
pub mod fetch;
pub mod file;
pub mod gui;
pub mod readings;
pub mod runner;
pub mod store;
