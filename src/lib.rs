// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod core;
pub mod gui;
pub mod page;
pub mod render;
pub mod runner;
pub mod visibility;
