// src/gui/components/mod.rs
pub mod controls;
pub mod listing_table;
