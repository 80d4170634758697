// src/lib.rs
//! Fileshuttle - a paginated file browser that streams files in chunks.
//!
//! Drives are browsed a page at a time through the [`fs::FileSystem`]
//! adapter, and a selected file is sent to another application as a series
//! of fixed-size text messages paced by a periodic task.

pub mod app;
pub mod browse;
pub mod config;
pub mod error;
pub mod fs;
pub mod transfer;
pub mod ui;
