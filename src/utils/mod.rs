//! Utility helpers shared by the binary and services

pub mod app_paths;
