// src/lib.rs

//! Sitemap Extractor Library

pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod services;
pub mod utils;
