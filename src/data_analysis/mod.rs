// src/data_analysis/mod.rs

pub mod speed_band;

// src/data_analysis/mod.rs
