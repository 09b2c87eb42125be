// src/data_input/mod.rs

pub mod log_data;
pub mod log_reader;
pub mod sample_extractor;

// src/data_input/mod.rs
