pub mod cpa;
pub mod dataset;
pub mod error;
pub mod leakage_model;
pub mod loader;
pub mod util;
