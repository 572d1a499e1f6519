// src/lib.rs

pub mod extract;
pub mod mcf;
pub mod registry;

pub use extract::extract_denominators;
pub use mcf::{render_mcf, write_mcf};
pub use registry::{check_dcid_existence, missing_dcids};
