//! Output writers for harvest results.
//!
//! # Submodules
//!
//! - [`json`]: Writes one run's articles, errors and stats to a JSON file
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── 2025-05-06/
//! │   ├── india_general.json
//! │   ├── india_sports.json
//! │   └── global_higher_education.json
//! ```

pub mod json;
