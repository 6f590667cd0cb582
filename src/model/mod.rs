pub mod accessors;
pub mod algorithm;
pub mod attribute_path;
pub mod column;
pub mod data_core;
pub mod diagram;
pub mod error;
pub mod filter;
pub mod performance;
pub mod selective_view;
pub mod transform;
pub mod tree;
