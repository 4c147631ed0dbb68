pub mod dashboard;
pub mod info;
pub mod parse;
pub mod predict;
pub mod ratios;
