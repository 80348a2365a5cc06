pub mod config;
pub mod easings;
pub mod run;
pub mod simulate;
