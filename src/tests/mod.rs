pub mod support;

pub mod config;
