#![allow(clippy::too_many_arguments)]

pub mod error;
pub mod validation;
pub mod config;
pub mod logging;
pub mod model;
pub mod db;
pub mod ops;
pub mod queries;
pub mod access;
pub mod migrate;
pub mod cli;
