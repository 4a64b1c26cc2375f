//! # Data Transfer Objects
//!
//! ユースケースの入出力

pub mod responses;
