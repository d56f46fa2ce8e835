//! Board state kernel: selection, grid generation, annotation, phase flow.

pub mod board;
pub mod catalog;

pub use board::{unix_millis, GameBoard};
