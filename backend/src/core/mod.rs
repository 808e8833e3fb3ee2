//! Core primitives shared by the engine

pub mod time;
