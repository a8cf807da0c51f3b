#![allow(dead_code)]

pub mod canvas;
pub mod fixtures;
