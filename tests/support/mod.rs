#![allow(dead_code)]

pub mod callgrade_env;
