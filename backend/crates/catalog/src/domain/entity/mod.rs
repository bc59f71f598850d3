//! Entity Module

pub mod completion;
pub mod course;
pub mod module;
