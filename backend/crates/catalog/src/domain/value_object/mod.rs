//! Value Object Module

pub mod image_link;
pub mod percentage;
pub mod price;
pub mod text;
