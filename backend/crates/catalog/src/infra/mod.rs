//! Infrastructure Layer

pub mod cloudinary;
pub mod memory;
pub mod postgres;

pub use cloudinary::CloudinaryImageStore;
pub use memory::InMemoryCatalogRepository;
pub use postgres::PgCatalogRepository;
