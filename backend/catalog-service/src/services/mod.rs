mod product_service;
mod tag_service;

pub use product_service::ProductService;
pub use tag_service::TagService;
