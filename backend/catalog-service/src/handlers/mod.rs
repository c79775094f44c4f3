pub mod admin;
pub mod auth;
pub mod health;
pub mod products;
pub mod tags;

pub use admin::{admin_info, admin_stats};
pub use auth::{login, me};
pub use health::health_check;
pub use products::{
    add_tag_to_product, create_product, delete_product, get_product, list_products,
    products_by_tag, remove_tag_from_product, search_products, update_product,
};
pub use tags::{create_tag, delete_tag, find_tag_by_name, get_tag, list_tags, update_tag};
