use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{AppError, Result};
use crate::models::{Product, ProductRequest};
use crate::services::TagService;

#[derive(Debug, Clone)]
struct ProductRecord {
    id: i64,
    name: String,
    description: Option<String>,
    price: f64,
    tag_ids: BTreeSet<i64>,
}

/// In-process product store. Product names are unique; tag attachments are
/// kept as ids and resolved through the tag service when rendering.
pub struct ProductService {
    products: RwLock<HashMap<i64, ProductRecord>>,
    next_id: AtomicI64,
    tags: Arc<TagService>,
}

impl ProductService {
    pub fn new(tags: Arc<TagService>) -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            tags,
        }
    }

    pub fn create(&self, request: ProductRequest) -> Result<Product> {
        let mut products = self.products.write().expect("product store lock poisoned");

        if products.values().any(|p| p.name == request.name) {
            return Err(AppError::Conflict(format!(
                "Product with name '{}' already exists",
                request.name
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = ProductRecord {
            id,
            name: request.name,
            description: request.description,
            price: request.price,
            tag_ids: BTreeSet::new(),
        };
        let product = self.render(&record);
        products.insert(id, record);
        Ok(product)
    }

    pub fn list(&self) -> Vec<Product> {
        let products = self.products.read().expect("product store lock poisoned");
        let mut all: Vec<Product> = products.values().map(|record| self.render(record)).collect();
        all.sort_by_key(|product| product.id);
        all
    }

    pub fn get(&self, id: i64) -> Result<Product> {
        let products = self.products.read().expect("product store lock poisoned");
        products
            .get(&id)
            .map(|record| self.render(record))
            .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))
    }

    pub fn update(&self, id: i64, request: ProductRequest) -> Result<Product> {
        let mut products = self.products.write().expect("product store lock poisoned");

        if products
            .values()
            .any(|p| p.id != id && p.name == request.name)
        {
            return Err(AppError::Conflict(format!(
                "Product with name '{}' already exists",
                request.name
            )));
        }

        let record = products
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;
        record.name = request.name;
        record.description = request.description;
        record.price = request.price;
        Ok(self.render(record))
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let mut products = self.products.write().expect("product store lock poisoned");
        products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))
    }

    /// Case-insensitive substring search on product names.
    pub fn search_by_name(&self, fragment: &str) -> Vec<Product> {
        let needle = fragment.to_lowercase();
        let products = self.products.read().expect("product store lock poisoned");
        let mut found: Vec<Product> = products
            .values()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .map(|record| self.render(record))
            .collect();
        found.sort_by_key(|product| product.id);
        found
    }

    /// All products carrying the tag with the given name.
    pub fn find_by_tag_name(&self, tag_name: &str) -> Result<Vec<Product>> {
        let tag = self.tags.find_by_name(tag_name)?;
        let products = self.products.read().expect("product store lock poisoned");
        let mut found: Vec<Product> = products
            .values()
            .filter(|record| record.tag_ids.contains(&tag.id))
            .map(|record| self.render(record))
            .collect();
        found.sort_by_key(|product| product.id);
        Ok(found)
    }

    pub fn add_tag(&self, product_id: i64, tag_id: i64) -> Result<Product> {
        // The tag must exist before it can be attached.
        self.tags.get(tag_id)?;

        let mut products = self.products.write().expect("product store lock poisoned");
        let record = products
            .get_mut(&product_id)
            .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", product_id)))?;
        record.tag_ids.insert(tag_id);
        Ok(self.render(record))
    }

    pub fn remove_tag(&self, product_id: i64, tag_id: i64) -> Result<Product> {
        let mut products = self.products.write().expect("product store lock poisoned");
        let record = products
            .get_mut(&product_id)
            .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", product_id)))?;

        if !record.tag_ids.remove(&tag_id) {
            return Err(AppError::NotFound(format!(
                "Tag with id {} is not attached to product {}",
                tag_id, product_id
            )));
        }
        Ok(self.render(record))
    }

    /// Drop a deleted tag from every product that carried it.
    pub fn detach_tag(&self, tag_id: i64) {
        let mut products = self.products.write().expect("product store lock poisoned");
        for record in products.values_mut() {
            record.tag_ids.remove(&tag_id);
        }
    }

    pub fn count(&self) -> usize {
        self.products
            .read()
            .expect("product store lock poisoned")
            .len()
    }

    fn render(&self, record: &ProductRecord) -> Product {
        let tags = record
            .tag_ids
            .iter()
            .filter_map(|id| self.tags.get_opt(*id))
            .collect();

        Product {
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
            price: record.price,
            tags,
        }
    }
}
