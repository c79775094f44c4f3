use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use crate::error::{AppError, Result};
use crate::models::{Tag, TagRequest};

/// In-process tag store. Tag names are unique.
pub struct TagService {
    tags: RwLock<HashMap<i64, Tag>>,
    next_id: AtomicI64,
}

impl TagService {
    pub fn new() -> Self {
        Self {
            tags: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn create(&self, request: TagRequest) -> Result<Tag> {
        let mut tags = self.tags.write().expect("tag store lock poisoned");

        if tags.values().any(|tag| tag.name == request.name) {
            return Err(AppError::Conflict(format!(
                "Tag with name '{}' already exists",
                request.name
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tag = Tag {
            id,
            name: request.name,
        };
        tags.insert(id, tag.clone());
        Ok(tag)
    }

    pub fn list(&self) -> Vec<Tag> {
        let tags = self.tags.read().expect("tag store lock poisoned");
        let mut all: Vec<Tag> = tags.values().cloned().collect();
        all.sort_by_key(|tag| tag.id);
        all
    }

    pub fn get(&self, id: i64) -> Result<Tag> {
        self.get_opt(id)
            .ok_or_else(|| AppError::NotFound(format!("Tag with id {} not found", id)))
    }

    pub(crate) fn get_opt(&self, id: i64) -> Option<Tag> {
        let tags = self.tags.read().expect("tag store lock poisoned");
        tags.get(&id).cloned()
    }

    pub fn update(&self, id: i64, request: TagRequest) -> Result<Tag> {
        let mut tags = self.tags.write().expect("tag store lock poisoned");

        if tags
            .values()
            .any(|tag| tag.id != id && tag.name == request.name)
        {
            return Err(AppError::Conflict(format!(
                "Tag with name '{}' already exists",
                request.name
            )));
        }

        let tag = tags
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Tag with id {} not found", id)))?;
        tag.name = request.name;
        Ok(tag.clone())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let mut tags = self.tags.write().expect("tag store lock poisoned");
        tags.remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Tag with id {} not found", id)))
    }

    pub fn find_by_name(&self, name: &str) -> Result<Tag> {
        let tags = self.tags.read().expect("tag store lock poisoned");
        tags.values()
            .find(|tag| tag.name == name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Tag with name '{}' not found", name)))
    }

    pub fn count(&self) -> usize {
        self.tags.read().expect("tag store lock poisoned").len()
    }
}

impl Default for TagService {
    fn default() -> Self {
        Self::new()
    }
}
