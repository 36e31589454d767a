use sqlx::SqlitePool;

use crate::constants::MAX_CATEGORY_TITLE_LENGTH;
use crate::db::queries::categories;
use crate::db::{Category, CategoryUpdate};
use crate::error::{Entity, Error, Result};
use crate::validators::{validate_required_text, ValidationError};

pub(crate) fn validate_category_title(title: &str) -> std::result::Result<(), ValidationError> {
    validate_required_text("title", title, MAX_CATEGORY_TITLE_LENGTH)
}

#[derive(Clone)]
pub struct CategoryService {
    pool: SqlitePool,
}

impl CategoryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        Ok(categories::get_all_categories(&self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Category> {
        categories::get_category(&self.pool, id)
            .await?
            .ok_or_else(|| Error::not_found(Entity::Category, id))
    }

    /// Fails with a validation error when the title is already taken.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, title: &str) -> Result<Category> {
        validate_category_title(title)?;
        let id = categories::create_category(&self.pool, title)
            .await
            .map_err(|err| Error::from_write(err, Entity::Category, Some(title)))?;
        tracing::info!(id, "Category created");
        self.get(id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i64, update: CategoryUpdate) -> Result<Category> {
        let mut category = self.get(id).await?;
        update.apply(&mut category);
        validate_category_title(&category.title)?;
        categories::update_category(&self.pool, &category)
            .await
            .map_err(|err| Error::from_write(err, Entity::Category, Some(&category.title)))?;
        Ok(category)
    }

    /// Questions in the category survive with their category cleared.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = categories::delete_category(&self.pool, id).await?;
        if !deleted {
            tracing::debug!(id, "Nothing to delete");
        }
        Ok(deleted)
    }
}
