use std::collections::BTreeSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use storefront_core::{Entity, ProductId};
use storefront_products::{Product, ProductDocument};

use super::r#trait::{ProductStore, StoreError};

/// In-memory product store.
///
/// Keeps raw documents in insertion order and normalizes on read, the same
/// way the Postgres store does. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    documents: RwLock<Vec<ProductDocument>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with raw documents, kept in the given order.
    pub fn with_documents(documents: Vec<ProductDocument>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<ProductDocument>>, StoreError> {
        self.documents
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<ProductDocument>>, StoreError> {
        self.documents
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }
}

fn slug_taken(documents: &[ProductDocument], slug: &str, except: Option<ProductId>) -> bool {
    !slug.is_empty()
        && documents
            .iter()
            .any(|d| d.slug.as_deref() == Some(slug) && Some(d.id) != except)
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductStore {
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        let documents = self.read()?;
        Ok(documents.iter().cloned().map(Product::from_document).collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let documents = self.read()?;
        Ok(documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .map(Product::from_document))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        let documents = self.read()?;
        Ok(documents
            .iter()
            .find(|d| d.slug.as_deref() == Some(slug))
            .cloned()
            .map(Product::from_document))
    }

    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let mut documents = self.write()?;
        let id = *product.id();
        if documents.iter().any(|d| d.id == id) {
            return Err(StoreError::Conflict(format!("product {id} already exists")));
        }
        if slug_taken(&documents, product.slug(), None) {
            return Err(StoreError::Conflict(format!(
                "slug '{}' is already in use",
                product.slug()
            )));
        }
        documents.push(product.to_document());
        Ok(product)
    }

    async fn replace(&self, product: Product) -> Result<Product, StoreError> {
        let mut documents = self.write()?;
        let id = *product.id();
        if slug_taken(&documents, product.slug(), Some(id)) {
            return Err(StoreError::Conflict(format!(
                "slug '{}' is already in use",
                product.slug()
            )));
        }
        let slot = documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = product.to_document();
        Ok(product)
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        let mut documents = self.write()?;
        let removed = documents
            .iter()
            .position(|d| d.slug.as_deref() == Some(slug))
            .map(|i| documents.remove(i));
        Ok(removed.map(Product::from_document))
    }

    async fn delete_many(&self, ids: &[ProductId]) -> Result<u64, StoreError> {
        let mut documents = self.write()?;
        let before = documents.len();
        documents.retain(|d| !ids.contains(&d.id));
        Ok((before - documents.len()) as u64)
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let documents = self.read()?;
        let distinct: BTreeSet<String> = documents
            .iter()
            .filter_map(|d| d.category.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        Ok(distinct.into_iter().collect())
    }

    async fn insert_document(&self, document: ProductDocument) -> Result<(), StoreError> {
        let mut documents = self.write()?;
        if documents.iter().any(|d| d.id == document.id) {
            return Err(StoreError::Conflict(format!(
                "product {} already exists",
                document.id
            )));
        }
        if let Some(slug) = document.slug.as_deref() {
            if slug_taken(&documents, slug, None) {
                return Err(StoreError::Conflict(format!("slug '{slug}' is already in use")));
            }
        }
        documents.push(document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use storefront_products::Price;

    fn product(name: &str, slug: &str) -> Product {
        Product::new(ProductId::new(), name, Utc::now())
            .with_slug(slug)
            .with_category("Kitchen")
            .with_price(Price::new(10.0))
            .with_stock(5)
    }

    #[tokio::test]
    async fn fetch_all_keeps_insertion_order() {
        let store = InMemoryProductStore::new();
        for (name, slug) in [("Cup", "cup"), ("Bowl", "bowl"), ("Plate", "plate")] {
            store.insert(product(name, slug)).await.unwrap();
        }
        let names: Vec<String> = store
            .fetch_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Cup", "Bowl", "Plate"]);
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let store = InMemoryProductStore::new();
        store.insert(product("Cup", "cup")).await.unwrap();
        let err = store.insert(product("Other Cup", "cup")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn replace_checks_existence_and_foreign_slugs() {
        let store = InMemoryProductStore::new();
        let cup = store.insert(product("Cup", "cup")).await.unwrap();
        store.insert(product("Bowl", "bowl")).await.unwrap();

        let renamed = cup.clone().with_slug("bowl");
        assert!(matches!(store.replace(renamed).await, Err(StoreError::Conflict(_))));

        let restocked = cup.clone().with_stock(40);
        store.replace(restocked).await.unwrap();
        assert_eq!(
            store.get(cup.id_typed()).await.unwrap().unwrap().stock_quantity(),
            40
        );

        let ghost = product("Ghost", "ghost");
        assert!(matches!(store.replace(ghost).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn deletes_by_slug_and_in_bulk() {
        let store = InMemoryProductStore::new();
        let cup = store.insert(product("Cup", "cup")).await.unwrap();
        let bowl = store.insert(product("Bowl", "bowl")).await.unwrap();
        store.insert(product("Plate", "plate")).await.unwrap();

        let removed = store.delete_by_slug("plate").await.unwrap().unwrap();
        assert_eq!(removed.name(), "Plate");
        assert!(store.delete_by_slug("plate").await.unwrap().is_none());

        let count = store
            .delete_many(&[cup.id_typed(), bowl.id_typed(), ProductId::new()])
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn legacy_documents_are_normalized_on_read() {
        let id = ProductId::new();
        let mut doc = ProductDocument::new(id);
        doc.name = Some("Old Lamp".to_string());
        doc.slug = Some("old-lamp".to_string());
        doc.category = Some("  Home ".to_string());
        doc.price = Some(json!("1,250"));
        doc.stock = Some(json!(7));

        let store = InMemoryProductStore::new();
        store.insert_document(doc).await.unwrap();

        let lamp = store.get_by_slug("old-lamp").await.unwrap().unwrap();
        assert_eq!(lamp.id_typed(), id);
        assert_eq!(lamp.stock_quantity(), 7);
        assert_eq!(lamp.price(), Price::new(1250.0));
        assert_eq!(store.categories().await.unwrap(), vec!["Home"]);
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let store = InMemoryProductStore::new();
        store
            .insert(product("Rake", "rake").with_category("Garden"))
            .await
            .unwrap();
        store.insert(product("Cup", "cup")).await.unwrap();
        store.insert(product("Bowl", "bowl")).await.unwrap();
        store
            .insert(product("Misc", "misc").with_category(""))
            .await
            .unwrap();
        assert_eq!(store.categories().await.unwrap(), vec!["Garden", "Kitchen"]);
    }
}
