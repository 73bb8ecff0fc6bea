//! Storage facade.
//!
//! Centralizes access to every repository behind one trait object, so
//! handlers and services depend on `dyn Storage` rather than on concrete
//! stores. Stores are built on first use and shared afterwards; they all
//! share the same connection pool.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use sea_orm::DatabaseConnection;

use super::repositories::{
    CategoryRepository, CategoryStore, ClientRepository, ClientStore, OrderRepository,
    OrderStore, ProductRepository, ProductStore, UserRepository, UserStore,
};

/// Storage trait for dependency injection.
pub trait Storage: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn categories(&self) -> Arc<dyn CategoryRepository>;

    fn clients(&self) -> Arc<dyn ClientRepository>;

    fn products(&self) -> Arc<dyn ProductRepository>;

    /// Orders and their line items
    fn orders(&self) -> Arc<dyn OrderRepository>;
}

/// Concrete implementation of Storage over a SeaORM connection pool
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: OnceCell<Arc<UserStore>>,
    category_repo: OnceCell<Arc<CategoryStore>>,
    client_repo: OnceCell<Arc<ClientStore>>,
    product_repo: OnceCell<Arc<ProductStore>>,
    order_repo: OnceCell<Arc<OrderStore>>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            user_repo: OnceCell::new(),
            category_repo: OnceCell::new(),
            client_repo: OnceCell::new(),
            product_repo: OnceCell::new(),
            order_repo: OnceCell::new(),
        }
    }
}

impl Storage for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo
            .get_or_init(|| Arc::new(UserStore::new(self.db.clone())))
            .clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.category_repo
            .get_or_init(|| Arc::new(CategoryStore::new(self.db.clone())))
            .clone()
    }

    fn clients(&self) -> Arc<dyn ClientRepository> {
        self.client_repo
            .get_or_init(|| Arc::new(ClientStore::new(self.db.clone())))
            .clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo
            .get_or_init(|| Arc::new(ProductStore::new(self.db.clone())))
            .clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.order_repo
            .get_or_init(|| Arc::new(OrderStore::new(self.db.clone())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stores_built_on_first_use_only() {
        let storage = Persistence::new(DatabaseConnection::Disconnected);
        assert!(storage.order_repo.get().is_none());

        let _orders = storage.orders();
        let first = storage.order_repo.get().map(Arc::as_ptr);
        let _again = storage.orders();

        assert!(first.is_some());
        assert_eq!(storage.order_repo.get().map(Arc::as_ptr), first);
        assert!(storage.user_repo.get().is_none());
    }
}
