//! Customer Repository

use shared::models::{Customer, CustomerCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key};

const TABLE: &str = "customer";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All customers ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer ORDER BY name")
            .await?
            .take(0)?;
        Ok(customers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let key = record_key(TABLE, id);
        let customer: Option<Customer> = self.base.db().select((TABLE, key)).await?;
        Ok(customer)
    }

    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        let customer = Customer {
            id: None,
            name: data.name,
            phone: data.phone,
            email: data.email,
            created_at: Some(shared::util::now_millis()),
        };

        let key = super::new_record_key();
        let created: Option<Customer> = self
            .base
            .db()
            .create((TABLE, key.as_str()))
            .content(customer)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }
}
