use crate::model::contact::{
    event::{CreateContact, UpdateContactStatus},
    Contact, ContactListOptions, ContactStats,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, event: CreateContact) -> AppResult<Contact>;
    async fn find_all(&self, options: ContactListOptions) -> AppResult<Vec<Contact>>;
    async fn update_status(&self, event: UpdateContactStatus) -> AppResult<Contact>;
    async fn stats(&self) -> AppResult<ContactStats>;
}
