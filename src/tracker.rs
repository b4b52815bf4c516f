//! Facade that coordinates the in-memory document with the document store.
//!
//! Every mutation that changes state immediately reserializes the whole
//! document and overwrites the stored blob; there is no batching and no
//! deferred save. A second concurrent writer would lose at whole-document
//! granularity, which is accepted for this single-user tool.

use crate::codec;
use crate::document::{BudgetDocument, ExpenseItem};
use crate::errors::BudgetError;
use crate::services::{CategoryService, ItemService};
use crate::storage::DocumentStore;

pub struct BudgetTracker {
    document: BudgetDocument,
    store: Box<dyn DocumentStore>,
}

impl BudgetTracker {
    /// Loads the stored document, starting from a pristine one when nothing
    /// has been saved yet. Storage failures other than not-found propagate.
    pub fn open(store: Box<dyn DocumentStore>) -> Result<Self, BudgetError> {
        let document = match store.load() {
            Ok(text) => codec::decode(&text),
            Err(BudgetError::NotFound) => {
                tracing::warn!("no stored document, starting from an empty budget");
                BudgetDocument::new()
            }
            Err(err) => return Err(err),
        };
        Ok(Self { document, store })
    }

    pub fn document(&self) -> &BudgetDocument {
        &self.document
    }

    /// Persists the current state as one whole-document overwrite.
    pub fn save(&self) -> Result<(), BudgetError> {
        let text = codec::encode(&self.document);
        self.store.save(&text)?;
        tracing::debug!(bytes = text.len(), "document saved");
        Ok(())
    }

    pub fn set_salary(&mut self, salary: i64) -> Result<(), BudgetError> {
        self.document.salary = salary;
        self.save()
    }

    pub fn add_item(&mut self, key: &str, item: ExpenseItem) -> Result<bool, BudgetError> {
        let changed = ItemService::add(&mut self.document, key, item);
        self.save_if(changed)
    }

    pub fn edit_item(
        &mut self,
        key: &str,
        original: &ExpenseItem,
        updated: ExpenseItem,
        target_key: Option<&str>,
    ) -> Result<bool, BudgetError> {
        let changed = ItemService::edit(&mut self.document, key, original, updated, target_key);
        self.save_if(changed)
    }

    pub fn remove_item(&mut self, key: &str, item: &ExpenseItem) -> Result<bool, BudgetError> {
        let changed = ItemService::remove(&mut self.document, key, item);
        self.save_if(changed)
    }

    pub fn add_category(&mut self, emoji: &str, name: &str) -> Result<bool, BudgetError> {
        let changed = CategoryService::add(&mut self.document, emoji, name);
        self.save_if(changed)
    }

    pub fn rename_category(
        &mut self,
        key: &str,
        new_emoji: &str,
        new_name: &str,
    ) -> Result<bool, BudgetError> {
        let changed = CategoryService::rename(&mut self.document, key, new_emoji, new_name);
        self.save_if(changed)
    }

    pub fn remove_category(&mut self, key: &str) -> Result<bool, BudgetError> {
        let changed = CategoryService::remove(&mut self.document, key);
        self.save_if(changed)
    }

    fn save_if(&self, changed: bool) -> Result<bool, BudgetError> {
        if changed {
            self.save()?;
        }
        Ok(changed)
    }
}
