use std::sync::Arc;

use tracing::{info, instrument};

use crate::batch::Batch;
use crate::persist::csv_table;
use crate::persist::types::{object_key, PersistResult, QuoteRow};
use crate::persist::ObjectStore;
use crate::quote::Quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Created,
    Appended,
}

/// Appends one row per call to the `(market, day)` CSV object.
///
/// Read-modify-write with no conditional put: two runs appending to the same
/// object at the same time can each read the old body, and the later put
/// drops the other run's row. Deployments must keep a single writer per
/// `(market, day)`.
pub struct CsvPersister {
    store: Arc<dyn ObjectStore>,
}

impl CsvPersister {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, quote, batch), fields(market = %quote.market, today = %batch.today))]
    pub async fn persist(&self, quote: &Quote, batch: &Batch) -> PersistResult<WriteKind> {
        let key = object_key(&quote.market, &batch.today);
        let row = QuoteRow::from_quote(quote, batch);

        let (body, kind) = if self.store.exists(&key).await? {
            let existing = self.store.get(&key).await?;
            (csv_table::append_row(&key, &existing, &row)?, WriteKind::Appended)
        } else {
            (csv_table::new_table(&row)?, WriteKind::Created)
        };

        self.store.put(&key, body).await?;
        info!(%key, ?kind, missing = quote.is_missing(), "row saved");
        Ok(kind)
    }
}
