use crate::models::PersistedRecord;
use std::sync::Mutex;
use tracing::info;

/// Destination for the diagnostic listing. Records go here, never into the
/// HTTP response.
pub trait RecordSink: Send + Sync {
    fn emit(&self, record: &PersistedRecord);
}

/// Writes each record to the server log.
pub struct LogSink;

impl RecordSink for LogSink {
    fn emit(&self, record: &PersistedRecord) {
        info!(
            "ID: {}, code: {}, codeIn: {}, bid: {}, createDate: {}, quotationDate: {}",
            record.id,
            record.code,
            record.code_in,
            record.bid,
            record.create_date,
            record.quotation_date
        );
    }
}

/// Keeps emitted records in memory.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<PersistedRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<PersistedRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl RecordSink for MemorySink {
    fn emit(&self, record: &PersistedRecord) {
        match self.records.lock() {
            Ok(mut records) => records.push(record.clone()),
            Err(poisoned) => poisoned.into_inner().push(record.clone()),
        }
    }
}
