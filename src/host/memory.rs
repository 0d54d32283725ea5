use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use super::{FieldId, FieldMeta, FieldType, HostBridge, RecordId, Selection};
use crate::error::HostError;
use crate::export::ExportedFile;

/// A successful upload, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentWrite {
    pub record_id: RecordId,
    pub field_id: FieldId,
    pub file_name: String,
    pub mime: String,
}

#[derive(Debug, Default)]
struct Table {
    fields: Vec<FieldMeta>,
    records: Vec<RecordId>,
    attachments: HashMap<(RecordId, FieldId), Vec<ExportedFile>>,
    selection: Selection,
    writes: Vec<AttachmentWrite>,
    write_failure: Option<String>,
}

/// In-process table standing in for a real spreadsheet host.
///
/// Clones share the same table, so the UI and in-flight inserts see each
/// other's changes.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    table: Arc<Mutex<Table>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small table with one attachment column and a few rows
    pub fn demo() -> Self {
        let host = Self::new();
        host.add_field("Name", FieldType::Text);
        host.add_field("Signed on", FieldType::DateTime);
        host.add_field("Signature", FieldType::Attachment);
        for _ in 0..4 {
            host.add_record();
        }
        host
    }

    pub fn add_field(&self, name: &str, field_type: FieldType) -> FieldId {
        let mut table = self.table.lock();
        let id = FieldId(format!("fld{}", table.fields.len() + 1));
        table.fields.push(FieldMeta {
            id: id.clone(),
            name: name.to_owned(),
            field_type,
        });
        id
    }

    pub fn add_record(&self) -> RecordId {
        let id = RecordId(format!("rec{}", Uuid::new_v4().simple()));
        self.table.lock().records.push(id.clone());
        id
    }

    pub fn fields(&self) -> Vec<FieldMeta> {
        self.table.lock().fields.clone()
    }

    pub fn records(&self) -> Vec<RecordId> {
        self.table.lock().records.clone()
    }

    pub fn select(&self, selection: Selection) {
        self.table.lock().selection = selection;
    }

    pub fn current_selection(&self) -> Selection {
        self.table.lock().selection.clone()
    }

    pub fn attachments(&self, record_id: &RecordId, field_id: &FieldId) -> Vec<ExportedFile> {
        self.table
            .lock()
            .attachments
            .get(&(record_id.clone(), field_id.clone()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn writes(&self) -> Vec<AttachmentWrite> {
        self.table.lock().writes.clone()
    }

    /// Make every following upload fail with `message`; `None` restores uploads
    pub fn fail_writes_with(&self, message: Option<&str>) {
        self.table.lock().write_failure = message.map(str::to_owned);
    }
}

impl HostBridge for MemoryHost {
    async fn selection(&self) -> Result<Selection, HostError> {
        Ok(self.current_selection())
    }

    async fn field_meta(&self, field_id: &FieldId) -> Result<FieldMeta, HostError> {
        self.table
            .lock()
            .fields
            .iter()
            .find(|field| &field.id == field_id)
            .cloned()
            .ok_or_else(|| HostError::UnknownField(field_id.to_string()))
    }

    async fn set_attachment(
        &self,
        record_id: &RecordId,
        field_id: &FieldId,
        file: ExportedFile,
    ) -> Result<(), HostError> {
        let mut table = self.table.lock();
        if let Some(message) = &table.write_failure {
            return Err(HostError::Rejected(message.clone()));
        }
        if !table.records.contains(record_id) {
            return Err(HostError::UnknownRecord(record_id.to_string()));
        }
        if !table.fields.iter().any(|field| &field.id == field_id) {
            return Err(HostError::UnknownField(field_id.to_string()));
        }

        table.writes.push(AttachmentWrite {
            record_id: record_id.clone(),
            field_id: field_id.clone(),
            file_name: file.name.clone(),
            mime: file.mime.clone(),
        });
        table
            .attachments
            .entry((record_id.clone(), field_id.clone()))
            .or_default()
            .push(file);
        Ok(())
    }
}
