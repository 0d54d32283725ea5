//! Bridge to the host spreadsheet: read the selected cell, check it can hold
//! attachments, and upload the exported signature into it.

mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HostError, InsertError};
use crate::export::{self, ExportFormat, ExportedFile};
use crate::notice::{Notice, NoticeSink};
use crate::pad::SignaturePad;

pub use memory::MemoryHost;

pub const INSERTING_MESSAGE: &str = "Inserting…";
pub const INSERTED_MESSAGE: &str = "Inserted";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user's current cell selection; either part may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub field_id: Option<FieldId>,
    pub record_id: Option<RecordId>,
}

impl Selection {
    pub fn cell(field_id: FieldId, record_id: RecordId) -> Self {
        Self {
            field_id: Some(field_id),
            record_id: Some(record_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Number,
    SingleSelect,
    DateTime,
    Checkbox,
    Attachment,
}

impl FieldType {
    pub fn accepts_attachments(self) -> bool {
        matches!(self, Self::Attachment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub id: FieldId,
    pub name: String,
    pub field_type: FieldType,
}

/// Operations the signature widget needs from its host.
///
/// All calls are single-shot and may fail; the widget never runs two of them
/// concurrently on its own, but repeated clicks can overlap inserts.
#[allow(async_fn_in_trait)]
pub trait HostBridge {
    async fn selection(&self) -> Result<Selection, HostError>;

    async fn field_meta(&self, field_id: &FieldId) -> Result<FieldMeta, HostError>;

    async fn set_attachment(
        &self,
        record_id: &RecordId,
        field_id: &FieldId,
        file: ExportedFile,
    ) -> Result<(), HostError>;
}

/// Export the signature and write it into the selected attachment cell.
///
/// Shows a loading notice, then replaces it with exactly one of: an info
/// notice (bad selection), a success notice, or an error notice carrying the
/// failure text. Nothing is written unless the selection is valid.
pub async fn insert_signature<H, N>(
    host: &H,
    pad: &SignaturePad,
    format: ExportFormat,
    notices: &N,
) -> Result<ExportedFile, InsertError>
where
    H: HostBridge,
    N: NoticeSink + ?Sized,
{
    notices.show(Notice::loading(INSERTING_MESSAGE));

    let result = try_insert(host, pad, format).await;
    match &result {
        Ok(file) => {
            log::info!("Inserted {} into cell", file.name);
            notices.show(Notice::success(INSERTED_MESSAGE));
        }
        Err(err) if err.is_validation() => notices.show(Notice::info(err.to_string())),
        Err(err) => notices.show(Notice::error(format!("Insert failed: {err}"))),
    }
    result
}

async fn try_insert<H: HostBridge>(
    host: &H,
    pad: &SignaturePad,
    format: ExportFormat,
) -> Result<ExportedFile, InsertError> {
    let selection = host.selection().await?;
    let (Some(field_id), Some(record_id)) = (selection.field_id, selection.record_id) else {
        return Err(InsertError::InvalidSelection);
    };

    let meta = host.field_meta(&field_id).await?;
    if !meta.field_type.accepts_attachments() {
        log::debug!("Field {} is {:?}, not an attachment field", meta.name, meta.field_type);
        return Err(InsertError::InvalidSelection);
    }

    let file = export::export(pad, format)?;
    host.set_attachment(&record_id, &field_id, file.clone()).await?;
    Ok(file)
}
