//! Bulk NDJSON payloads.
//!
//! Every document takes two lines: an action line naming the target index
//! and document id, then the body. `index` actions carry the whole document;
//! `update` actions wrap a partial document in `{"doc": ...}`.

use orion_error::StructError;
use orion_error::compat_prelude::*;
use orion_error::prelude::*;
use serde::Serialize;

use crate::error::{GenReason, GenResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Index,
    Update,
}

/// A ready-to-send chunk of the bulk payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkBatch {
    pub documents: usize,
    pub payload: String,
}

#[derive(Serialize)]
struct ActionMeta<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_id")]
    id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum ActionLine<'a> {
    Index(ActionMeta<'a>),
    Update(ActionMeta<'a>),
}

#[derive(Serialize)]
struct PartialDoc<'a, T> {
    doc: &'a T,
}

/// Packs documents into batches of `batch_size`.
#[derive(Debug)]
pub struct BatchAssembler {
    index: String,
    batch_size: usize,
    payload: String,
    documents: usize,
}

impl BatchAssembler {
    pub fn new(index: impl Into<String>, batch_size: usize) -> GenResult<Self> {
        if batch_size == 0 {
            return Err(StructError::from(GenReason::Config)
                .with_detail("batch_size must be > 0".to_string()));
        }
        Ok(Self {
            index: index.into(),
            batch_size,
            payload: String::new(),
            documents: 0,
        })
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// Documents buffered but not yet returned in a batch.
    pub fn pending(&self) -> usize {
        self.documents
    }

    /// Append one document. Returns the full batch once it reaches
    /// `batch_size` documents.
    pub fn push<T: Serialize>(
        &mut self,
        action: BulkAction,
        id: &str,
        doc: &T,
    ) -> GenResult<Option<BulkBatch>> {
        let meta = ActionMeta {
            index: &self.index,
            id,
        };
        let header = match action {
            BulkAction::Index => ActionLine::Index(meta),
            BulkAction::Update => ActionLine::Update(meta),
        };
        let header = serde_json::to_string(&header).owe_data()?;
        let body = match action {
            BulkAction::Index => serde_json::to_string(doc),
            BulkAction::Update => serde_json::to_string(&PartialDoc { doc }),
        }
        .owe_data()
        .position(format!("document {id}"))?;

        self.payload.push_str(&header);
        self.payload.push('\n');
        self.payload.push_str(&body);
        self.payload.push('\n');
        self.documents += 1;

        if self.documents == self.batch_size {
            Ok(self.take())
        } else {
            Ok(None)
        }
    }

    /// Flush the trailing partial batch, if any.
    pub fn finish(&mut self) -> Option<BulkBatch> {
        self.take()
    }

    fn take(&mut self) -> Option<BulkBatch> {
        if self.documents == 0 {
            return None;
        }
        let batch = BulkBatch {
            documents: self.documents,
            payload: std::mem::take(&mut self.payload),
        };
        self.documents = 0;
        Some(batch)
    }
}
