mod record;
mod summary;

use serde::{Deserialize, Serialize};

pub use record::{CleanRecord, RawRecord};
pub use summary::{SkuSummary, OUTPUT_HEADER};

/// Whether any of the rows behind a SKU summary needed a description filled in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityFlag {
    Clean,
    Imputed
}

impl QualityFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityFlag::Clean => "clean",
            QualityFlag::Imputed => "imputed"
        }
    }
}
