use serde::{Deserialize, Serialize};

use crate::layout::Revision;
use crate::slots::SaveSlotBase;

/// What is known about a save once it has been opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub revision: Revision,
    pub layout: String,
    pub file_len: usize,
    pub section_offset: usize,
    /// Non-empty slots in file order.
    pub slots: Vec<SaveSlotBase>,
}
