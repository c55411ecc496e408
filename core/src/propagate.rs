//! Size delta roll-up into the document's root counters
//!
//! `Header.size`, `Content.size` and `ContentBody.stream_size` all move by
//! the same amount: twice the summed pseudonym length change of both passes.

use anonymiser_shared::Document;

use crate::error::AnonymiseError;

/// Root counters count two bytes per string length unit
pub const SIZE_FACTOR: i64 = 2;

/// Name length deltas gathered over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeLedger {
    pub header: i64,
    pub content: i64,
}

impl SizeLedger {
    pub fn record_header(&mut self, delta: i64) {
        self.header += delta;
    }

    pub fn record_content(&mut self, delta: i64) {
        self.content += delta;
    }

    pub fn total(&self) -> i64 {
        self.header + self.content
    }

    /// Amount every root counter moves by
    pub fn adjustment(&self) -> i64 {
        self.total() * SIZE_FACTOR
    }

    /// Apply the adjustment to all three counters
    ///
    /// Either every counter is updated or none is.
    pub fn apply(&self, document: &mut Document) -> Result<i64, AnonymiseError> {
        let delta = self.adjustment();
        let header = adjust("header.size", document.header.size, delta)?;
        let content = adjust("content.size", document.content.size, delta)?;
        let stream = adjust(
            "content.body.stream_size",
            document.content.body.stream_size,
            delta,
        )?;

        document.header.size = header;
        document.content.size = content;
        document.content.body.stream_size = stream;
        Ok(delta)
    }
}

fn adjust(counter: &'static str, value: u32, delta: i64) -> Result<u32, AnonymiseError> {
    u32::try_from(i64::from(value) + delta).map_err(|_| AnonymiseError::SizeOutOfRange {
        counter,
        value,
        delta,
    })
}
