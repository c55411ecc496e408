//! Document orchestration
//!
//! One run: header pass, counter reset, content pass, message clearing,
//! key frame truncation, then the size roll-up. A failed run returns no
//! document.

use anyhow::Context;
use chrono::Local;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::Serialize;

use anonymiser_shared::Document;

use crate::config::AnonymiseConfig;
use crate::error::AnonymiseError;
use crate::frames::FrameRewriter;
use crate::header::HeaderRewriter;
use crate::key_frames::truncate_key_frames;
use crate::propagate::SizeLedger;
use crate::registry::{BotRegistry, default_pool};
use crate::schema::SchemaDrift;

/// Audit trail of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnonymiseReport {
    /// Pseudonym length change in the header (new - old)
    pub header_name_delta: i64,
    /// Pseudonym length change in the frames (new - old)
    pub content_name_delta: i64,
    pub total_name_delta: i64,
    /// Amount added to each root size counter
    pub size_adjustment: i64,
    pub header_substitutions: u32,
    pub content_substitutions: u32,
    /// Declared size change over the header property tree
    pub header_property_delta: i64,
    pub removed_entries: usize,
    pub appended_markers: usize,
    pub messages_cleared: usize,
    pub key_frames_dropped: usize,
    pub schema_drift: Vec<SchemaDrift>,
}

/// Runs anonymisation over documents, one at a time
pub struct Anonymiser<R = Pcg64> {
    config: AnonymiseConfig,
    registry: BotRegistry<R>,
}

impl Anonymiser<Pcg64> {
    /// Built-in pool, seeded from the config or at random
    pub fn new(config: AnonymiseConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let registry = BotRegistry::with_pool(default_pool(), Pcg64::seed_from_u64(seed));
        Self { config, registry }
    }
}

impl<R: Rng> Anonymiser<R> {
    pub fn with_registry(config: AnonymiseConfig, registry: BotRegistry<R>) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &AnonymiseConfig {
        &self.config
    }

    pub fn registry(&self) -> &BotRegistry<R> {
        &self.registry
    }

    /// Anonymise one document
    ///
    /// Bindings from a previous run are dropped first, so players never keep
    /// a pseudonym across documents.
    pub fn run(
        &mut self,
        mut document: Document,
    ) -> Result<(Document, AnonymiseReport), AnonymiseError> {
        self.registry.clear();
        let guest = self.config.guest_name.as_deref();
        let timestamp = self.config.timestamp.unwrap_or_else(Local::now);
        let mut ledger = SizeLedger::default();

        let header = HeaderRewriter::new(
            &mut self.registry,
            guest,
            &self.config.replay_name,
            timestamp,
        )
        .rewrite(&mut document.header.body)?;
        ledger.record_header(header.name_delta);

        // Bindings survive into the content pass, counters do not
        self.registry.reset_counters();

        let body = &mut document.content.body;
        let content = FrameRewriter::new(&mut self.registry, guest, self.config.strict_players)
            .rewrite(&mut body.frames)?;
        ledger.record_content(content.name_delta);

        let messages_cleared = if self.config.clear_messages {
            let count = body.messages.len();
            body.messages.clear();
            count
        } else {
            0
        };
        let key_frames_dropped = truncate_key_frames(&mut body.key_frames);

        let size_adjustment = ledger.apply(&mut document)?;

        tracing::info!(
            players = self.registry.assigned_count(),
            header_substitutions = header.substitutions,
            content_substitutions = content.substitutions,
            removed_entries = content.removed_entries,
            size_adjustment,
            drift = header.drift.len(),
            "anonymised replay"
        );

        let report = AnonymiseReport {
            header_name_delta: ledger.header,
            content_name_delta: ledger.content,
            total_name_delta: ledger.total(),
            size_adjustment,
            header_substitutions: header.substitutions,
            content_substitutions: content.substitutions,
            header_property_delta: header.property_delta,
            removed_entries: content.removed_entries,
            appended_markers: content.appended_markers,
            messages_cleared,
            key_frames_dropped,
            schema_drift: header.drift,
        };
        Ok((document, report))
    }
}

/// Anonymise one document with a fresh registry
pub fn anonymise(document: Document, config: &AnonymiseConfig) -> Result<Document, AnonymiseError> {
    Anonymiser::new(config.clone())
        .run(document)
        .map(|(document, _)| document)
}

/// Anonymise the codec's JSON text, returning JSON text for re-encoding
pub fn anonymise_json(json: &str, config: &AnonymiseConfig) -> anyhow::Result<String> {
    let document = Document::from_json(json).context("failed to decode replay document")?;
    let document = anonymise(document, config).context("failed to anonymise replay")?;
    document
        .to_json()
        .context("failed to encode anonymised document")
}
