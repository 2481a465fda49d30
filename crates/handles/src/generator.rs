//! Handle generator
//!
//! Composes the sequence number generator with the ordinal encoder. Short
//! and long handles share one PseudoUnique sequence number generator; long
//! handles append extra random symbols after the encoded sequence number,
//! so the time prefix still decides their order. Sequential handles come
//! from a separate StronglyOrdered generator owned by this instance.

use crate::handle::{Handle, HandleKind};
use handlegen_core::{Clock, DecodeError, GeneratorConfig, Result};
use handlegen_encoding::{
    decode, decode_symbols, encode, encode_into, encode_symbols, Collation, ENCODED_LEN,
};
use handlegen_sequence::{EntropySource, OsEntropy, SequenceLayout, SequenceNumberGenerator};
use std::sync::Arc;
use tracing::{debug, error};

/// Handles are only ever compared byte-wise
const COLLATION: Collation = Collation::Ordinal;

/// Mints short, long and sequential handles
///
/// Thread-safe; share by reference or `Arc`. Generation never blocks and
/// never performs I/O beyond reading the OS entropy source.
pub struct HandleGenerator {
    config: GeneratorConfig,
    pseudo_unique: SequenceNumberGenerator,
    strongly_ordered: SequenceNumberGenerator,
    entropy: Arc<dyn EntropySource>,
}

impl HandleGenerator {
    /// Generator with the compiled-in defaults
    pub fn new() -> Self {
        Self::with_layout(GeneratorConfig::default(), SequenceLayout::default())
    }

    /// Generator for a custom configuration
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration fails validation.
    pub fn from_config(config: GeneratorConfig) -> Result<Self> {
        let layout = SequenceLayout::from_config(&config)?;
        Ok(Self::with_layout(config, layout))
    }

    fn with_layout(config: GeneratorConfig, layout: SequenceLayout) -> Self {
        debug!(
            target: "handlegen::handles",
            short_entropy_bits = config.short_entropy_bits,
            long_entropy_bits = config.long_entropy_bits(),
            orientation = %config.orientation,
            "Handle generator created"
        );
        Self {
            config,
            pseudo_unique: SequenceNumberGenerator::pseudo_unique(layout),
            strongly_ordered: SequenceNumberGenerator::strongly_ordered(layout),
            entropy: Arc::new(OsEntropy),
        }
    }

    /// Replace the clock of both underlying sequence generators
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self {
            pseudo_unique: self.pseudo_unique.with_clock(Arc::clone(&clock)),
            strongly_ordered: self.strongly_ordered.with_clock(clock),
            ..self
        }
    }

    /// Replace the entropy source for sequence suffixes and long extensions
    pub fn with_entropy(self, entropy: Arc<dyn EntropySource>) -> Self {
        Self {
            pseudo_unique: self.pseudo_unique.with_entropy(Arc::clone(&entropy)),
            entropy,
            ..self
        }
    }

    /// Active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Mint a short handle
    ///
    /// # Errors
    ///
    /// `Error::Entropy` if the entropy source fails.
    pub fn generate_short_handle(&self) -> Result<Handle> {
        let seq = self.pseudo_unique.next()?;
        Ok(Handle::from_encoded(encode(seq.as_u64(), COLLATION)))
    }

    /// Mint a long handle
    ///
    /// # Errors
    ///
    /// `Error::Entropy` if the entropy source fails.
    pub fn generate_long_handle(&self) -> Result<Handle> {
        let seq = self.pseudo_unique.next()?;
        let extension_symbols = self.config.long_extension_symbols;

        let mut text = String::with_capacity(ENCODED_LEN + extension_symbols);
        encode_into(seq.as_u64(), COLLATION, &mut text);
        if extension_symbols > 0 {
            let extra = self.entropy.next_u64().map_err(|e| {
                error!(target: "handlegen::handles", error = %e, "Entropy source failed");
                e
            })?;
            text.push_str(&encode_symbols(extra, extension_symbols, COLLATION));
        }
        Ok(Handle::from_encoded(text))
    }

    /// Mint a sequential handle
    ///
    /// Strictly ordered among this generator's sequential handles until a
    /// tick's counter range is exhausted, after which handles in that tick
    /// repeat. Draws no entropy.
    pub fn generate_sequential_handle(&self) -> Result<Handle> {
        let seq = self.strongly_ordered.next()?;
        Ok(Handle::from_encoded(encode(seq.as_u64(), COLLATION)))
    }

    /// Mint a handle of the given kind
    pub fn generate(&self, kind: HandleKind) -> Result<Handle> {
        match kind {
            HandleKind::Short => self.generate_short_handle(),
            HandleKind::Long => self.generate_long_handle(),
            HandleKind::Sequential => self.generate_sequential_handle(),
        }
    }

    /// Length of every handle of `kind` this generator mints
    pub fn handle_len(&self, kind: HandleKind) -> usize {
        match kind {
            HandleKind::Short | HandleKind::Sequential => ENCODED_LEN,
            HandleKind::Long => ENCODED_LEN + self.config.long_extension_symbols,
        }
    }

    /// Validate externally supplied text as a handle of `kind`
    ///
    /// Self-generated handles always parse. Anything else of the wrong
    /// length or outside the ordinal alphabet is rejected.
    pub fn parse(&self, text: &str, kind: HandleKind) -> std::result::Result<Handle, DecodeError> {
        let expected = self.handle_len(kind);
        if text.len() != expected {
            return Err(DecodeError::InvalidLength {
                expected,
                actual: text.len(),
            });
        }
        if let Some(position) = text.bytes().position(|b| !b.is_ascii()) {
            return Err(DecodeError::InvalidSymbol {
                symbol: text[position..].chars().next().unwrap_or('\u{FFFD}'),
                position,
            });
        }

        let (sequence, extension) = text.split_at(ENCODED_LEN);
        decode(sequence, COLLATION)?;
        if !extension.is_empty() {
            decode_symbols(extension, extension.len(), COLLATION).map_err(|e| match e {
                DecodeError::InvalidSymbol { symbol, position } => DecodeError::InvalidSymbol {
                    symbol,
                    position: position + ENCODED_LEN,
                },
                other => other,
            })?;
        }
        Ok(Handle::from_encoded(text.to_string()))
    }
}

impl Default for HandleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HandleGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleGenerator")
            .field("config", &self.config)
            .finish()
    }
}
