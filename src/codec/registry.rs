//! Ordered, append-only list of selectable codecs.

use crate::codec::{BuiltinCodec, Codec};
use crate::config::EncodingConfig;
use crate::error::{Result, RlhexError};

/// Codecs the viewer can cycle through, built-ins first
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    codecs: Vec<Codec>,
}

impl CodecRegistry {
    /// Registry holding only the built-in codecs
    pub fn new() -> Self {
        Self {
            codecs: BuiltinCodec::ALL.into_iter().map(Codec::Builtin).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Codec> {
        self.codecs.get(index)
    }

    /// Codec at `index`, falling back to the first entry for stale indices
    pub fn get_or_default(&self, index: usize) -> &Codec {
        self.codecs.get(index).unwrap_or(&self.codecs[0])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.codecs.iter().map(Codec::name)
    }

    /// Index of the codec registered under `name` (case-insensitive)
    pub fn lookup(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.codecs
            .iter()
            .position(|codec| codec.name().eq_ignore_ascii_case(wanted))
    }

    /// Append `codec` unless one with the same name is already registered.
    /// Returns whether the codec was added.
    pub fn register(&mut self, codec: Codec) -> bool {
        if self.lookup(codec.name()).is_some() {
            return false;
        }
        self.codecs.push(codec);
        true
    }

    /// Resolve `name` and append it
    pub fn register_name(&mut self, name: &str) -> Result<bool> {
        let codec = Codec::resolve(name).ok_or_else(|| RlhexError::UnknownEncoding {
            name: name.to_string(),
        })?;
        Ok(self.register(codec))
    }

    /// Append every resolvable encoding from `config`, skipping unknown names.
    /// Returns the number of codecs added.
    pub fn extend_from_config(&mut self, config: &EncodingConfig) -> usize {
        let mut added = 0;
        for entry in &config.encodings {
            if let Some(module) = entry.module() {
                log::debug!(
                    "encoding {} names module {}; no module loading is performed",
                    entry.name(),
                    module
                );
            }
            match self.register_name(entry.name()) {
                Ok(true) => added += 1,
                Ok(false) => log::debug!("encoding {} already registered", entry.name()),
                Err(e) => log::warn!("skipping custom encoding: {}", e),
            }
        }
        added
    }

    /// Index following `current`, wrapping to the first codec
    pub fn cycle(&self, current: usize) -> usize {
        (current + 1) % self.codecs.len()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}
