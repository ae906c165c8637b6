// Translation service
// Labels shown by the control pass through a Translate implementation

use std::collections::HashMap;

pub trait Translate {
    fn translate(&self, text: &str) -> String;
}

/// Lookup table of translated labels; misses fall back to the source text
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl Translate for Catalog {
    fn translate(&self, text: &str) -> String {
        self.entries
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
