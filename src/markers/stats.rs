use chrono::Local;
use serde::Serialize;

/// Static identifier written into every report
pub const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Seen/emitted/filtered counters for one record category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub input: usize,
    pub output: usize,
    pub skipped: usize,
}

/// Conversion report appended to the output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    #[serde(rename = "converted-on")]
    pub converted_on: Option<String>,
    pub generator: &'static str,
    pub sets: Counts,
    pub markers: Counts,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            converted_on: None,
            generator: GENERATOR,
            sets: Counts::default(),
            markers: Counts::default(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn warn(&mut self, message: String) {
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn error(&mut self, message: String) {
        log::warn!("{}", message);
        self.errors.push(message);
    }

    /// Stamp the report with the current local time
    pub fn finalize(&mut self) {
        self.finalize_at(Local::now().format(TIMESTAMP_FORMAT).to_string());
    }

    pub fn finalize_at(&mut self, timestamp: String) {
        self.converted_on = Some(timestamp);
    }
}
