//! Form surface that reports to the terminal.

use std::collections::HashMap;

use folio_forms::{FormSurface, MessageKind, StatusMessage};
use tracing::{debug, info, warn};

/// Surface backed by values given on the command line.
///
/// Every change the page would show is logged instead.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    values: HashMap<String, String>,
}

impl ConsoleSurface {
    /// Creates a surface holding the given `name=value` pairs.
    ///
    /// Fields missing from `values` read as empty.
    pub fn new(values: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl FormSurface for ConsoleSurface {
    fn read_value(&self, field: &str) -> String {
        self.values.get(field).cloned().unwrap_or_default()
    }

    fn write_error(&mut self, field: &str, error: Option<&str>) {
        match error {
            Some(message) => warn!("  {field}: {message}"),
            None => debug!("  {field}: ok"),
        }
    }

    fn focus(&mut self, field: &str) {
        debug!("focus -> {field}");
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            info!("Sending...");
        }
    }

    fn set_message(&mut self, message: Option<&StatusMessage>) {
        match message {
            Some(message) => match message.kind {
                MessageKind::Success => info!("{}", message.text),
                MessageKind::Error => warn!("{}", message.text),
            },
            None => debug!("status message dismissed"),
        }
    }

    fn reset_all(&mut self) {
        self.values.clear();
        debug!("form reset");
    }
}
