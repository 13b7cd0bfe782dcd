//! Process-wide declaration settings.
//!
//! The only tunable is the prefix used when deriving a storage field name
//! from an attribute name. A package-level singleton is created lazily and
//! mutated through [`configure`]; declarations read whatever value is
//! configured at the moment they run, so later changes affect later
//! declarations but never a storage field name that is already fixed.
//!
//! The singleton is meant to be set once at process start. It is guarded by
//! a mutex only because Rust requires one for global mutation; concurrent
//! reconfiguration during declaration is a documented hazard, not a
//! supported mode.

use std::sync::Mutex;

use lazy_static::lazy_static;

pub const DEFAULT_FIELD_NAME_PREFIX: &str = "_";

#[derive(Debug, Clone)]
pub struct Configuration {
    field_name_prefix: String,
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            field_name_prefix: String::from(DEFAULT_FIELD_NAME_PREFIX),
        }
    }
    pub fn field_name_prefix(&self) -> &str {
        &self.field_name_prefix
    }
    pub fn set_field_name_prefix(&mut self, prefix: impl Into<String>) {
        self.field_name_prefix = prefix.into();
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref CONFIGURATION: Mutex<Configuration> = Mutex::new(Configuration::new());
}

/// The process-wide configuration singleton.
///
/// Every call returns the same instance, created with defaults on first
/// access.
pub fn configuration() -> &'static Mutex<Configuration> {
    &CONFIGURATION
}

/// Mutate the singleton in place through a callback.
pub fn configure<F: FnOnce(&mut Configuration)>(callback: F) {
    callback(&mut configuration().lock().unwrap());
}
