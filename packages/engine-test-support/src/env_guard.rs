//! Environment variables that restore themselves on drop.
//!
//! The process environment is global; tests using this must run under
//! `#[serial]`.

use std::env;

pub struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn new() -> Self {
        Self { saved: Vec::new() }
    }

    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.remember(key);
        env::set_var(key, value);
        self
    }

    pub fn unset(mut self, key: &str) -> Self {
        self.remember(key);
        env::remove_var(key);
        self
    }

    fn remember(&mut self, key: &str) {
        if !self.saved.iter().any(|(k, _)| k == key) {
            self.saved.push((key.to_string(), env::var(key).ok()));
        }
    }
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(v) => env::set_var(&key, v),
                None => env::remove_var(&key),
            }
        }
    }
}
