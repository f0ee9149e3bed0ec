//! Cargo validity rules
//!
//! Name and code rules are an injected capability so deployments can change
//! them through configuration and tests can substitute their own.

use crate::error::{LoadingError, Result};
use regex::Regex;

/// Letters, digits, `-` and `_`
pub const DEFAULT_NAME_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

/// Upper-case letters, digits and `_`
pub const DEFAULT_CODE_PATTERN: &str = r"^[A-Z0-9_]+$";

/// Decides whether a proposed cargo item's name and code are acceptable
pub trait CargoValidator: Send + Sync {
    fn is_valid_name(&self, name: &str) -> bool;

    fn is_valid_code(&self, code: &str) -> bool;
}

/// Regex-backed validator
#[derive(Debug, Clone)]
pub struct PatternValidator {
    name: Regex,
    code: Regex,
}

impl PatternValidator {
    pub fn new(name_pattern: &str, code_pattern: &str) -> Result<Self> {
        let name = Regex::new(name_pattern).map_err(|source| LoadingError::InvalidPattern {
            field: "name",
            source,
        })?;
        let code = Regex::new(code_pattern).map_err(|source| LoadingError::InvalidPattern {
            field: "code",
            source,
        })?;
        Ok(Self { name, code })
    }

    pub fn name_pattern(&self) -> &str {
        self.name.as_str()
    }

    pub fn code_pattern(&self) -> &str {
        self.code.as_str()
    }
}

impl Default for PatternValidator {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_PATTERN, DEFAULT_CODE_PATTERN)
            .expect("default cargo patterns compile")
    }
}

impl CargoValidator for PatternValidator {
    fn is_valid_name(&self, name: &str) -> bool {
        self.name.is_match(name)
    }

    fn is_valid_code(&self, code: &str) -> bool {
        self.code.is_match(code)
    }
}
