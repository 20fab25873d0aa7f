//! Path template binding.
//!
//! Operation paths are declared as templates such as
//! `/n/{namespaceName}/b/{bucketName}`. Every placeholder must be bound to a
//! non-blank value; values are percent-encoded as single path segments.

use crate::error::{Error, Result};

/// Check a required parameter: present and not blank.
///
/// # Errors
///
/// Returns [`Error::MissingParameter`] if `value` is `None` and
/// [`Error::BlankParameter`] if it is empty or whitespace.
pub fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    let value = value.ok_or_else(|| Error::MissingParameter(name.to_string()))?;
    if value.trim().is_empty() {
        return Err(Error::BlankParameter(name.to_string()));
    }
    Ok(value)
}

/// A path template with placeholders awaiting values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: &'static str,
    bound: Vec<(&'static str, String)>,
}

impl PathTemplate {
    /// Start binding `template`.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self {
            template,
            bound: Vec::new(),
        }
    }

    /// Bind a required parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] if `value` is `None` and
    /// [`Error::BlankParameter`] if it is empty or whitespace.
    pub fn bind(mut self, name: &'static str, value: Option<&str>) -> Result<Self> {
        let value = required(name, value)?;
        self.bound
            .push((name, urlencoding::encode(value).into_owned()));
        Ok(self)
    }

    /// Substitute all bound values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if a placeholder was left unbound.
    pub fn build(self) -> Result<String> {
        let mut path = self.template.to_string();
        for (name, value) in &self.bound {
            path = path.replace(&format!("{{{name}}}"), value);
        }

        if let Some(start) = path.find('{') {
            let rest = &path[start..];
            let placeholder = rest.find('}').map_or(rest, |end| &rest[..=end]);
            return Err(Error::InvalidRequest(format!(
                "Path parameter {placeholder} was not bound in {}",
                self.template
            )));
        }

        Ok(path)
    }
}
