use std::sync::Mutex;

use super::CredentialStore;
use crate::error::AuthError;

/// Credential store backed by a browser-style cookie line.
///
/// Reads follow the `; key=value` convention: the key must occur exactly once
/// in the line, and the value runs up to the next `;`. An empty value reads
/// as absent.
#[derive(Debug, Default)]
pub struct CookieStore {
    cookies: Mutex<String>,
}

impl CookieStore {
    /// Wrap an existing cookie line, e.g. `"theme=dark; access_token=abc"`.
    pub fn new(cookies: impl Into<String>) -> Self {
        Self {
            cookies: Mutex::new(cookies.into()),
        }
    }

    /// The current cookie line, suitable for a `Cookie` header.
    pub fn cookie_line(&self) -> Result<String, AuthError> {
        let cookies = self.lock()?;
        Ok(cookies.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, String>, AuthError> {
        self.cookies
            .lock()
            .map_err(|_| AuthError::BackendUnavailable("cookie store lock poisoned".into()))
    }
}

impl CredentialStore for CookieStore {
    fn read(&self, key: &str) -> Result<Option<String>, AuthError> {
        let cookies = self.lock()?;
        Ok(parse_cookie(&cookies, key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let mut cookies = self.lock()?;
        let prefix = format!("{key}=");
        let mut pairs: Vec<String> = cookies
            .split(';')
            .map(str::trim)
            .filter(|pair| !pair.is_empty() && !pair.starts_with(&prefix))
            .map(String::from)
            .collect();
        pairs.push(format!("{key}={value}"));
        *cookies = pairs.join("; ");
        Ok(())
    }
}

/// Extract `key`'s value from a cookie line, or `None` when the key is not
/// present exactly once.
fn parse_cookie(cookies: &str, key: &str) -> Option<String> {
    let haystack = format!("; {cookies}");
    let needle = format!("; {key}=");
    let parts: Vec<&str> = haystack.split(&needle).collect();
    if parts.len() != 2 {
        return None;
    }
    let value = parts[1].split(';').next().unwrap_or("");
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
