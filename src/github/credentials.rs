use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

/// Hands out the token to use for the next API call.
pub trait CredentialSupplier: Send + Sync {
    fn next_credential(&self) -> String;
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no GitHub token configured; pass --token or set GITHUB_TOKEN")]
    Empty,
}

/// Round-robin rotation over one or more personal access tokens.
#[derive(Debug)]
pub struct TokenPool {
    tokens: Vec<String>,
    cursor: AtomicUsize,
}

impl TokenPool {
    /// Blank entries are dropped; at least one real token must remain.
    pub fn new(tokens: impl IntoIterator<Item = String>) -> Result<Self, CredentialError> {
        let tokens: Vec<String> = tokens
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return Err(CredentialError::Empty);
        }

        Ok(Self {
            tokens,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl CredentialSupplier for TokenPool {
    fn next_credential(&self) -> String {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.tokens.len();
        self.tokens[index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_round_robin() {
        let pool = TokenPool::new(vec!["a".to_string(), "b".to_string()]).unwrap();
        let seen: Vec<String> = (0..5).map(|_| pool.next_credential()).collect();
        assert_eq!(seen, vec!["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn test_blank_tokens_rejected() {
        let err = TokenPool::new(vec!["  ".to_string(), String::new()]).unwrap_err();
        assert!(matches!(err, CredentialError::Empty));
    }

    #[test]
    fn test_trims_tokens() {
        let pool = TokenPool::new(vec![" ghp_x ".to_string(), "".to_string()]).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.next_credential(), "ghp_x");
    }
}
