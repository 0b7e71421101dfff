//! Bounded-retry uniqueness over values issued during a run.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::GenerationError;

/// What to do once a policy runs out of attempts without finding a fresh value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OnExhausted {
    /// Keep the last (colliding) candidate and carry on.
    AcceptDuplicate,
    /// Abort generation with [`GenerationError::UniquenessExhausted`].
    Fail,
}

/// Retry budget and fallback for a uniqueness-checked value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UniquenessPolicy {
    /// Total draws allowed per issued value, including the first one.
    pub max_attempts: u32,
    pub on_exhausted: OnExhausted,
}

impl UniquenessPolicy {
    pub fn new(max_attempts: u32, on_exhausted: OnExhausted) -> Self {
        Self {
            max_attempts,
            on_exhausted,
        }
    }

    pub fn validate(&self, what: &str) -> Result<(), GenerationError> {
        if self.max_attempts == 0 {
            return Err(GenerationError::InvalidOptions(format!(
                "{what}: max_attempts must be at least 1"
            )));
        }
        Ok(())
    }
}

impl Default for UniquenessPolicy {
    fn default() -> Self {
        Self::new(1000, OnExhausted::AcceptDuplicate)
    }
}

/// A value handed out by [`UniqueSet::issue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issued<T> {
    pub value: T,
    /// Draws consumed, at least 1.
    pub attempts: u32,
    /// `true` when the policy accepted a value that was already issued.
    pub duplicate: bool,
}

impl<T> Issued<T> {
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}

/// Keys issued so far for one kind of value.
#[derive(Debug, Clone)]
pub struct UniqueSet {
    what: &'static str,
    issued: HashSet<String>,
}

impl UniqueSet {
    pub fn new(what: &'static str) -> Self {
        Self {
            what,
            issued: HashSet::new(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.issued.contains(key)
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    /// Draw candidates until one has an unseen key or the policy gives up.
    ///
    /// `draw` receives the zero-based attempt number, local to this call.
    pub fn issue<T, D, K>(
        &mut self,
        policy: &UniquenessPolicy,
        mut draw: D,
        key_of: K,
    ) -> Result<Issued<T>, GenerationError>
    where
        D: FnMut(u32) -> T,
        K: Fn(&T) -> String,
    {
        let max_attempts = policy.max_attempts.max(1);
        let mut attempts = 0;
        loop {
            let candidate = draw(attempts);
            attempts += 1;
            let key = key_of(&candidate);
            if self.issued.insert(key.clone()) {
                return Ok(Issued {
                    value: candidate,
                    attempts,
                    duplicate: false,
                });
            }
            if attempts >= max_attempts {
                return match policy.on_exhausted {
                    OnExhausted::AcceptDuplicate => {
                        warn!(what = self.what, key = %key, attempts, "accepting duplicate value");
                        Ok(Issued {
                            value: candidate,
                            attempts,
                            duplicate: true,
                        })
                    }
                    OnExhausted::Fail => Err(GenerationError::UniquenessExhausted {
                        what: self.what,
                        attempts,
                    }),
                };
            }
        }
    }
}
