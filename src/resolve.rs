// ABOUTME: Maps user-supplied identifiers onto entries of an inventory snapshot.
// ABOUTME: Handles the "all" sentinel, repository:tag references, names and id prefixes.

use crate::inventory::{ImageEntry, VolumeEntry};
use nonempty::NonEmpty;
use serde::Serialize;

/// Token that selects the whole inventory.
pub const ALL: &str = "all";

/// Shortest token that may match as an id prefix.
pub const MIN_ID_PREFIX_LEN: usize = 4;

/// How one token is interpreted for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `repository:tag`, exactly one colon.
    Qualified { repository: &'a str, tag: &'a str },
    /// Bare repository, name, or id prefix.
    Unqualified(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(raw: &'a str) -> Self {
        match raw.split_once(':') {
            Some((repository, tag)) if !tag.contains(':') => Token::Qualified { repository, tag },
            _ => Token::Unqualified(raw),
        }
    }
}

/// An inventory entry kind that tokens can be resolved against.
pub trait Resolvable: Clone {
    /// Whether `repository:tag` tokens are matched as exact references.
    const SUPPORTS_REFERENCES: bool;

    /// Exact match on both repository and tag.
    fn matches_reference(&self, _repository: &str, _tag: &str) -> bool {
        false
    }

    /// Loose match for a bare token.
    fn matches_token(&self, token: &str) -> bool;
}

impl Resolvable for ImageEntry {
    const SUPPORTS_REFERENCES: bool = true;

    fn matches_reference(&self, repository: &str, tag: &str) -> bool {
        self.repository == repository && self.tag == tag
    }

    fn matches_token(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        self.repository == token
            || (token.len() >= MIN_ID_PREFIX_LEN && self.id.as_str().starts_with(token))
    }
}

impl Resolvable for VolumeEntry {
    const SUPPORTS_REFERENCES: bool = false;

    fn matches_token(&self, token: &str) -> bool {
        self.name == token
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Resolved,
    /// An unqualified token matched nothing.
    NoSuchEntity,
    /// A `repository:tag` token had no entry with that exact tag.
    ReferenceNotExist,
}

/// Outcome of resolving one request token.
#[derive(Debug, Clone)]
pub struct ResolutionResult<E> {
    pub request: String,
    pub status: ResolutionStatus,
    pub matches: Vec<E>,
}

impl<E> ResolutionResult<E> {
    pub fn is_resolved(&self) -> bool {
        self.status == ResolutionStatus::Resolved
    }
}

/// Resolve every request against one inventory snapshot, preserving order.
///
/// If `"all"` appears anywhere the whole inventory is selected and no other
/// token is looked at. Unqualified tokens may expand to several entries.
pub fn resolve<E: Resolvable>(
    requests: &NonEmpty<String>,
    inventory: &[E],
) -> Vec<ResolutionResult<E>> {
    if requests.iter().any(|request| request == ALL) {
        tracing::debug!(entries = inventory.len(), "selecting entire inventory");
        return vec![ResolutionResult {
            request: ALL.to_string(),
            status: ResolutionStatus::Resolved,
            matches: inventory.to_vec(),
        }];
    }

    requests
        .iter()
        .map(|request| resolve_one(request, inventory))
        .collect()
}

fn resolve_one<E: Resolvable>(request: &str, inventory: &[E]) -> ResolutionResult<E> {
    let token = if E::SUPPORTS_REFERENCES {
        Token::classify(request)
    } else {
        Token::Unqualified(request)
    };

    let (matches, missing): (Vec<E>, ResolutionStatus) = match token {
        Token::Qualified { repository, tag } => (
            inventory
                .iter()
                .filter(|entry| entry.matches_reference(repository, tag))
                .cloned()
                .collect(),
            ResolutionStatus::ReferenceNotExist,
        ),
        Token::Unqualified(token) => (
            inventory
                .iter()
                .filter(|entry| entry.matches_token(token))
                .cloned()
                .collect(),
            ResolutionStatus::NoSuchEntity,
        ),
    };

    let status = if matches.is_empty() {
        missing
    } else {
        ResolutionStatus::Resolved
    };

    tracing::debug!(request, ?status, matches = matches.len(), "resolved request");

    ResolutionResult {
        request: request.to_string(),
        status,
        matches,
    }
}
