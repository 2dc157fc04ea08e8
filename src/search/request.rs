//! Request tickets and deadline tracking for outstanding web requests.
//!
//! Zellij delivers web responses as events carrying the context map that was sent
//! with the request. A [`RequestTicket`] is encoded into that map so a response can
//! be routed back to the provider that issued it, together with the generation it
//! belongs to. [`Deadlines`] records when each outstanding ticket expires; timer
//! events drain expired tickets so that every request resolves exactly once, either
//! by its response or by its timeout.

use std::collections::BTreeMap;
use url::Url;

const CONTEXT_KIND: &str = "apidex.kind";
const CONTEXT_GENERATION: &str = "apidex.generation";

/// Timer events may fire marginally before the recorded deadline.
const TIMER_SLACK_MS: i64 = 100;

/// Which provider issued a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Search,
    Suggest,
    Categories,
}

impl RequestKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Suggest => "suggest",
            Self::Categories => "categories",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "search" => Some(Self::Search),
            "suggest" => Some(Self::Suggest),
            "categories" => Some(Self::Categories),
            _ => None,
        }
    }
}

/// Identifies one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub generation: u64,
}

impl RequestTicket {
    #[must_use]
    pub const fn new(kind: RequestKind, generation: u64) -> Self {
        Self { kind, generation }
    }

    /// Encodes the ticket as a web request context map.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_KIND.to_string(), self.kind.as_str().to_string());
        context.insert(CONTEXT_GENERATION.to_string(), self.generation.to_string());
        context
    }

    /// Decodes a ticket from a response context map.
    ///
    /// Returns `None` for responses to requests this plugin did not issue.
    ///
    /// # Examples
    ///
    /// ```
    /// use apidex::search::{RequestKind, RequestTicket};
    ///
    /// let ticket = RequestTicket::new(RequestKind::Suggest, 7);
    /// assert_eq!(RequestTicket::from_context(&ticket.to_context()), Some(ticket));
    /// ```
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let kind = RequestKind::parse(context.get(CONTEXT_KIND)?)?;
        let generation = context.get(CONTEXT_GENERATION)?.parse().ok()?;
        Some(Self { kind, generation })
    }
}

/// A request ready to be sent by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub url: Url,
    pub ticket: RequestTicket,
}

/// Deadlines of outstanding requests, in unix milliseconds.
#[derive(Debug, Clone, Default)]
pub struct Deadlines {
    pending: Vec<(RequestTicket, i64)>,
}

impl Deadlines {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a ticket until `deadline_ms`.
    pub fn track(&mut self, ticket: RequestTicket, deadline_ms: i64) {
        self.pending.retain(|(pending, _)| *pending != ticket);
        self.pending.push((ticket, deadline_ms));
    }

    /// Stops tracking a ticket whose response arrived.
    ///
    /// Returns `false` if the ticket was not outstanding, meaning it already timed
    /// out and its late response must be ignored.
    pub fn resolve(&mut self, ticket: RequestTicket) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| *pending != ticket);
        self.pending.len() != before
    }

    /// Removes and returns every ticket whose deadline has passed.
    pub fn expire(&mut self, now_ms: i64) -> Vec<RequestTicket> {
        let mut expired = Vec::new();
        self.pending.retain(|&(ticket, deadline)| {
            if deadline <= now_ms + TIMER_SLACK_MS {
                expired.push(ticket);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Whole seconds until the earliest outstanding deadline, at least one.
    ///
    /// `None` when nothing is pending. Used to re-arm the host timer after a
    /// tick that left requests outstanding.
    #[must_use]
    pub fn seconds_until_next(&self, now_ms: i64) -> Option<u64> {
        let next = self.pending.iter().map(|&(_, deadline)| deadline).min()?;
        let remaining_ms = u64::try_from(next.saturating_sub(now_ms)).unwrap_or(0);
        Some((remaining_ms.saturating_add(999) / 1_000).max(1))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("other".to_string(), "plugin".to_string());
        assert_eq!(RequestTicket::from_context(&context), None);

        context.insert(CONTEXT_KIND.to_string(), "search".to_string());
        context.insert(CONTEXT_GENERATION.to_string(), "not-a-number".to_string());
        assert_eq!(RequestTicket::from_context(&context), None);
    }

    #[test]
    fn response_after_expiry_is_not_resolved() {
        let ticket = RequestTicket::new(RequestKind::Search, 1);
        let mut deadlines = Deadlines::new();
        deadlines.track(ticket, 10_000);

        assert!(deadlines.expire(5_000).is_empty());
        assert_eq!(deadlines.expire(10_000), vec![ticket]);
        assert!(!deadlines.resolve(ticket));
    }

    #[test]
    fn resolved_ticket_never_expires() {
        let ticket = RequestTicket::new(RequestKind::Categories, 0);
        let mut deadlines = Deadlines::new();
        deadlines.track(ticket, 1_000);

        assert!(deadlines.resolve(ticket));
        assert!(deadlines.expire(60_000).is_empty());
        assert!(deadlines.is_empty());
    }

    #[test]
    fn expiry_tolerates_early_timer() {
        let ticket = RequestTicket::new(RequestKind::Suggest, 3);
        let mut deadlines = Deadlines::new();
        deadlines.track(ticket, 10_000);
        assert_eq!(deadlines.expire(9_950), vec![ticket]);
    }

    #[test]
    fn next_deadline_rounds_up_to_whole_seconds() {
        let mut deadlines = Deadlines::new();
        assert_eq!(deadlines.seconds_until_next(0), None);

        deadlines.track(RequestTicket::new(RequestKind::Search, 1), 10_000);
        deadlines.track(RequestTicket::new(RequestKind::Suggest, 1), 4_500);
        assert_eq!(deadlines.seconds_until_next(1_000), Some(4));
        assert_eq!(deadlines.seconds_until_next(9_000), Some(1));
    }
}
