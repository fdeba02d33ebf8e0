// Walking reply chains and quote chains.
//
// A walk follows one kind of link from a seed status until it runs out, then continues
// with the other kind of link from the last status it reached. Every switch costs one
// unit of depth; the walk stops contributing once MAX_CHAIN_DEPTH is reached, which
// bounds statuses that quote or reply back into the traversal.

use futures::future::{BoxFuture, FutureExt};
use itertools::Itertools;

use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thread_core::{Error, Result};
use twitter_client::{Status, User};

use crate::context::ThreadContext;

pub const MAX_CHAIN_DEPTH: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    /// Ancestors by `in_reply_to_status_id`.
    Thread,
    /// Ancestors by `quoted_status_id`.
    Quote,
}

impl ChainKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainKind::Thread => "thread",
            ChainKind::Quote => "retweet",
        }
    }

    pub fn other(&self) -> ChainKind {
        match self {
            ChainKind::Thread => ChainKind::Quote,
            ChainKind::Quote => ChainKind::Thread,
        }
    }

    fn parent(&self, status: &Status) -> Option<u64> {
        match self {
            ChainKind::Thread => status.in_reply_to_status_id,
            ChainKind::Quote => status.quoted_status_id,
        }
    }
}

impl Display for ChainKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "thread" => Ok(ChainKind::Thread),
            "retweet" => Ok(ChainKind::Quote),
            _ => Err(Error::InvalidInput(format!("Unknown chain kind `{}`", s))),
        }
    }
}

/// Statuses of a resolved chain with their authors, oldest first.
#[derive(Debug, Clone)]
pub struct ResolvedThread {
    pub kind: ChainKind,
    pub items: Vec<(Status, User)>,
}

impl ResolvedThread {
    pub fn status_ids(&self) -> Vec<u64> {
        self.items.iter().map(|(s, _)| s.id).collect()
    }
}

impl ThreadContext {
    /// The reply thread ending at `status_id`.
    pub async fn resolve_thread(&self, status_id: u64) -> Result<ResolvedThread> {
        self.resolve(ChainKind::Thread, status_id).await
    }

    /// The quote chain starting at `status_id`.
    pub async fn resolve_quote_chain(&self, status_id: u64) -> Result<ResolvedThread> {
        self.resolve(ChainKind::Quote, status_id).await
    }

    pub async fn resolve(&self, kind: ChainKind, status_id: u64) -> Result<ResolvedThread> {
        let mut statuses = self.walk_chain(kind, status_id, 0).await?;
        statuses.reverse();

        let mut items = Vec::with_capacity(statuses.len());
        for status in statuses {
            let user = self.get_user(status.user_id).await?;
            items.push((status, user));
        }
        tracing::info!("Resolved {} of {} with {} statuses", kind, status_id, items.len());
        Ok(ResolvedThread { kind, items })
    }

    /// Statuses reachable from `status_id`, seed first, without duplicates.
    /// Returns nothing once `depth` reaches `MAX_CHAIN_DEPTH`.
    pub fn walk_chain(&self, kind: ChainKind, status_id: u64, depth: u32) -> BoxFuture<'_, Result<Vec<Status>>> {
        async move {
            if depth >= MAX_CHAIN_DEPTH {
                tracing::debug!("Chain depth exhausted at {} {}", kind, status_id);
                return Ok(Vec::new());
            }

            let seed = self.get_status(status_id).await?;
            let mut seen = HashSet::from([seed.id]);
            let mut items = vec![seed];
            while let Some(parent_id) = items.last().and_then(|s| kind.parent(s)) {
                if !seen.insert(parent_id) {
                    break;
                }
                items.push(self.get_status(parent_id).await?);
            }

            let last_id = items.last().map(|s| s.id).unwrap_or(status_id);
            let extras = self.walk_chain(kind.other(), last_id, depth + 1).await?;
            items.extend(extras);

            Ok(items.into_iter().unique_by(|s| s.id).collect())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, quote, reply, status, FakeApi};

    use std::sync::Arc;

    #[test]
    fn test_chain_kind_names() {
        assert_eq!("thread".parse::<ChainKind>().unwrap(), ChainKind::Thread);
        assert_eq!("retweet".parse::<ChainKind>().unwrap(), ChainKind::Quote);
        assert_eq!(ChainKind::Quote.to_string(), "retweet");
        assert!(matches!("quote".parse::<ChainKind>(), Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_reply_chain_is_oldest_first() {
        for length in 1..=10u64 {
            // 1 <- 2 <- ... <- length
            let mut api = FakeApi::new().with_user(100, "alice");
            api = api.with_status(status(1, 100));
            for id in 2..=length {
                api = api.with_status(reply(id, 100, id - 1));
            }
            let ctx = context(Arc::new(api));

            let thread = ctx.resolve_thread(length).await.unwrap();
            let expected: Vec<u64> = (1..=length).collect();
            assert_eq!(thread.status_ids(), expected, "length {}", length);
            assert_eq!(thread.kind, ChainKind::Thread);
        }
    }

    #[tokio::test]
    async fn test_quote_chain() {
        let api = FakeApi::new()
            .with_user(100, "alice")
            .with_user(200, "bob")
            .with_status(quote(3, 100, 2))
            .with_status(quote(2, 200, 1))
            .with_status(status(1, 100));
        let ctx = context(Arc::new(api));

        let chain = ctx.resolve_quote_chain(3).await.unwrap();
        assert_eq!(chain.status_ids(), vec![1, 2, 3]);
        assert_eq!(chain.items[1].1.screen_name, "bob");
    }

    #[tokio::test]
    async fn test_thread_continues_into_quoted_status_thread() {
        // 11 <- 12 (reply), 10 is quoted by 11, and 10 replies to 9
        let api = FakeApi::new()
            .with_user(100, "alice")
            .with_status(reply(12, 100, 11))
            .with_status(quote(11, 100, 10))
            .with_status(reply(10, 100, 9))
            .with_status(status(9, 100));
        let ctx = context(Arc::new(api));

        let thread = ctx.resolve_thread(12).await.unwrap();
        assert_eq!(thread.status_ids(), vec![9, 10, 11, 12]);
    }

    #[tokio::test]
    async fn test_status_reachable_twice_appears_once() {
        // 3 replies to 2, 2 replies to 1, 1 quotes 2
        let api = FakeApi::new()
            .with_user(100, "alice")
            .with_status(reply(3, 100, 2))
            .with_status(reply(2, 100, 1))
            .with_status(quote(1, 100, 2));
        let ctx = context(Arc::new(api));

        let statuses = ctx.walk_chain(ChainKind::Thread, 3, 0).await.unwrap();
        let ids: Vec<u64> = statuses.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_depth_bound_stops_alternating_chain() {
        // Odd statuses reply to the next one, even statuses quote the next one, forever.
        let mut api = FakeApi::new().with_user(100, "alice");
        for id in 1..=30u64 {
            let next = if id % 2 == 1 { reply(id, 100, id + 1) } else { quote(id, 100, id + 1) };
            api = api.with_status(next);
        }
        let api = Arc::new(api);
        let ctx = context(api.clone());

        let thread = ctx.resolve_thread(1).await.unwrap();
        let expected: Vec<u64> = (1..=MAX_CHAIN_DEPTH as u64 + 1).rev().collect();
        assert_eq!(thread.status_ids(), expected);
        assert_eq!(api.status_calls(MAX_CHAIN_DEPTH as u64 + 2), 0);
    }

    #[tokio::test]
    async fn test_cycle_terminates() {
        // 1 quotes 2, 2 replies to 1
        let api = Arc::new(
            FakeApi::new()
                .with_user(100, "alice")
                .with_status(quote(1, 100, 2))
                .with_status(reply(2, 100, 1)),
        );
        let ctx = context(api.clone());

        let chain = ctx.resolve_quote_chain(1).await.unwrap();
        assert_eq!(chain.status_ids(), vec![2, 1]);
        assert_eq!(api.total_status_calls(), 2);
    }

    #[tokio::test]
    async fn test_walk_at_depth_bound_is_empty() {
        let api = Arc::new(FakeApi::new().with_status(status(1, 100)));
        let ctx = context(api.clone());
        let statuses = ctx.walk_chain(ChainKind::Thread, 1, MAX_CHAIN_DEPTH).await.unwrap();
        assert!(statuses.is_empty());
        assert_eq!(api.status_calls(1), 0);
    }

    #[tokio::test]
    async fn test_missing_seed_is_not_found() {
        let ctx = context(Arc::new(FakeApi::new()));
        let err = ctx.resolve_thread(404).await.unwrap_err();
        assert!(matches!(err, thread_core::Error::ObjectNotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_author_is_not_found() {
        let ctx = context(Arc::new(FakeApi::new().with_status(status(1, 100))));
        let err = ctx.resolve_thread(1).await.unwrap_err();
        assert!(matches!(err, thread_core::Error::ObjectNotFound(_)));
    }
}
