use itertools::Itertools;

use twitter_client::{Status, User};

use crate::resolve::{ChainKind, ResolvedThread};

/// A resolved chain ready for display.
/// `users[i]` is the author header shown above `statuses[i]`; consecutive statuses by
/// the author shown last get no header of their own.
#[derive(Debug, Clone)]
pub struct RenderedThread {
    pub kind: ChainKind,
    pub statuses: Vec<Status>,
    pub users: Vec<Option<User>>,
}

impl From<ResolvedThread> for RenderedThread {
    fn from(thread: ResolvedThread) -> Self {
        let mut statuses = Vec::with_capacity(thread.items.len());
        let mut users = Vec::with_capacity(thread.items.len());
        let mut last_shown: Option<u64> = None;

        for (status, user) in thread.items {
            statuses.push(status);
            if last_shown == Some(user.id) {
                users.push(None);
            } else {
                last_shown = Some(user.id);
                users.push(Some(user));
            }
        }

        RenderedThread {
            kind: thread.kind,
            statuses,
            users,
        }
    }
}

impl RenderedThread {
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Status, Option<&User>)> {
        self.statuses.iter().zip(self.users.iter().map(Option::as_ref))
    }

    /// Distinct authors shown in the thread, in order of first appearance.
    pub fn unique_users(&self) -> Vec<&User> {
        self.users.iter().flatten().unique_by(|u| u.id).collect()
    }
}
