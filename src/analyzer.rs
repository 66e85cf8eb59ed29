use crate::clients::GraphApi;
use crate::errors::GraphError;
use crate::types::graph::{Account, FolloweeReport, LookupOutcome};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_CONCURRENCY: usize = 4;

/// Options for a reciprocity run.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Whether verified followees are checked at all. When false they are
    /// dropped before any reverse lookup is issued.
    pub include_verified: bool,
    /// Upper bound on concurrent reverse lookups. Exists to cap burst request
    /// rate against the remote API, not for raw throughput.
    pub concurrency: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            include_verified: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Walks the origin's following list and determines, per followee, whether
/// the follow is reciprocated.
pub struct ReciprocityAnalyzer<C: GraphApi> {
    client: Arc<C>,
    options: AnalyzerOptions,
}

enum Check {
    FollowsBack,
    NotFollowingBack,
    Failed(GraphError),
}

impl<C: GraphApi + 'static> ReciprocityAnalyzer<C> {
    pub fn new(client: Arc<C>, options: AnalyzerOptions) -> Self {
        ReciprocityAnalyzer { client, options }
    }

    /// Report every followee of `origin` who does not follow back, in the
    /// order the platform returned them.
    ///
    /// A failed origin-list fetch aborts the run before any reverse lookup is
    /// issued. A failed reverse lookup for one followee is recorded as a
    /// `LookupFailed` entry and the batch continues; the one exception is an
    /// authentication failure, which no later call can recover from and which
    /// therefore aborts the run.
    pub async fn find_non_reciprocal(
        &self,
        origin: &Account,
    ) -> Result<Vec<FolloweeReport>, GraphError> {
        let following = self.client.list_following(&origin.id).await?;
        debug!("@{} follows {} accounts", origin.handle, following.len());

        // Dedup by id (platforms occasionally repeat entries across pages)
        // and apply the verified filter before spending network calls.
        let mut seen = HashSet::new();
        let candidates: Vec<Account> = following
            .into_iter()
            .filter(|a| seen.insert(a.id.clone()))
            .filter(|a| self.options.include_verified || !a.verified)
            .collect();

        let origin_id = origin.id.clone();
        let client = Arc::clone(&self.client);

        // `buffered` caps in-flight lookups and yields in input order, so the
        // report order matches the following-list order regardless of which
        // lookup finishes first.
        let mut lookups = stream::iter(candidates)
            .map(move |followee| {
                let client = Arc::clone(&client);
                let origin_id = origin_id.clone();
                async move {
                    let check = match client.list_following(&followee.id).await {
                        Ok(their_following) => {
                            if their_following.iter().any(|a| a.id == origin_id) {
                                Check::FollowsBack
                            } else {
                                Check::NotFollowingBack
                            }
                        }
                        Err(e) => Check::Failed(e),
                    };
                    (followee, check)
                }
            })
            .buffered(self.options.concurrency.max(1));

        let mut results = Vec::new();
        while let Some((followee, check)) = lookups.next().await {
            match check {
                Check::FollowsBack => {
                    debug!("@{} follows back", followee.handle);
                }
                Check::NotFollowingBack => {
                    results.push(FolloweeReport {
                        account: followee,
                        outcome: LookupOutcome::NotFollowingBack,
                    });
                }
                Check::Failed(e) if e.is_fatal() => return Err(e),
                Check::Failed(e) => {
                    warn!("lookup for @{} failed: {}", followee.handle, e);
                    results.push(FolloweeReport {
                        account: followee,
                        outcome: LookupOutcome::LookupFailed(e.to_string()),
                    });
                }
            }
        }

        Ok(results)
    }
}
