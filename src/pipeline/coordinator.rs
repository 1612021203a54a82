//! Fetch orchestration - the three-stage pipeline
//!
//! Stages run strictly in order; fetches inside a stage fan out concurrently
//! under one shared limiter:
//! 1. Users: single fetch, validate, keep even identifiers (run-fatal on failure)
//! 2. Posts: one bounded task per surviving user, validate, select newest 5
//! 3. Comments: one bounded task per selected post, validate, select newest 3
//!
//! A branch whose fetch fails is counted, logged, and dropped; its siblings
//! are unaffected and the run completes.

use crate::client::{ApiClient, FetchError};
use crate::config::PipelineConfig;
use crate::pipeline::counters::RunCounters;
use crate::record::{
    select_top_by_id, validate_comment, validate_post, validate_user, Comment, Post, RawRecord,
    User,
};
use crate::HarvestError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// One selected post with its selected comments
#[derive(Debug, Clone)]
pub struct PostBranch {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// One surviving user with their surviving post branches
#[derive(Debug, Clone)]
pub struct UserBranch {
    pub user: User,
    pub posts: Vec<PostBranch>,
}

type FetchHandle = JoinHandle<Result<Vec<RawRecord>, FetchError>>;

/// Pipeline coordinator
///
/// Owns the shared concurrency limiter and the run counters; neither is
/// visible to the rest of the crate while a run is in flight.
pub struct Coordinator {
    client: Arc<ApiClient>,
    limiter: Arc<Semaphore>,
    config: PipelineConfig,
    counters: RunCounters,
}

impl Coordinator {
    /// Creates a coordinator with a fresh limiter and zeroed counters
    pub fn new(client: ApiClient, config: PipelineConfig) -> Self {
        let limiter = Arc::new(Semaphore::new(config.max_concurrent_requests));

        Self {
            client: Arc::new(client),
            limiter,
            config,
            counters: RunCounters::default(),
        }
    }

    /// Counters accumulated by the most recent run
    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    /// Runs the three-stage fetch and returns the assembled result tree
    ///
    /// Tree order matches fetch-input order at every level: users in fetch
    /// order, posts and comments in selected order. Only the users fetch can
    /// fail the run; everything below it degrades per branch.
    pub async fn run(&mut self) -> Result<Vec<UserBranch>, HarvestError> {
        let users = self.users_stage().await?;
        let branches = self.posts_stage(users).await;
        let tree = self.comments_stage(branches).await;

        tracing::info!(
            users = tree.len(),
            branch_failures = self.counters.branch_failures(),
            "pipeline complete"
        );

        Ok(tree)
    }

    /// Stage 1: fetch all users once, validate, keep even identifiers
    async fn users_stage(&mut self) -> Result<Vec<User>, HarvestError> {
        let raw_users = self
            .client
            .fetch_users()
            .await
            .map_err(HarvestError::UsersFetch)?;

        self.counters.users.fetched = raw_users.len() as u64;

        let mut valid = Vec::new();
        for raw in &raw_users {
            match validate_user(raw) {
                Some(user) => valid.push(user),
                None => self.counters.users.invalid += 1,
            }
        }
        self.counters.users.valid = valid.len() as u64;

        let kept: Vec<User> = valid.into_iter().filter(has_even_id).collect();
        self.counters.users.kept = kept.len() as u64;

        tracing::info!(
            fetched = self.counters.users.fetched,
            valid = self.counters.users.valid,
            kept = self.counters.users.kept,
            "users stage complete"
        );

        Ok(kept)
    }

    /// Stage 2: fan out one posts fetch per user, validate, select per user
    async fn posts_stage(&mut self, users: Vec<User>) -> Vec<(User, Vec<Post>)> {
        // Every task is spawned before any result is joined; results are
        // matched back to their user by position, not completion order.
        let handles: Vec<FetchHandle> = users
            .iter()
            .map(|user| self.spawn_fetch(FetchTarget::PostsForUser(user.id)))
            .collect();

        let mut surviving = Vec::with_capacity(users.len());

        for (user, handle) in users.into_iter().zip(handles) {
            match join_fetch(handle).await {
                Ok(raws) => {
                    self.counters.posts.fetched += raws.len() as u64;

                    let mut posts = Vec::new();
                    for raw in &raws {
                        match validate_post(raw) {
                            Some(post) => posts.push(post),
                            None => self.counters.posts.invalid += 1,
                        }
                    }
                    self.counters.posts.valid += posts.len() as u64;

                    let selected =
                        select_top_by_id(posts, self.config.posts_per_user, |p| Some(p.id));
                    self.counters.posts.selected += selected.len() as u64;

                    surviving.push((user, selected));
                }
                Err(reason) => {
                    self.counters.posts.fetch_failed += 1;
                    tracing::error!(
                        user_id = user.id,
                        error = %reason,
                        "posts fetch failed, dropping user branch"
                    );
                }
            }
        }

        surviving
    }

    /// Stage 3: fan out one comments fetch per selected post, validate, select
    async fn comments_stage(&mut self, branches: Vec<(User, Vec<Post>)>) -> Vec<UserBranch> {
        // One task per selected post across all users, all spawned up front
        // under the same limiter the posts stage used.
        let handle_groups: Vec<Vec<FetchHandle>> = branches
            .iter()
            .map(|(_, posts)| {
                posts
                    .iter()
                    .map(|post| self.spawn_fetch(FetchTarget::CommentsForPost(post.id)))
                    .collect()
            })
            .collect();

        let mut tree = Vec::with_capacity(branches.len());

        for ((user, posts), handles) in branches.into_iter().zip(handle_groups) {
            let mut post_branches = Vec::with_capacity(posts.len());

            for (post, handle) in posts.into_iter().zip(handles) {
                match join_fetch(handle).await {
                    Ok(raws) => {
                        self.counters.comments.fetched += raws.len() as u64;

                        let mut comments = Vec::new();
                        for raw in &raws {
                            match validate_comment(raw) {
                                Some(comment) => comments.push(comment),
                                None => self.counters.comments.invalid += 1,
                            }
                        }
                        self.counters.comments.valid += comments.len() as u64;

                        let selected = select_top_by_id(
                            comments,
                            self.config.comments_per_post,
                            |c| Some(c.id),
                        );
                        self.counters.comments.selected += selected.len() as u64;

                        post_branches.push(PostBranch {
                            post,
                            comments: selected,
                        });
                    }
                    Err(reason) => {
                        self.counters.comments.fetch_failed += 1;
                        tracing::error!(
                            post_id = post.id,
                            error = %reason,
                            "comments fetch failed, dropping post branch"
                        );
                    }
                }
            }

            tree.push(UserBranch {
                user,
                posts: post_branches,
            });
        }

        tree
    }

    /// Spawns one limiter-bounded fetch task
    ///
    /// The permit is acquired inside the task, immediately before the client
    /// call, and released when the task finishes either way.
    fn spawn_fetch(&self, target: FetchTarget) -> FetchHandle {
        let client = Arc::clone(&self.client);
        let limiter = Arc::clone(&self.limiter);

        tokio::spawn(async move {
            let _permit = limiter
                .acquire_owned()
                .await
                .expect("limiter semaphore is never closed");

            match target {
                FetchTarget::PostsForUser(user_id) => client.fetch_posts_for_user(user_id).await,
                FetchTarget::CommentsForPost(post_id) => {
                    client.fetch_comments_for_post(post_id).await
                }
            }
        })
    }
}

/// What a fanned-out task should fetch
#[derive(Debug, Clone, Copy)]
enum FetchTarget {
    PostsForUser(u64),
    CommentsForPost(u64),
}

/// The even-identifier user filter
fn has_even_id(user: &User) -> bool {
    user.id % 2 == 0
}

/// Joins one fetch task, folding a panicked task into the branch-failure path
async fn join_fetch(handle: FetchHandle) -> Result<Vec<RawRecord>, String> {
    match handle.await {
        Ok(Ok(records)) => Ok(records),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(format!("fetch task failed: {}", e)),
    }
}
