//! gh-steward: GitHub repository chores
//!
//! Automates a small set of repository chores over the GitHub REST API:
//!
//! - the branch-and-merge workflow in [`resolve`]: provision a working
//!   branch, reconcile the files that differ from the base branch with a
//!   per-status strategy, and open a pull request;
//! - independent helpers: heuristic PR [`review`], check/approval-gated
//!   [`merge`]s, windowed [`analytics`], and [`seed`]ing workflows.
//!
//! All remote access goes through the [`platform::RepoService`] trait so
//! every workflow can run against a mock in tests. Nothing is retried and
//! nothing runs concurrently: one workflow invocation performs a linear
//! sequence of remote calls and either finishes or reports why it stopped.

pub mod analytics;
pub mod config;
pub mod error;
pub mod merge;
pub mod platform;
pub mod resolve;
pub mod review;
pub mod seed;
pub mod types;
