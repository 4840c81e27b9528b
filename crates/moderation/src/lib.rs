//! Moderation crate - business logic for session-gated message analysis
//!
//! This crate provides platform-independent functionality including:
//! - Domain models (EmailItem, AnalysisResult, DashboardRow, Credential)
//! - Credential store abstractions with in-memory and file backends
//! - Login/logout state machine and route guard
//! - Classification service client and per-item analysis orchestration
//! - Dashboard filtering
//!
//! This crate has no UI dependencies; front ends drive it through
//! [`SessionManager`], [`AnalysisCoordinator`] and [`DashboardFilter`].

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod datasets;
pub mod models;
pub mod session;
pub mod storage;

pub use analysis::{
    ANALYSIS_FAILED_NOTICE, AnalysisClient, AnalysisCompletion, AnalysisCoordinator, AnalysisPhase,
    AnalysisReport, AnalysisRequestError, AnalysisTicket, CompletionEffect, HttpAnalysisClient,
    ItemAnalysisState, Notice, RequestRejected, SingleFlight, UnknownItem, analyze_async,
};
pub use self::config::Settings;
pub use dashboard::{DashboardFilter, filter_rows};
pub use datasets::{BuiltinDataset, DatasetProvider, JsonDataset};
pub use models::{AnalysisResult, CategoryMatch, Credential, DashboardRow, EmailId, EmailItem};
pub use session::{
    CredentialRepository, LoginError, LoginForm, Navigation, Route, Session, SessionManager,
    StaticCredentialRepository, can_enter, navigate,
};
pub use storage::{CredentialStore, FileCredentialStore, InMemoryCredentialStore};
