//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what
//! they need via Axum's `FromRef`, and to avoid a single god object.

use std::sync::Arc;

use makeuslive_core::models::FormDefinition;
use makeuslive_core::Config;
use makeuslive_db::{
    AdminUserRepository, ConsentRepository, ContactRepository, FaqRepository,
    FormDefinitionRepository, FormSubmissionRepository, JobApplicationRepository, JobRepository,
    PostRepository, ServiceOfferingRepository, TestimonialRepository, WorkRepository,
};
use makeuslive_forms::FileRules;
use sqlx::PgPool;

use crate::auth::middleware::AuthFailureLimiter;
use crate::services::email::EmailService;

// ----- Sub-state types -----

/// Database pool and all repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub posts: PostRepository,
    pub works: WorkRepository,
    pub services: ServiceOfferingRepository,
    pub jobs: JobRepository,
    pub testimonials: TestimonialRepository,
    pub faqs: FaqRepository,
    pub contact: ContactRepository,
    pub form_definitions: FormDefinitionRepository,
    pub form_submissions: FormSubmissionRepository,
    pub applications: JobApplicationRepository,
    pub consent: ConsentRepository,
    pub admin_users: AdminUserRepository,
}

impl DbState {
    pub fn new(pool: PgPool) -> Self {
        DbState {
            posts: PostRepository::new(pool.clone()),
            works: WorkRepository::new(pool.clone()),
            services: ServiceOfferingRepository::new(pool.clone()),
            jobs: JobRepository::new(pool.clone()),
            testimonials: TestimonialRepository::new(pool.clone()),
            faqs: FaqRepository::new(pool.clone()),
            contact: ContactRepository::new(pool.clone()),
            form_definitions: FormDefinitionRepository::new(pool.clone()),
            form_submissions: FormSubmissionRepository::new(pool.clone()),
            applications: JobApplicationRepository::new(pool.clone()),
            consent: ConsentRepository::new(pool.clone()),
            admin_users: AdminUserRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Attachment limits and allowlists for the submission endpoints.
#[derive(Clone)]
pub struct IntakeConfig {
    pub max_file_size_bytes: usize,
    pub max_total_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
    pub resume_content_types: Vec<String>,
}

impl IntakeConfig {
    pub fn from_config(config: &Config) -> Self {
        IntakeConfig {
            max_file_size_bytes: config.max_file_size_bytes,
            max_total_size_bytes: config.max_total_size_bytes,
            allowed_content_types: config.allowed_content_types.clone(),
            resume_content_types: makeuslive_core::constants::RESUME_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Effective rules for a dynamic form. Size limits from the definition
    /// are clamped to the workspace defaults; a definition may swap in its
    /// own content-type allowlist.
    pub fn rules_for(&self, definition: &FormDefinition) -> FileRules {
        let max_file = definition
            .max_file_size_bytes
            .map(|v| (v as usize).min(self.max_file_size_bytes))
            .unwrap_or(self.max_file_size_bytes);
        let max_total = definition
            .max_total_size_bytes
            .map(|v| (v as usize).min(self.max_total_size_bytes))
            .unwrap_or(self.max_total_size_bytes);
        let content_types = definition
            .allowed_content_types
            .clone()
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| self.allowed_content_types.clone());
        FileRules::new(max_file, max_total, content_types)
    }

    /// Rules for the single resume attachment of a job application.
    pub fn resume_rules(&self) -> FileRules {
        FileRules::new(
            self.max_file_size_bytes,
            self.max_file_size_bytes,
            self.resume_content_types.clone(),
        )
    }
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub intake: IntakeConfig,
    pub config: Config,
    pub email: Option<EmailService>,
    pub login_limiter: Arc<AuthFailureLimiter>,
    pub is_production: bool,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for IntakeConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.intake.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
