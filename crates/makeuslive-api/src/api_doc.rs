//! OpenAPI documentation. Served at /api/openapi.json, rendered at /docs.

use utoipa::OpenApi;

use crate::auth::models;
use crate::error;
use crate::handlers;
use makeuslive_core::models as core_models;

/// Returns the OpenAPI spec.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Make Us Live API",
        version = "0.1.0",
        description = "Backend for the Make Us Live agency site: public content, admin CRUD, form submissions, and consent logging. All endpoints are versioned under /api/v1/."
    ),
    paths(
        handlers::health::health,
        // Content
        handlers::posts::list_published_posts,
        handlers::posts::get_published_post,
        handlers::works::list_published_works,
        handlers::works::get_published_work,
        handlers::service_offerings::list_published_services,
        handlers::service_offerings::get_published_service,
        handlers::jobs::list_open_jobs,
        handlers::jobs::get_open_job,
        handlers::testimonials::list_published_testimonials,
        handlers::faqs::list_published_faqs,
        handlers::forms::get_published_form,
        // Submissions
        handlers::contact::submit_contact,
        handlers::applications::submit_application,
        handlers::forms::submit_form,
        handlers::consent::record_consent,
        // Admin auth
        handlers::auth::login,
        handlers::auth::me,
        // Admin content CRUD
        handlers::posts::create_post,
        handlers::posts::list_posts,
        handlers::posts::get_post,
        handlers::posts::update_post,
        handlers::posts::delete_post,
        handlers::works::create_work,
        handlers::works::list_works,
        handlers::works::get_work,
        handlers::works::update_work,
        handlers::works::delete_work,
        handlers::service_offerings::create_service,
        handlers::service_offerings::list_services,
        handlers::service_offerings::get_service,
        handlers::service_offerings::update_service,
        handlers::service_offerings::delete_service,
        handlers::jobs::create_job,
        handlers::jobs::list_jobs,
        handlers::jobs::get_job,
        handlers::jobs::update_job,
        handlers::jobs::delete_job,
        handlers::testimonials::create_testimonial,
        handlers::testimonials::list_testimonials,
        handlers::testimonials::get_testimonial,
        handlers::testimonials::update_testimonial,
        handlers::testimonials::delete_testimonial,
        handlers::faqs::create_faq,
        handlers::faqs::list_faqs,
        handlers::faqs::get_faq,
        handlers::faqs::update_faq,
        handlers::faqs::delete_faq,
        // Admin forms and intake
        handlers::forms::create_form,
        handlers::forms::list_forms,
        handlers::forms::get_form,
        handlers::forms::update_form,
        handlers::forms::delete_form,
        handlers::forms::list_form_submissions,
        handlers::forms::get_form_submission,
        handlers::forms::delete_form_submission,
        handlers::contact::list_contact_submissions,
        handlers::contact::get_contact_submission,
        handlers::contact::delete_contact_submission,
        handlers::applications::list_applications,
        handlers::applications::get_application,
        handlers::applications::delete_application,
        handlers::consent::list_consent_events,
    ),
    components(schemas(
        error::ErrorResponse,
        error::FieldErrorBody,
        handlers::health::HealthResponse,
        models::LoginRequest,
        models::LoginResponse,
        models::MeResponse,
        core_models::PostInput,
        core_models::PostResponse,
        core_models::WorkInput,
        core_models::WorkResponse,
        core_models::ServiceOfferingInput,
        core_models::ServiceOfferingResponse,
        core_models::JobInput,
        core_models::JobResponse,
        core_models::TestimonialInput,
        core_models::TestimonialResponse,
        core_models::FaqEntryInput,
        core_models::FaqEntryResponse,
        core_models::CreateContactRequest,
        core_models::ContactSubmissionResponse,
        core_models::FormDefinitionInput,
        core_models::FormDefinitionResponse,
        core_models::FormSubmissionResponse,
        core_models::JobApplicationResponse,
        core_models::StoredFile,
        core_models::RecordConsentRequest,
        core_models::ConsentEventResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "posts", description = "Blog posts"),
        (name = "works", description = "Case studies"),
        (name = "services", description = "Service offerings"),
        (name = "jobs", description = "Careers and applications"),
        (name = "testimonials", description = "Testimonials"),
        (name = "faqs", description = "FAQ"),
        (name = "forms", description = "Dynamic forms"),
        (name = "contact", description = "Contact form"),
        (name = "consent", description = "Cookie consent log"),
        (name = "admin", description = "Authenticated management surface")
    )
)]
pub struct ApiDoc;
