pub mod faq;
pub mod job;
pub mod post;
pub mod service_offering;
pub mod testimonial;
pub mod work;

pub use faq::FaqRepository;
pub use job::JobRepository;
pub use post::PostRepository;
pub use service_offering::ServiceOfferingRepository;
pub use testimonial::TestimonialRepository;
pub use work::WorkRepository;
