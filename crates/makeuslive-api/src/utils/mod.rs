pub mod client_ip;
pub mod multipart;
pub mod pagination;
