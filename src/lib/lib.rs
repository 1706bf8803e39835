#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Build an email and deliver it over SMTP, reporting the outcome as an
//! [`EmailResult`](domain::communication::email_sender::EmailResult).

pub mod domain;
pub mod infrastructure;
