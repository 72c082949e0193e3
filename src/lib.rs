//! studybuilder - form tree state engine for a multi-step clinical study
//! protocol builder.
//!
//! A protocol document is a deep tree of repeatable, nested collections
//! (arms with interventions, endpoints, visits with procedures and lab
//! tests, safety rules, eCRFs) edited through an eight-tab wizard. This
//! crate owns that document for the lifetime of one create-study session
//! and exposes the three mutation contracts the wizard shell needs:
//!
//! - path-addressed scalar reads and writes ([`engine::FormEngine::get`],
//!   [`engine::FormEngine::set`])
//! - explicit collection growth and removal ([`engine::FormEngine::append`],
//!   [`engine::FormEngine::remove_at`])
//! - the completeness gate that is advisory between tabs and authoritative
//!   at submission ([`engine::FormEngine::missing_fields`],
//!   [`engine::Wizard::submit`])
//!
//! Everything is single-threaded and synchronous: one user, one session,
//! one document, every mutation applied in the order it was issued.

pub mod document;
pub mod engine;
pub mod fieldpath;
pub mod schema;
pub mod script;
