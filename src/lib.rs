// src/lib.rs

//! Bantay: change notifications for resident portal collections.
//!
//! Each portal resource (announcements, service requests, feedback, FAQs,
//! officials, emergency hotlines) gets one [`watch::ResourceWatcher`] that
//! polls the read endpoint, diffs the result against the previously
//! retained snapshot, and dispatches new/updated events to listeners.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod watch;
