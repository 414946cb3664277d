// src/services/watchers.rs

//! Per-resource watcher registry.
//!
//! One watcher instance per portal resource, built explicitly from
//! configuration at application start. Handles are cheap clones of the
//! same instance, so the one-watcher-per-resource rule holds process-wide
//! for as long as the registry lives.

use std::sync::Arc;

use futures::future::join_all;
use serde::de::DeserializeOwned;

use crate::config::{Config, ResourcePoll};
use crate::error::Result;
use crate::models::{Announcement, EmergencyHotline, Faq, Feedback, Official, ServiceRequest};
use crate::services::{EndpointFeed, PortalClient};
use crate::watch::{ResourceWatcher, Tracked, Watch};

/// The full set of portal watchers.
pub struct PortalWatchers {
    announcements: ResourceWatcher<Announcement>,
    requests: ResourceWatcher<ServiceRequest>,
    feedback: ResourceWatcher<Feedback>,
    faqs: ResourceWatcher<Faq>,
    officials: ResourceWatcher<Official>,
    hotlines: ResourceWatcher<EmergencyHotline>,
}

fn build<R>(client: &PortalClient, poll: &ResourcePoll) -> ResourceWatcher<R>
where
    R: Tracked + DeserializeOwned,
{
    let feed = EndpointFeed::new(client.clone(), poll.path.clone());
    ResourceWatcher::new(Arc::new(feed), poll.interval())
}

impl PortalWatchers {
    /// Build the one watcher per resource from validated configuration.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = PortalClient::new(&config.api)?;

        Ok(Self {
            announcements: build(&client, &config.poll.announcements),
            requests: build(&client, &config.poll.requests),
            feedback: build(&client, &config.poll.feedback),
            faqs: build(&client, &config.poll.faqs),
            officials: build(&client, &config.poll.officials),
            hotlines: build(&client, &config.poll.hotlines),
        })
    }

    pub fn announcements(&self) -> &ResourceWatcher<Announcement> {
        &self.announcements
    }

    pub fn requests(&self) -> &ResourceWatcher<ServiceRequest> {
        &self.requests
    }

    pub fn feedback(&self) -> &ResourceWatcher<Feedback> {
        &self.feedback
    }

    pub fn faqs(&self) -> &ResourceWatcher<Faq> {
        &self.faqs
    }

    pub fn officials(&self) -> &ResourceWatcher<Official> {
        &self.officials
    }

    pub fn hotlines(&self) -> &ResourceWatcher<EmergencyHotline> {
        &self.hotlines
    }

    fn all(&self) -> [&dyn Watch; 6] {
        [
            &self.announcements,
            &self.requests,
            &self.feedback,
            &self.faqs,
            &self.officials,
            &self.hotlines,
        ]
    }

    /// Look up a watcher by resource name.
    pub fn get(&self, resource: &str) -> Option<&dyn Watch> {
        self.all().into_iter().find(|w| w.resource() == resource)
    }

    /// Resource names covered by this registry.
    pub fn names(&self) -> Vec<&'static str> {
        self.all().into_iter().map(|w| w.resource()).collect()
    }

    /// Begin polling every resource.
    pub fn start_all(&self) {
        for watcher in self.all() {
            watcher.start();
        }
    }

    /// Request every poll loop to end.
    pub fn stop_all(&self) {
        for watcher in self.all() {
            watcher.stop();
        }
    }

    /// One immediate fetch-and-diff sweep across every resource.
    pub async fn check_all(&self) {
        join_all(self.all().into_iter().map(|w| w.check_now())).await;
    }
}
