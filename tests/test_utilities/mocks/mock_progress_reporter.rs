use ddg_vis::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ProgressReporter that records every message, tagged by channel
///
/// Clones share the same log, so a clone kept by the test sees what the
/// use case reported.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    log: Arc<Mutex<Vec<(Channel, String)>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Info,
    Progress,
    Error,
    Completion,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, channel: Channel, message: String) {
        self.log.lock().unwrap().push((channel, message));
    }

    fn channel(&self, channel: Channel) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.channel(Channel::Info)
    }

    pub fn errors(&self) -> Vec<String> {
        self.channel(Channel::Error)
    }

    pub fn progress_updates(&self) -> usize {
        self.channel(Channel::Progress).len()
    }

    pub fn completions(&self) -> Vec<String> {
        self.channel(Channel::Completion)
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.push(Channel::Info, message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.push(
            Channel::Progress,
            format!("{}/{} {}", current, total, message.unwrap_or_default()),
        );
    }

    fn report_error(&self, message: &str) {
        self.push(Channel::Error, message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.push(Channel::Completion, message.to_string());
    }
}
