use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use rungraph::errors::{Result, RungraphError};
use rungraph::gateway::{HealthStatus, ResultSet, ScheduleRequest, SchedulerService};

/// What the fake answers to every submission.
#[derive(Debug, Clone)]
pub enum FakeReply {
    Results(ResultSet),
    /// Simulated transport failure with this message.
    Unreachable(String),
}

/// A fake scheduling service that:
/// - records every request it receives
/// - answers with a canned reply.
pub struct FakeSchedulerService {
    reply: FakeReply,
    requests: Arc<Mutex<Vec<ScheduleRequest>>>,
}

impl FakeSchedulerService {
    pub fn new(reply: FakeReply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ScheduleRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SchedulerService for FakeSchedulerService {
    fn submit<'a>(
        &'a self,
        request: &'a ScheduleRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ResultSet>> + Send + 'a>> {
        let requests = Arc::clone(&self.requests);
        let reply = self.reply.clone();

        Box::pin(async move {
            requests.lock().unwrap().push(request.clone());
            match reply {
                FakeReply::Results(results) => Ok(results),
                FakeReply::Unreachable(msg) => Err(RungraphError::Http(msg)),
            }
        })
    }

    fn health(&self) -> Pin<Box<dyn Future<Output = Result<HealthStatus>> + Send + '_>> {
        let reply = self.reply.clone();
        Box::pin(async move {
            match reply {
                FakeReply::Results(_) => Ok(HealthStatus {
                    status: "healthy".to_string(),
                }),
                FakeReply::Unreachable(msg) => Err(RungraphError::Http(msg)),
            }
        })
    }
}
