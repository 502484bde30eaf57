//! # User Panel
//!
//! Ties the form, the transport and the display together. Every operation
//! ends the same way: the display is overwritten with either
//! `Response: {status}\n{body}` or `Error: {message}`.
//!
//! Operations can be awaited directly, or dispatched to background tasks.
//! Dispatched tasks are joined in the order they complete and each outcome is
//! applied as it is joined, so the display ends up showing whichever call
//! resolved last. A task that dies without an outcome still shows up as an
//! `Error:` line.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::task::{Id, JoinError, JoinSet};

use crate::client::{ApiResponse, HttpTransport, Operation, Transport};
use crate::display::SharedDisplay;
use crate::form::{FormSource, UserInput};
use crate::profile::IniProfile;

/// Line logged once the panel is initialized
pub const READY_MESSAGE: &str = "userline client is ready";

/// How a call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The server answered, whatever the status
    Received(ApiResponse),
    /// No answer: connection, protocol or body read failure
    Failed { message: String },
}

impl RequestOutcome {
    /// Collapse a transport result, keeping the whole error chain in the message
    pub fn from_result(result: Result<ApiResponse>) -> Self {
        match result {
            Ok(response) => RequestOutcome::Received(response),
            Err(e) => {
                let mut message = format!("{e}");
                for cause in e.chain().skip(1) {
                    message.push_str(&format!("\n  Caused by: {cause}"));
                }
                tracing::debug!("HTTP request failed: {message}");
                RequestOutcome::Failed { message }
            }
        }
    }

    /// Text written to the display
    pub fn display_text(&self) -> String {
        match self {
            RequestOutcome::Received(response) => {
                format!("Response: {}\n{}", response.status, response.body)
            }
            RequestOutcome::Failed { message } => format!("Error: {message}"),
        }
    }

    pub fn is_received(&self) -> bool {
        matches!(self, RequestOutcome::Received(_))
    }
}

/// Outcome of a dispatched operation
#[derive(Debug, Clone)]
pub struct OutcomeMessage {
    pub operation: &'static str,
    pub outcome: RequestOutcome,
}

/// Client-side controller for the user API
pub struct UserPanel {
    transport: Arc<dyn Transport>,
    display: SharedDisplay,
    tasks: JoinSet<OutcomeMessage>,
    labels: HashMap<Id, &'static str>,
}

impl UserPanel {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            display: SharedDisplay::new(),
            tasks: JoinSet::new(),
            labels: HashMap::new(),
        }
    }

    /// Build a panel talking to the profile's server over HTTP
    pub fn from_profile(profile: &IniProfile) -> Result<Self> {
        tracing::debug!(
            "Creating panel for profile '{}' ({})",
            profile.name(),
            profile.server_or_default()
        );
        let transport = HttpTransport::new(profile.server_or_default())?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn display(&self) -> &SharedDisplay {
        &self.display
    }

    /// Startup hook, called once by the host
    pub fn on_ready(&self) {
        tracing::info!("{READY_MESSAGE}");
    }

    /// POST the form's user to the collection
    pub async fn create_user(&self, form: &impl FormSource) -> RequestOutcome {
        self.run(Operation::Create(UserInput::read_from(form))).await
    }

    /// GET the collection
    pub async fn get_users(&self) -> RequestOutcome {
        self.run(Operation::List).await
    }

    /// PUT the form's user over an existing one
    pub async fn update_user(&self, id: &str, form: &impl FormSource) -> RequestOutcome {
        self.run(Operation::Update {
            id: id.to_string(),
            input: UserInput::read_from(form),
        })
        .await
    }

    /// PATCH an existing user with the form's values
    pub async fn patch_user(&self, id: &str, form: &impl FormSource) -> RequestOutcome {
        self.run(Operation::Patch {
            id: id.to_string(),
            input: UserInput::read_from(form),
        })
        .await
    }

    pub async fn delete_user(&self, id: &str) -> RequestOutcome {
        self.run(Operation::Delete { id: id.to_string() }).await
    }

    /// Run an operation to completion and show its outcome
    pub async fn run(&self, operation: Operation) -> RequestOutcome {
        let outcome = execute(self.transport.as_ref(), &operation).await;
        self.display.set_text(outcome.display_text());
        outcome
    }

    /// Run an operation on a background task.
    ///
    /// The outcome reaches the display once it is joined through
    /// [`UserPanel::next_outcome`] or [`UserPanel::settle`].
    pub fn dispatch(&mut self, operation: Operation) {
        let transport = Arc::clone(&self.transport);
        let label = operation.label();

        let handle = self.tasks.spawn(async move {
            let outcome = execute(transport.as_ref(), &operation).await;
            OutcomeMessage {
                operation: operation.label(),
                outcome,
            }
        });
        self.labels.insert(handle.id(), label);
    }

    /// Number of dispatched operations whose outcome has not been applied yet
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for the next dispatched operation to finish and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_outcome(&mut self) -> Option<OutcomeMessage> {
        let message = match self.tasks.join_next_with_id().await? {
            Ok((id, message)) => {
                self.labels.remove(&id);
                message
            }
            Err(e) => self.lost_task(e),
        };
        tracing::debug!("Applying outcome of {}", message.operation);
        self.display.set_text(message.outcome.display_text());
        Some(message)
    }

    /// Wait for every dispatched operation, applying outcomes in completion order
    pub async fn settle(&mut self) -> Vec<OutcomeMessage> {
        let mut applied = Vec::with_capacity(self.pending());
        while let Some(message) = self.next_outcome().await {
            applied.push(message);
        }
        applied
    }

    /// Outcome for a task that panicked or was cancelled before finishing
    fn lost_task(&mut self, e: JoinError) -> OutcomeMessage {
        let operation = self.labels.remove(&e.id()).unwrap_or("unknown");
        let message = if e.is_panic() {
            format!("{operation} request aborted: task panicked")
        } else {
            format!("{operation} request aborted: task cancelled")
        };
        tracing::debug!("{message}");
        OutcomeMessage {
            operation,
            outcome: RequestOutcome::Failed { message },
        }
    }
}

async fn execute(transport: &dyn Transport, operation: &Operation) -> RequestOutcome {
    let result = async {
        let request = operation.to_request()?;
        tracing::debug!(
            "Executing {}: {} {}",
            operation.label(),
            request.method(),
            request.path()
        );
        transport.send(&request).await
    }
    .await;
    RequestOutcome::from_result(result)
}
