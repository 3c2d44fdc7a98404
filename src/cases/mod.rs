//! The declared test cases, in execution order.
//!
//! Each case issues its own HTTP calls and classifies the result into an
//! [`Outcome`]. A case body may fail with any error; [`Case::execute`] turns
//! that error into a FAIL outcome so one broken case never stops the run.

use anyhow::Result;
use serde_json::Value;
use tracing::warn;

use crate::client::ApiClient;
use crate::result::TestStatus;

pub mod connectivity;
pub mod cors;
pub mod status;

/// Classification produced by a single case.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub status: TestStatus,
    pub details: String,
    pub response_data: Option<Value>,
}

impl Outcome {
    pub fn pass(details: impl Into<String>) -> Self {
        Self::new(TestStatus::Pass, details)
    }

    pub fn fail(details: impl Into<String>) -> Self {
        Self::new(TestStatus::Fail, details)
    }

    pub fn partial(details: impl Into<String>) -> Self {
        Self::new(TestStatus::Partial, details)
    }

    fn new(status: TestStatus, details: impl Into<String>) -> Self {
        Self {
            status,
            details: details.into(),
            response_data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.response_data = Some(data);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Connectivity,
    ListStatus,
    CreateStatus,
    CreateValidation,
    Cors,
    DatabaseFlow,
    Environment,
    ResponseFormat,
}

impl Case {
    /// Every case, in the order a run executes them.
    pub const ALL: [Case; 8] = [
        Case::Connectivity,
        Case::ListStatus,
        Case::CreateStatus,
        Case::CreateValidation,
        Case::Cors,
        Case::DatabaseFlow,
        Case::Environment,
        Case::ResponseFormat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Case::Connectivity => "Basic Connectivity",
            Case::ListStatus => "GET Status Endpoint",
            Case::CreateStatus => "POST Status Endpoint",
            Case::CreateValidation => "POST Status Validation",
            Case::Cors => "CORS Configuration",
            Case::DatabaseFlow => "Database Flow Test",
            Case::Environment => "Environment Configuration",
            Case::ResponseFormat => "API Response Format",
        }
    }

    /// Prefix put in front of an error message when the case body errors out.
    fn error_prefix(self) -> &'static str {
        match self {
            Case::Connectivity => "Connection error",
            Case::ListStatus | Case::CreateStatus | Case::CreateValidation | Case::Cors => {
                "Request error"
            }
            Case::DatabaseFlow => "Flow test error",
            Case::Environment => "Config test error",
            Case::ResponseFormat => "Format test error",
        }
    }

    /// Run the case body, letting errors escape.
    pub async fn run(self, api: &ApiClient) -> Result<Outcome> {
        match self {
            Case::Connectivity => connectivity::basic_connectivity(api).await,
            Case::ListStatus => status::list_status(api).await,
            Case::CreateStatus => status::create_status(api).await,
            Case::CreateValidation => status::create_validation(api).await,
            Case::Cors => cors::preflight(api).await,
            Case::DatabaseFlow => status::database_flow(api).await,
            Case::Environment => cors::environment(api).await,
            Case::ResponseFormat => status::response_format(api).await,
        }
    }

    /// Run the case and always produce an outcome.
    pub async fn execute(self, api: &ApiClient) -> Outcome {
        match self.run(api).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(case = self.name(), error = %format!("{:#}", e), "test case errored");
                Outcome::fail(format!("{}: {:#}", self.error_prefix(), e))
            }
        }
    }
}

impl std::fmt::Display for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Eight hex characters from a fresh v4 UUID, for unique record names.
pub(crate) fn short_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

/// JSON type name used in failure messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
