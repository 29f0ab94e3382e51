//! GraphQL operation requests.
//!
//! An [`OperationRequest`] names one GraphQL operation, its variables and its
//! query document. It serializes to the wire object the PurrSong endpoint
//! expects: `{"operationName": ..., "variables": ..., "query": ...}`.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A single GraphQL operation to send to the PurrSong endpoint.
///
/// Use [`OperationRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use lavviebot_api::clients::OperationRequest;
/// use serde_json::json;
///
/// let request = OperationRequest::builder("GetLavviebotDetails", "query GetLavviebotDetails { id }")
///     .variables(json!({"data": {"iotId": 42}}))
///     .build();
///
/// assert!(request.requires_auth);
/// let wire = serde_json::to_value(&request).unwrap();
/// assert_eq!(wire["operationName"], "GetLavviebotDetails");
/// assert_eq!(wire["variables"]["data"]["iotId"], 42);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OperationRequest {
    /// The GraphQL operation name.
    pub operation_name: String,
    /// The operation variables (an empty object when there are none).
    pub variables: Value,
    /// The GraphQL query document.
    pub query: String,
    /// Whether the request needs cookie and bearer token.
    pub requires_auth: bool,
}

impl OperationRequest {
    /// Creates a new builder for an operation with the given name and query.
    #[must_use]
    pub fn builder(
        operation_name: impl Into<String>,
        query: impl Into<String>,
    ) -> OperationRequestBuilder {
        OperationRequestBuilder::new(operation_name, query)
    }
}

impl Serialize for OperationRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("OperationRequest", 3)?;
        state.serialize_field("operationName", &self.operation_name)?;
        state.serialize_field("variables", &self.variables)?;
        state.serialize_field("query", &self.query)?;
        state.end()
    }
}

/// Builder for constructing [`OperationRequest`] instances.
#[derive(Debug)]
pub struct OperationRequestBuilder {
    operation_name: String,
    query: String,
    variables: Value,
    requires_auth: bool,
}

impl OperationRequestBuilder {
    fn new(operation_name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            operation_name: operation_name.into(),
            query: query.into(),
            variables: Value::Object(serde_json::Map::new()),
            requires_auth: true,
        }
    }

    /// Sets the operation variables.
    #[must_use]
    pub fn variables(mut self, variables: impl Into<Value>) -> Self {
        self.variables = variables.into();
        self
    }

    /// Marks the operation as callable without a session.
    ///
    /// Only the server status check and the login mutation are sent this way.
    #[must_use]
    pub const fn anonymous(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    /// Builds the [`OperationRequest`].
    #[must_use]
    pub fn build(self) -> OperationRequest {
        OperationRequest {
            operation_name: self.operation_name,
            variables: self.variables,
            query: self.query,
            requires_auth: self.requires_auth,
        }
    }
}

/// The JSON body of one POST: a single operation or a batch.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Payload<'a> {
    Single(&'a OperationRequest),
    Batch(&'a [OperationRequest]),
}

impl Payload<'_> {
    /// Serializes the payload into the request body.
    pub(crate) fn to_json(self) -> Value {
        match self {
            Self::Single(request) => serde_json::json!(request),
            Self::Batch(requests) => serde_json::json!(requests),
        }
    }

    /// Whether any operation in the payload needs a session.
    pub(crate) fn requires_auth(self) -> bool {
        match self {
            Self::Single(request) => request.requires_auth,
            Self::Batch(requests) => requests.iter().any(|r| r.requires_auth),
        }
    }

    /// Operation names, joined for logging.
    pub(crate) fn describe(self) -> String {
        match self {
            Self::Single(request) => request.operation_name.clone(),
            Self::Batch(requests) => requests
                .iter()
                .map(|r| r.operation_name.as_str())
                .collect::<Vec<_>>()
                .join("+"),
        }
    }
}
