use crate::api::client::ApiResponse;
use crate::api::operations::{FailureAction, Operation, ResponseShape, SuccessAction};
use crate::core::error::ClientError;
use crate::models::customer::{Customer, ErrorBody, HealthStatus};

/// What the completion handler does to the bound form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    Write(Customer),
    Clear,
    Unchanged,
}

/// Terminal result of one operation: a state change, a message, or both
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub operation: Operation,
    pub form: FormEffect,
    /// Replacement result list, `None` leaves the list as it was
    pub results: Option<Vec<Customer>>,
    pub message: String,
    pub error: Option<ClientError>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Outcome for an operation that was never dispatched
    pub fn rejected(operation: Operation, error: ClientError) -> Self {
        Self {
            operation,
            form: FormEffect::Unchanged,
            results: None,
            message: error.to_string(),
            error: Some(error),
        }
    }

    fn failed(operation: Operation, message: String, error: ClientError) -> Self {
        let form = match operation.spec().on_failure {
            FailureAction::ClearForm => FormEffect::Clear,
            FailureAction::KeepForm => FormEffect::Unchanged,
        };

        Self {
            operation,
            form,
            results: None,
            message,
            error: Some(error),
        }
    }
}

/// Turn a transport result into the outcome declared for `operation`
pub fn reconcile(operation: Operation, result: Result<ApiResponse, ClientError>) -> Outcome {
    let response = match result {
        Ok(response) => response,
        Err(error) => return Outcome::failed(operation, operation.failure_message(), error),
    };

    if !response.is_success() {
        let message = extract_error_message(&response.body)
            .unwrap_or_else(|| operation.failure_message());
        let error = ClientError::Server {
            status: response.status,
            message: message.clone(),
        };
        return Outcome::failed(operation, message, error);
    }

    match decode_success(operation, &response.body) {
        Ok(outcome) => outcome,
        Err(error) => Outcome::failed(operation, error.to_string(), error),
    }
}

/// Pull `message` out of a failure body, if the body carries one
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}

fn decode_success(operation: Operation, body: &[u8]) -> Result<Outcome, ClientError> {
    let spec = operation.spec();
    let malformed = || ClientError::MalformedResponse(operation.failure_message());

    let mut outcome = Outcome {
        operation,
        form: FormEffect::Unchanged,
        results: None,
        message: spec.success_message.to_string(),
        error: None,
    };

    match spec.response {
        ResponseShape::Customer => {
            let customer: Customer = serde_json::from_slice(body).map_err(|_| malformed())?;
            if spec.on_success == SuccessAction::WriteForm {
                outcome.form = FormEffect::Write(customer);
            }
        }
        ResponseShape::CustomerList => {
            let customers: Vec<Customer> =
                serde_json::from_slice(body).map_err(|_| malformed())?;
            outcome.results = Some(customers);
        }
        ResponseShape::Empty => {}
        ResponseShape::Health => {
            let health: HealthStatus = serde_json::from_slice(body).map_err(|_| malformed())?;
            outcome.message = health.message;
        }
    }

    if spec.on_success == SuccessAction::ClearForm {
        outcome.form = FormEffect::Clear;
    }

    Ok(outcome)
}
