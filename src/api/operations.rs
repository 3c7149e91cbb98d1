use crate::core::error::ClientError;
use crate::form::binder::{CustomerForm, FormField};
use crate::models::customer::CustomerPayload;
use crate::query::encoder::SearchFilter;
use reqwest::Method;
use std::fmt;
use std::str::FromStr;

/// One action against the customer resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Search,
    Retrieve,
    Create,
    Update,
    Delete,
    Activate,
    Deactivate,
    Subscribe,
    Unsubscribe,
    Healthcheck,
}

/// Operations sharing a class share one piece of view state and may not
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    /// Writes the search result list
    Search,
    /// Writes the bound form
    Form,
    /// Writes only the status line
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTemplate {
    /// `/customers`
    Collection,
    /// `/customers/{id}`
    Item,
    /// `/customers/{id}/<action>`
    ItemAction(&'static str),
    /// `/healthcheck`
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestBody {
    None,
    Customer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Customer,
    CustomerList,
    Empty,
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessAction {
    RenderResults,
    WriteForm,
    ClearForm,
    ShowStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    KeepForm,
    ClearForm,
}

/// Declarative description of an operation: wire shape plus the
/// success and failure policy applied by the reconciler.
#[derive(Debug, Clone)]
pub struct OperationSpec {
    pub label: &'static str,
    pub method: Method,
    pub path: PathTemplate,
    pub body: RequestBody,
    pub response: ResponseShape,
    pub on_success: SuccessAction,
    pub on_failure: FailureAction,
    pub success_message: &'static str,
    pub class: OperationClass,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::Search,
        Operation::Retrieve,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::Activate,
        Operation::Deactivate,
        Operation::Subscribe,
        Operation::Unsubscribe,
        Operation::Healthcheck,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::Retrieve => "retrieve",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Activate => "activate",
            Operation::Deactivate => "deactivate",
            Operation::Subscribe => "subscribe",
            Operation::Unsubscribe => "unsubscribe",
            Operation::Healthcheck => "healthcheck",
        }
    }

    pub fn spec(self) -> OperationSpec {
        match self {
            Operation::Search => OperationSpec {
                label: "Search",
                method: Method::GET,
                path: PathTemplate::Collection,
                body: RequestBody::None,
                response: ResponseShape::CustomerList,
                on_success: SuccessAction::RenderResults,
                on_failure: FailureAction::KeepForm,
                success_message: "Success",
                class: OperationClass::Search,
            },
            Operation::Retrieve => OperationSpec {
                on_failure: FailureAction::ClearForm,
                ..form_spec("Retrieve", Method::GET, PathTemplate::Item)
            },
            Operation::Create => OperationSpec {
                body: RequestBody::Customer,
                ..form_spec("Create", Method::POST, PathTemplate::Collection)
            },
            Operation::Update => OperationSpec {
                body: RequestBody::Customer,
                ..form_spec("Update", Method::PUT, PathTemplate::Item)
            },
            Operation::Delete => OperationSpec {
                response: ResponseShape::Empty,
                on_success: SuccessAction::ClearForm,
                success_message: "Customer has been Deleted!",
                ..form_spec("Delete", Method::DELETE, PathTemplate::Item)
            },
            Operation::Activate => {
                form_spec("Activate", Method::PUT, PathTemplate::ItemAction("activate"))
            }
            Operation::Deactivate => {
                form_spec("Deactivate", Method::PUT, PathTemplate::ItemAction("deactivate"))
            }
            Operation::Subscribe => {
                form_spec("Subscribe", Method::PUT, PathTemplate::ItemAction("subscribe"))
            }
            Operation::Unsubscribe => {
                form_spec("Unsubscribe", Method::PUT, PathTemplate::ItemAction("unsubscribe"))
            }
            Operation::Healthcheck => OperationSpec {
                label: "Healthcheck",
                method: Method::GET,
                path: PathTemplate::Health,
                body: RequestBody::None,
                response: ResponseShape::Health,
                on_success: SuccessAction::ShowStatus,
                on_failure: FailureAction::KeepForm,
                success_message: "Healthy",
                class: OperationClass::Status,
            },
        }
    }

    /// Message shown when a failure carries no `message` of its own
    pub fn failure_message(self) -> String {
        format!("{} failed", self.spec().label)
    }
}

// Bodyless form operation: the response replaces the form, a failure
// leaves it untouched.
fn form_spec(label: &'static str, method: Method, path: PathTemplate) -> OperationSpec {
    OperationSpec {
        label,
        method,
        path,
        body: RequestBody::None,
        response: ResponseShape::Customer,
        on_success: SuccessAction::WriteForm,
        on_failure: FailureAction::KeepForm,
        success_message: "Success",
        class: OperationClass::Form,
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == lowered)
            .ok_or_else(|| format!("Unknown operation '{}'", s))
    }
}

impl PathTemplate {
    fn needs_id(self) -> bool {
        matches!(self, PathTemplate::Item | PathTemplate::ItemAction(_))
    }

    fn render(self, id: Option<u64>) -> String {
        match (self, id) {
            (PathTemplate::Collection, _) => "/customers".to_string(),
            (PathTemplate::Item, Some(id)) => format!("/customers/{}", id),
            (PathTemplate::ItemAction(action), Some(id)) => format!("/customers/{}/{}", id, action),
            (PathTemplate::Health, _) => "/healthcheck".to_string(),
            (_, None) => "/customers".to_string(),
        }
    }
}

/// A fully resolved request, ready for the transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub operation: Operation,
    pub method: Method,
    pub path: String,
    /// Encoded query string without `?`, present only when non-empty
    pub query: Option<String>,
    pub body: Option<CustomerPayload>,
}

impl ApiRequest {
    /// Build the request for `operation` from a snapshot of the form.
    ///
    /// Id-addressed operations fail here, before dispatch, when the id field
    /// is empty or invalid.
    pub fn build(operation: Operation, form: &CustomerForm) -> Result<Self, ClientError> {
        let spec = operation.spec();

        let id = if spec.path.needs_id() {
            Some(form.customer_id()?)
        } else {
            None
        };

        let query = if operation == Operation::Search {
            let encoded = SearchFilter::from_form(form)
                .encode()
                .map_err(|e| ClientError::Encode(e.to_string()))?;
            (!encoded.is_empty()).then_some(encoded)
        } else {
            None
        };

        let body = match spec.body {
            RequestBody::Customer => {
                let mut customer = form.read();
                // New customers start active unless the operator says otherwise
                if operation == Operation::Create && form.get(FormField::Active).trim().is_empty() {
                    customer.active = true;
                }
                Some(customer.payload())
            }
            RequestBody::None => None,
        };

        Ok(Self {
            operation,
            method: spec.method,
            path: spec.path.render(id),
            query,
            body,
        })
    }

    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}
