use crate::api::client::Transport;
use crate::api::operations::{ApiRequest, Operation, OperationClass};
use crate::api::reconciler::{reconcile, FormEffect, Outcome};
use crate::core::error::ClientError;
use crate::form::binder::CustomerForm;
use crate::models::customer::Customer;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Everything the operator sees: the bound form, the last search results
/// and the status line.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub form: CustomerForm,
    pub results: Vec<Customer>,
    pub flash: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completion handler: the only place an outcome touches view state
    pub fn apply(&mut self, outcome: &Outcome) {
        match &outcome.form {
            FormEffect::Write(customer) => self.form.write(customer),
            FormEffect::Clear => self.form.clear(),
            FormEffect::Unchanged => {}
        }

        if let Some(results) = &outcome.results {
            self.results = results.clone();
        }

        self.flash = outcome.message.clone();
    }

    /// Local clear action, no request involved
    pub fn clear_form(&mut self) {
        self.form.clear();
        self.flash = "Form cleared".to_string();
    }
}

/// In-flight flags, one per operation class
#[derive(Debug, Default)]
pub struct InFlight {
    search: AtomicBool,
    form: AtomicBool,
    status: AtomicBool,
}

/// Releases the in-flight flag when dropped
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl InFlight {
    fn flag(&self, class: OperationClass) -> &AtomicBool {
        match class {
            OperationClass::Search => &self.search,
            OperationClass::Form => &self.form,
            OperationClass::Status => &self.status,
        }
    }

    /// Claim `class`, or `None` while another request of that class is out
    pub fn try_acquire(&self, class: OperationClass) -> Option<InFlightGuard<'_>> {
        let flag = self.flag(class);
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| InFlightGuard { flag })
    }

    pub fn is_busy(&self, class: OperationClass) -> bool {
        self.flag(class).load(Ordering::Acquire)
    }
}

/// Dispatches resource operations over a transport
pub struct CustomerConsole<T> {
    transport: T,
    in_flight: InFlight,
}

impl<T: Transport> CustomerConsole<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            in_flight: InFlight::default(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Run `operation` against a snapshot of `form`.
    ///
    /// Never fails: preconditions, transport errors and bad responses all
    /// come back as an `Outcome` carrying the message to show. Concurrent
    /// callers get a rejection while a request of the same class is out.
    pub async fn dispatch(&self, operation: Operation, form: &CustomerForm) -> Outcome {
        let spec = operation.spec();

        let Some(_guard) = self.in_flight.try_acquire(spec.class) else {
            warn!(operation = %operation, "Rejected dispatch, request already in flight");
            return Outcome::rejected(operation, ClientError::Busy(spec.label));
        };

        let request = match ApiRequest::build(operation, form) {
            Ok(request) => request,
            Err(e) => {
                warn!(operation = %operation, error = %e, "Precondition failed, request not sent");
                return Outcome::rejected(operation, e);
            }
        };

        info!(
            operation = %operation,
            method = %request.method,
            path = %request.path_and_query(),
            "Dispatching request"
        );

        if let Some(body) = &request.body {
            debug!(
                username = %body.username,
                email = %body.email,
                active = body.active,
                promo = body.promo,
                "Request body"
            );
        }

        let result = self.transport.execute(&request).await;
        let status = result.as_ref().ok().map(|response| response.status);
        let outcome = reconcile(operation, result);

        match &outcome.error {
            None => info!(
                operation = %operation,
                status = ?status,
                results = ?outcome.results.as_ref().map(Vec::len),
                "Operation succeeded"
            ),
            Some(e) => warn!(
                operation = %operation,
                status = ?status,
                error = ?e,
                message = %outcome.message,
                "Operation failed"
            ),
        }

        outcome
    }

    /// Dispatch and apply the outcome to `view` in one step
    pub async fn run(&self, operation: Operation, view: &mut ViewState) -> Outcome {
        let snapshot = view.form.clone();
        let outcome = self.dispatch(operation, &snapshot).await;
        view.apply(&outcome);
        outcome
    }
}
