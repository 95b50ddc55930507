//! Request dispatch.
//!
//! Each request type maps to exactly one [`RequestHandler`] and any number of
//! [`Validator`]s, registered by type. [`Mediator::send`] runs every validator,
//! returns all field errors together if any failed, and otherwise calls the
//! handler.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{ApplicationError, ApplicationResult};
use crate::outcome::{Failure, FieldError, Outcome};

/// A command or query.
pub trait Request: Send + Sync + 'static {
    type Response: Send + 'static;
}

/// A request that changes state.
pub trait Command: Request {}

/// A request that only reads state.
pub trait Query: Request {}

/// Implements [`Request`] and [`Command`] for each `Type => Response` pair.
macro_rules! commands {
    ($($request:ty => $response:ty),+ $(,)?) => {
        $(
            impl $crate::mediator::Request for $request {
                type Response = $response;
            }
            impl $crate::mediator::Command for $request {}
        )+
    };
}

/// Implements [`Request`] and [`Query`] for each `Type => Response` pair.
macro_rules! queries {
    ($($request:ty => $response:ty),+ $(,)?) => {
        $(
            impl $crate::mediator::Request for $request {
                type Response = $response;
            }
            impl $crate::mediator::Query for $request {}
        )+
    };
}

pub(crate) use commands;
pub(crate) use queries;

/// Handles one request type.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<R::Response>>;
}

/// Structural checks that run before the handler.
pub trait Validator<R: Request>: Send + Sync {
    fn validate(&self, request: &R) -> Vec<FieldError>;
}

type HandlerSlot = Box<dyn Any + Send + Sync>;

/// Registry of handlers and validators keyed by request type.
#[derive(Default)]
pub struct Mediator {
    handlers: HashMap<TypeId, HandlerSlot>,
    validators: HashMap<TypeId, Vec<HandlerSlot>>,
}

impl Mediator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler for `R`, replacing any previous one.
    pub fn register_handler<R, H>(&mut self, handler: H) -> &mut Self
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let handler: Arc<dyn RequestHandler<R>> = Arc::new(handler);
        self.handlers.insert(TypeId::of::<R>(), Box::new(handler));
        self
    }

    /// Adds a validator for `R`. Validators run in registration order.
    pub fn register_validator<R, V>(&mut self, validator: V) -> &mut Self
    where
        R: Request,
        V: Validator<R> + 'static,
    {
        let validator: Arc<dyn Validator<R>> = Arc::new(validator);
        self.validators
            .entry(TypeId::of::<R>())
            .or_default()
            .push(Box::new(validator));
        self
    }

    pub fn has_handler<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Validates and dispatches a request.
    #[tracing::instrument(skip_all, fields(request = request_name::<R>()))]
    pub async fn send<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> ApplicationResult<Outcome<R::Response>> {
        metrics::counter!("mediator_requests_total", "request" => request_name::<R>())
            .increment(1);

        let handler = self
            .handlers
            .get(&TypeId::of::<R>())
            .and_then(|slot| slot.downcast_ref::<Arc<dyn RequestHandler<R>>>())
            .cloned()
            .ok_or(ApplicationError::HandlerNotRegistered(type_name::<R>()))?;

        if cancel.is_cancelled() {
            return Err(ApplicationError::Cancelled);
        }

        let errors: Vec<FieldError> = self
            .validators
            .get(&TypeId::of::<R>())
            .into_iter()
            .flatten()
            .filter_map(|slot| slot.downcast_ref::<Arc<dyn Validator<R>>>())
            .flat_map(|validator| validator.validate(&request))
            .collect();
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "request rejected by validation");
            return Ok(Outcome::Failure(Failure::validation(errors)));
        }

        let outcome = handler.handle(request, cancel).await?;
        if let Some(failure) = outcome.failure() {
            tracing::debug!(message = %failure.message, "request failed");
        }
        Ok(outcome)
    }
}

/// Type name without its module path.
fn request_name<R>() -> &'static str {
    let full = type_name::<R>();
    full.rsplit("::").next().unwrap_or(full)
}
