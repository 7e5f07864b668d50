// ABOUTME: Deployment orchestration: action resolution and the invocation state machine.
// ABOUTME: Exports the pure resolver, request types, and typestate transitions.

mod action;
mod error;
mod invocation;
mod orchestrator;
mod request;
mod resolver;
mod state;
mod transitions;

pub use action::Action;
pub use error::{PreconditionError, RequestError};
pub use invocation::{Invocation, Outcome};
pub use orchestrator::run;
pub use request::{
    DEFAULT_STAGING_NAME, DeploymentRequest, DeploymentSettings, RuntimeVersion, SlotSelector,
};
pub use resolver::{Plan, SlotIntent, resolve};
pub use state::{Applied, Located, Pending, Planned};
