//! Domain types and models
//!
//! The request side (`GroupDefinition` → `ActionCommand` → `Batch`) and the
//! response side (`ActionCommandResponse`, `AccessToken`) of the UMAPI
//! exchange. Each type owns its explicit wire encoding or decoding.

pub mod command;
pub mod group;
pub mod request;
pub mod response;
pub mod token;

pub use command::{ActionCommand, AddMembershipStep, Batch, ConflictPolicy, CreateGroupStep, Step};
pub use group::GroupDefinition;
pub use request::RequestContext;
pub use response::{ActionCommandIssue, ActionCommandResponse, ActionCommandWarning};
pub use token::AccessToken;
