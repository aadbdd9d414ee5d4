//! Mock definition data: custom members, resolved method definitions and the
//! aggregate resolution request.

pub mod collection;
pub mod custom;
pub mod method;
pub mod request;

pub use collection::MethodDefinitionCollection;
pub use custom::{AdHocValue, CustomMembers, DefinitionKey, MemberKind};
pub use method::{Callable, CustomMethod, DefinitionSite, Dispatch, MethodDefinition};
pub use request::ResolutionRequest;
