//! Core descriptor types shared by every resolution stage

pub mod types;

pub use types::{MethodSignature, Parameter, SourceType, TypeKind, Visibility};
