//! Stack invocation descriptors.
//!
//! A stack is an opaque unit of provisionable infrastructure. This crate
//! only assembles what is handed to it: a unique id, the target
//! account/region, the environment name, a description and a fixed set of
//! tags.

pub mod props;

pub use props::{
    standard_tags, stack_id, StackProps, Tags, OWNER, PROJECT, PURPOSE, STACK_DESCRIPTION,
    STACK_ID_PREFIX,
};

use serde::Serialize;

/// A constructed stack: its id plus the properties it was created with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    pub id: String,
    pub props: StackProps,
}

impl Stack {
    pub fn new(id: impl Into<String>, props: StackProps) -> Self {
        Self {
            id: id.into(),
            props,
        }
    }

    /// File name of the template this stack synthesizes to.
    pub fn template_file(&self) -> String {
        format!("{}.template.json", self.id)
    }
}
