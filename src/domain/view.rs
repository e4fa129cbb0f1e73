// View and navigation control identifiers
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ControlId(String);

impl ControlId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A navigation control and the view it activates
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavBinding {
    pub control_id: ControlId,
    pub view_id: ViewId,
}

impl NavBinding {
    pub fn new(control_id: impl Into<String>, view_id: impl Into<String>) -> Self {
        Self {
            control_id: ControlId::new(control_id),
            view_id: ViewId::new(view_id),
        }
    }
}

/// Misuse of the view switcher. These are wiring defects, not runtime
/// conditions: the set of views is fixed when the switcher is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidViewError {
    #[error("unknown view: {0}")]
    UnknownView(ViewId),

    #[error("no views configured")]
    NoViews,

    #[error("view {0} is bound to more than one control")]
    DuplicateView(ViewId),

    #[error("control {0} is bound to more than one view")]
    DuplicateControl(ControlId),
}
