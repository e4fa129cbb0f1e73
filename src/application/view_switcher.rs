// View switcher - Exclusive selection of the visible page region
use crate::domain::view::{ControlId, InvalidViewError, NavBinding, ViewId};
use std::collections::HashSet;

/// Tracks which single view, and which single navigation control, is active.
///
/// Views and controls are paired one-to-one by [`NavBinding`], so the active
/// control is always the one bound to the active view.
#[derive(Debug, Clone)]
pub struct ViewSwitcher {
    bindings: Vec<NavBinding>,
    active: usize,
}

impl ViewSwitcher {
    pub fn new(bindings: Vec<NavBinding>, default_view: &ViewId) -> Result<Self, InvalidViewError> {
        if bindings.is_empty() {
            return Err(InvalidViewError::NoViews);
        }

        let mut views = HashSet::new();
        let mut controls = HashSet::new();
        for binding in &bindings {
            if !views.insert(&binding.view_id) {
                return Err(InvalidViewError::DuplicateView(binding.view_id.clone()));
            }
            if !controls.insert(&binding.control_id) {
                return Err(InvalidViewError::DuplicateControl(binding.control_id.clone()));
            }
        }

        let active = Self::position(&bindings, default_view)?;
        Ok(Self { bindings, active })
    }

    /// Make `view_id` the only active view and its control the only active
    /// control. Unknown ids leave the current selection untouched.
    pub fn activate(&mut self, view_id: &ViewId) -> Result<(), InvalidViewError> {
        let index = Self::position(&self.bindings, view_id)?;
        if index != self.active {
            tracing::debug!(from = %self.active_view(), to = %view_id, "switching view");
        }
        self.active = index;
        Ok(())
    }

    /// Resolve a navigation control to the view it activates
    pub fn control_for(&self, control_id: &ControlId) -> Option<&ViewId> {
        self.bindings
            .iter()
            .find(|b| &b.control_id == control_id)
            .map(|b| &b.view_id)
    }

    pub fn active_view(&self) -> &ViewId {
        &self.bindings[self.active].view_id
    }

    pub fn active_control(&self) -> &ControlId {
        &self.bindings[self.active].control_id
    }

    pub fn is_view_active(&self, view_id: &ViewId) -> bool {
        self.active_view() == view_id
    }

    pub fn is_control_active(&self, control_id: &ControlId) -> bool {
        self.active_control() == control_id
    }

    pub fn bindings(&self) -> &[NavBinding] {
        &self.bindings
    }

    fn position(bindings: &[NavBinding], view_id: &ViewId) -> Result<usize, InvalidViewError> {
        bindings
            .iter()
            .position(|b| &b.view_id == view_id)
            .ok_or_else(|| InvalidViewError::UnknownView(view_id.clone()))
    }
}
