//! Ephemeral session state: who is signed in and which view is active.

use crate::domain::View;
use crate::models::Collaborator;

#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<Collaborator>,

    view: View,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Collaborator> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.as_ref().is_some_and(Collaborator::is_approved)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.current.as_ref().is_some_and(|c| c.is_admin)
    }

    /// The view to render. Unauthenticated or unapproved sessions always
    /// land on the login view.
    #[must_use]
    pub fn view(&self) -> View {
        if !self.is_authenticated() {
            return View::Login;
        }
        if self.view.requires_admin() && !self.is_admin() {
            return View::Dashboard;
        }
        self.view
    }

    /// Switches to `view` if the session may see it and returns the view
    /// that is actually active afterwards.
    pub fn navigate(&mut self, view: View) -> View {
        if !self.is_authenticated() {
            return View::Login;
        }
        if view.requires_admin() && !self.is_admin() {
            return self.view();
        }
        if view != View::Login {
            self.view = view;
        }
        self.view()
    }

    /// The signed-in user was handed a password by someone else and has to
    /// pick their own.
    #[must_use]
    pub fn requires_password_change(&self) -> bool {
        self.current.as_ref().is_some_and(|c| c.must_change_password)
    }

    pub(crate) fn sign_in(&mut self, collaborator: Collaborator) {
        self.current = Some(collaborator);
        self.view = View::Dashboard;
    }

    pub fn logout(&mut self) {
        self.current = None;
        self.view = View::Login;
    }

    /// Replaces the session copy when `updated` is the signed-in account.
    pub(crate) fn refresh(&mut self, updated: &Collaborator) {
        if let Some(current) = &mut self.current {
            if current.id == updated.id {
                *current = updated.clone();
            }
        }
    }
}
