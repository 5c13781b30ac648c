//! Per-shell session state and the handler invocation context.

use crate::auth::{Privilege, SecretVerifier};

/// Session flags touched by the input-processing path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    privilege: Privilege,
    active: bool,
    menu_requested: bool,
}

impl Session {
    /// Create an inactive session without privileges.
    pub const fn new() -> Self {
        Self {
            privilege: Privilege::None,
            active: false,
            menu_requested: false,
        }
    }

    /// Current privilege level.
    pub fn privilege(&self) -> Privilege {
        self.privilege
    }

    /// Check whether the shell accepts input.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start accepting input.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop accepting input and drop privileges.
    pub fn quit(&mut self) {
        self.active = false;
        self.menu_requested = false;
        self.revoke();
    }

    /// Raise privileges to admin.
    pub fn elevate(&mut self) {
        if self.privilege != Privilege::Admin {
            log::info!("admin privileges granted");
        }
        self.privilege = Privilege::Admin;
    }

    /// Drop privileges.
    pub fn revoke(&mut self) {
        if self.privilege != Privilege::None {
            log::info!("admin privileges revoked");
        }
        self.privilege = Privilege::None;
    }

    /// Ask the shell to enter menu mode once the current handler returns.
    pub fn request_menu(&mut self) {
        self.menu_requested = true;
    }

    /// Take a pending menu request.
    pub fn take_menu_request(&mut self) -> bool {
        core::mem::take(&mut self.menu_requested)
    }
}

/// Context handed to a command handler.
pub struct Invocation<'i> {
    argv: &'i [&'i str],
    arg: usize,
    session: &'i mut Session,
    verifier: Option<&'i dyn SecretVerifier>,
}

impl<'i> Invocation<'i> {
    /// Create an invocation context.
    pub fn new(
        argv: &'i [&'i str],
        arg: usize,
        session: &'i mut Session,
        verifier: Option<&'i dyn SecretVerifier>,
    ) -> Self {
        Self {
            argv,
            arg,
            session,
            verifier,
        }
    }

    /// Argument vector; `argv()[0]` is the canonical command name.
    pub fn argv(&self) -> &[&'i str] {
        self.argv
    }

    /// Number of entries in [`argv`](Self::argv).
    pub fn argc(&self) -> usize {
        self.argv.len()
    }

    /// Argument `index` (0 is the command name).
    pub fn get(&self, index: usize) -> Option<&'i str> {
        self.argv.get(index).copied()
    }

    /// Opaque value registered with the command.
    pub fn arg(&self) -> usize {
        self.arg
    }

    /// Current privilege level.
    pub fn privilege(&self) -> Privilege {
        self.session.privilege()
    }

    /// Check `secret` and raise privileges on success.
    ///
    /// Always fails when the shell has no verifier attached.
    pub fn elevate(&mut self, secret: &str) -> bool {
        let accepted = self.verifier.is_some_and(|v| v.verify(secret));
        if accepted {
            self.session.elevate();
        } else {
            log::warn!("rejected admin secret");
        }
        accepted
    }

    /// Drop privileges.
    pub fn revoke(&mut self) {
        self.session.revoke();
    }

    /// Stop the shell and drop privileges.
    pub fn quit(&mut self) {
        self.session.quit();
    }

    /// Enter menu mode after this handler returns.
    pub fn request_menu(&mut self) {
        self.session.request_menu();
    }
}

impl core::fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Invocation")
            .field("argv", &self.argv)
            .field("arg", &self.arg)
            .field("session", &self.session)
            .field("verifier", &self.verifier.map(|_| "<dyn SecretVerifier>"))
            .finish()
    }
}
