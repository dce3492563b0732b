use std::fmt;

/// Screens of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
}

impl Route {
    pub fn name(self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::Register => "register",
            Route::Home => "home",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Back stack between the auth screens. Never empty.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn start(logged_in: bool) -> Self {
        let first = if logged_in { Route::Home } else { Route::Login };
        Self { stack: vec![first] }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Login)
    }

    pub fn stack(&self) -> &[Route] {
        &self.stack
    }

    /// Push register over login. No-op from any other screen.
    pub fn to_register(&mut self) {
        if self.current() == Route::Login {
            self.stack.push(Route::Register);
        }
    }

    /// The register screen's "back to login" action. Pops one screen; the
    /// last one stays. Returns whether anything was popped.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Go home, dropping login and everything above it.
    pub fn on_authenticated(&mut self) {
        if let Some(pos) = self.stack.iter().position(|r| *r == Route::Login) {
            self.stack.truncate(pos);
        }
        if self.stack.last() != Some(&Route::Home) {
            self.stack.push(Route::Home);
        }
    }

    /// Drop the whole stack and start over at login.
    pub fn on_logged_out(&mut self) {
        self.stack.clear();
        self.stack.push(Route::Login);
    }
}
