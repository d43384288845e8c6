//! Screen enumeration and the back-stack.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Title,
    Login,
    SignUp,
    Upload,
    Result,
    Ree,
    MaterialInfo,
    History,
}

impl Screen {
    /// Screens that display data produced by an async lookup.
    pub fn is_detail(self) -> bool {
        matches!(self, Screen::Result | Screen::Ree | Screen::MaterialInfo)
    }
}

/// Active screen plus the screens that were active before it, most recent
/// last. Each transition pushes exactly the screen being left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    active: Screen,
    history: Vec<Screen>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Screen::Title)
    }
}

impl NavigationState {
    pub fn new(start: Screen) -> Self {
        Self {
            active: start,
            history: Vec::new(),
        }
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn history(&self) -> &[Screen] {
        &self.history
    }

    pub fn navigate(&mut self, target: Screen) {
        self.history.push(self.active);
        self.active = target;
    }

    /// Return to the previous screen. `false` when there is nowhere to go.
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.active = previous;
                true
            }
            None => false,
        }
    }

    /// Replace the active screen without touching the back-stack.
    pub fn replace(&mut self, screen: Screen) {
        self.active = screen;
    }
}
