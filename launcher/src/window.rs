/// Visibility of the main window as the restore logic sees it. The real
/// toolkit has more states; these two are the ones the contract cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Minimized,
}

/// The main window, owned by the thread that runs the UI loop. All methods
/// take `&mut self`; nothing here is safe to share across threads, same as
/// the real toolkit surface this stands in for.
#[derive(Debug)]
pub struct MainWindow {
    state: WindowState,
    focused: bool,
    activations: u64,
}

impl MainWindow {
    pub fn new() -> Self {
        Self {
            state: WindowState::Normal,
            focused: true,
            activations: 0,
        }
    }

    /// Bring the window back to the user: leave the minimized state if
    /// needed, then take the foreground. Safe to call any number of times,
    /// in any window state.
    pub fn restore_and_focus(&mut self) {
        if self.state == WindowState::Minimized {
            self.state = WindowState::Normal;
        }
        self.focused = true;
        self.activations += 1;
        log::info!("window surfaced (activation #{})", self.activations);
    }

    pub fn minimize(&mut self) {
        self.state = WindowState::Minimized;
        self.focused = false;
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn activations(&self) -> u64 {
        self.activations
    }
}

impl Default for MainWindow {
    fn default() -> Self {
        Self::new()
    }
}
