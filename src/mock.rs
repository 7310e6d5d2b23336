//! Recording [`WindowManager`] double shared by the unit tests.

use crate::command::{ScreenInfo, WindowInfo};
use crate::traits::WindowManager;
use std::cell::RefCell;
use std::collections::HashMap;

/// One call made against the mock, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FocusScreen(usize),
    ActivateGroup(String),
    CurrentWindow,
    Reassign {
        address: String,
        group: String,
        switch: bool,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("recorder error: {0}")]
pub struct RecorderErr(pub String);

/// Models a runtime with `screen_count` screens, one focused screen and an
/// optional focused window.
#[derive(Debug)]
pub struct RecorderWm {
    pub calls: RefCell<Vec<Call>>,
    pub screen_count: usize,
    pub focused_screen: RefCell<usize>,
    pub focused_window: RefCell<Option<WindowInfo>>,
    /// `screen index -> visible group`
    pub visible: RefCell<HashMap<usize, String>>,
    /// `window address -> group`
    pub membership: RefCell<HashMap<String, String>>,
    pub fail_activate: bool,
}

impl Default for RecorderWm {
    fn default() -> Self {
        Self::with_screens(2)
    }
}

impl RecorderWm {
    pub fn with_screens(screen_count: usize) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            screen_count,
            focused_screen: RefCell::new(0),
            focused_window: RefCell::new(None),
            visible: RefCell::new(HashMap::new()),
            membership: RefCell::new(HashMap::new()),
            fail_activate: false,
        }
    }

    /// Same as the default mock, with `window` focused.
    pub fn with_window(address: &str) -> Self {
        let wm = Self::default();
        *wm.focused_window.borrow_mut() = Some(window(address, "kitty", "shell"));
        wm
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn focused_screen(&self) -> usize {
        *self.focused_screen.borrow()
    }

    pub fn visible_on(&self, screen: usize) -> Option<String> {
        self.visible.borrow().get(&screen).cloned()
    }

    pub fn group_of(&self, address: &str) -> Option<String> {
        self.membership.borrow().get(address).cloned()
    }
}

pub fn window(address: &str, class: &str, title: &str) -> WindowInfo {
    WindowInfo {
        address: address.into(),
        class: class.into(),
        title: title.into(),
    }
}

impl WindowManager for RecorderWm {
    type Error = RecorderErr;

    fn screens(&self) -> Result<Vec<ScreenInfo>, RecorderErr> {
        let focused = self.focused_screen();
        Ok((0..self.screen_count)
            .map(|index| ScreenInfo {
                index,
                name: format!("MOCK-{}", index),
                focused: index == focused,
            })
            .collect())
    }

    fn focus_screen(&self, index: usize) -> Result<(), RecorderErr> {
        self.calls.borrow_mut().push(Call::FocusScreen(index));
        if index >= self.screen_count {
            return Err(RecorderErr(format!("no screen {}", index)));
        }
        *self.focused_screen.borrow_mut() = index;
        Ok(())
    }

    fn activate_group(&self, name: &str) -> Result<(), RecorderErr> {
        self.calls
            .borrow_mut()
            .push(Call::ActivateGroup(name.into()));
        if self.fail_activate {
            return Err(RecorderErr("activate failed".into()));
        }
        let screen = self.focused_screen();
        self.visible.borrow_mut().insert(screen, name.into());
        Ok(())
    }

    fn current_window(&self) -> Result<Option<WindowInfo>, RecorderErr> {
        self.calls.borrow_mut().push(Call::CurrentWindow);
        Ok(self.focused_window.borrow().clone())
    }

    fn reassign_window_group(
        &self,
        window: &WindowInfo,
        name: &str,
        switch_active_group: bool,
    ) -> Result<(), RecorderErr> {
        self.calls.borrow_mut().push(Call::Reassign {
            address: window.address.clone(),
            group: name.into(),
            switch: switch_active_group,
        });
        self.membership
            .borrow_mut()
            .insert(window.address.clone(), name.into());
        Ok(())
    }
}
