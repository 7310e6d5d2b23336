//! Routes a group to the screen its affinity names.
//!
//! [`ScreenRouter`] holds only the immutable [`AffinityPartition`].  All
//! focus and placement state belongs to the [`WindowManager`], which is
//! passed in on every call.  The router does no validation of its own:
//! callers hand it known group names, and runtime errors come back
//! unchanged.

use crate::group::AffinityPartition;
use crate::traits::WindowManager;
use log::{debug, info};

/// Group → screen dispatcher.
///
/// # Typical usage
///
/// ```ignore
/// let router = ScreenRouter::new(config.partition()?);
/// router.route_to_group(&wm, "3")?;
/// ```
#[derive(Debug, Clone)]
pub struct ScreenRouter {
    partition: AffinityPartition,
}

impl ScreenRouter {
    pub fn new(partition: AffinityPartition) -> Self {
        Self { partition }
    }

    pub fn partition(&self) -> &AffinityPartition {
        &self.partition
    }

    /// Screen index that `name` surfaces on.
    pub fn screen_for(&self, name: &str) -> usize {
        self.partition.screen_for(name)
    }

    /// Focus the screen `name` belongs to, then show `name` there.
    ///
    /// Exactly one `focus_screen` followed by exactly one `activate_group`.
    pub fn route_to_group<W: WindowManager>(&self, wm: &W, name: &str) -> Result<(), W::Error> {
        let screen = self.screen_for(name);
        info!("group {} -> screen {}", name, screen);
        wm.focus_screen(screen)?;
        wm.activate_group(name)
    }

    /// Send the focused window to `name`, then route like
    /// [`route_to_group`](Self::route_to_group).
    ///
    /// The window is looked up and reassigned before the screen focus
    /// changes, so it is the window that had focus when the request came in.
    /// Without a focused window only the routing happens.
    pub fn route_to_group_with_window<W: WindowManager>(
        &self,
        wm: &W,
        name: &str,
    ) -> Result<(), W::Error> {
        match wm.current_window()? {
            Some(window) => {
                info!("moving window {} to group {}", window.address, name);
                wm.reassign_window_group(&window, name, false)?;
            }
            None => debug!("no focused window, nothing to move"),
        }
        self.route_to_group(wm, name)
    }
}
