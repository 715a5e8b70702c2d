//! Startup hook
//!
//! Runs the user's autostart script once per process lifetime. The spawn is
//! fire-and-forget: exit status and output are ignored, and a missing or
//! failing script only produces a warning. Config reloads never re-fire the
//! hook because the fired flag lives on the hook, not in the descriptor.

use std::path::PathBuf;
use std::process::Command;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::config::descriptor::Config;

pub struct StartupHook {
    script: PathBuf,
    fired: AtomicBool,
}

impl StartupHook {
    pub fn new(script: PathBuf) -> Self {
        Self {
            script,
            fired: AtomicBool::new(false),
        }
    }

    /// Spawn the autostart script if this hook has not fired yet
    ///
    /// Returns true when this call did the firing. A failed spawn still
    /// counts as fired; there is no retry.
    pub fn fire(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }

        match Command::new(&self.script).spawn() {
            Ok(child) => {
                info!(script = %self.script.display(), pid = child.id(), "Startup hook fired");
            }
            Err(e) => {
                warn!(script = %self.script.display(), error = %e, "Startup script failed to spawn");
            }
        }

        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

/// The process-global startup hook, pointing at the autostart script next to
/// the config file
pub fn startup_hook() -> &'static StartupHook {
    static HOOK: OnceLock<StartupHook> = OnceLock::new();
    HOOK.get_or_init(|| StartupHook::new(Config::autostart_path()))
}
