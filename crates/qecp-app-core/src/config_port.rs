// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port shared by the visualizer surfaces (CLI, embedders).

use tracing::warn;

use crate::config::{ConfigService, ConfigStore, PREFS_KEY};
use crate::prefs::ViewerPrefs;

/// Config-facing port for loading/saving viewer preferences.
pub trait ConfigPort {
    /// Load viewer preferences (returns None if missing or unreadable).
    fn load_prefs(&self) -> Option<ViewerPrefs>;
    /// Persist viewer preferences (best-effort; failures are logged).
    fn save_prefs(&self, prefs: &ViewerPrefs);
}

impl<S: ConfigStore> ConfigPort for ConfigService<S> {
    fn load_prefs(&self) -> Option<ViewerPrefs> {
        match self.load::<ViewerPrefs>(PREFS_KEY) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(%err, "ignoring unreadable viewer prefs");
                None
            }
        }
    }

    fn save_prefs(&self, prefs: &ViewerPrefs) {
        if let Err(err) = self.save(PREFS_KEY, prefs) {
            warn!(%err, "failed to save viewer prefs");
        }
    }
}
