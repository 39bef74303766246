use std::path::PathBuf;

use launchpad_core::Theme;
use launchpad_engine::StateFile;
use launchpad_logging::{launch_error, launch_info, launch_warn};
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".launchpad_state.ron";

/// Read/write port for the single persisted theme flag.
pub trait ThemeStore {
    fn load(&self) -> Theme;
    fn save(&self, theme: Theme);
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    dark_mode: bool,
}

/// Keeps the theme flag in `{dir}/.launchpad_state.ron`.
pub struct RonThemeStore {
    file: StateFile,
}

impl RonThemeStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            file: StateFile::new(&dir, STATE_FILENAME),
        }
    }

    fn read_state(&self) -> Option<PersistedState> {
        let content = match self.file.read() {
            Ok(content) => content?,
            Err(err) => {
                launch_warn!("theme flag unreadable, using light: {}", err);
                return None;
            }
        };
        match ron::from_str(&content) {
            Ok(state) => Some(state),
            Err(err) => {
                launch_warn!("theme flag in {:?} is malformed, using light: {}", self.file.path(), err);
                None
            }
        }
    }
}

impl ThemeStore for RonThemeStore {
    fn load(&self) -> Theme {
        let state = self.read_state().unwrap_or_default();
        Theme::from_dark_flag(state.dark_mode)
    }

    fn save(&self, theme: Theme) {
        let state = PersistedState {
            dark_mode: theme.is_dark(),
        };
        let content = match ron::ser::to_string_pretty(&state, ron::ser::PrettyConfig::new()) {
            Ok(text) => text,
            Err(err) => {
                launch_error!("cannot encode theme flag: {}", err);
                return;
            }
        };

        match self.file.replace(&content) {
            Ok(()) => launch_info!("saved theme {:?} to {:?}", theme, self.file.path()),
            Err(err) => launch_error!("theme not saved: {}", err),
        }
    }
}
