//! The engine-wide mode value.

use std::fmt;

/// Which camera-control mode is currently driving the view.
///
/// Owned by a single session object; there is no process-wide mode. The only
/// legal transitions are `Off` -> `TrackView`, `Off` -> `Follow`, and back to
/// `Off`. Switching directly between the two active modes is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No controller is driving the camera.
    #[default]
    Off,
    /// The camera rigidly tracks an instrument pose.
    TrackView,
    /// The camera re-centers when the watched object drifts out of the safe zone.
    Follow,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Off => "off",
            Mode::TrackView => "track view",
            Mode::Follow => "follow",
        };
        f.write_str(name)
    }
}
