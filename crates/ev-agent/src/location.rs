//! Where an agent is: at one of its two places, or part-way between them.

use std::fmt;

/// The two anchor places of a commute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Place {
    Home,
    Work,
}

impl Place {
    pub fn as_str(self) -> &'static str {
        match self {
            Place::Home => "home",
            Place::Work => "work",
        }
    }

    /// The opposite end of the commute.
    pub fn other(self) -> Place {
        match self {
            Place::Home => Place::Work,
            Place::Work => Place::Home,
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current position of an agent.
///
/// Displays as `home`, `work`, or `from|to=NNN` while en route, where `NNN`
/// is the zero-padded percentage of the trip still to go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Location {
    #[default]
    Home,
    Work,
    EnRoute {
        from:          Place,
        to:            Place,
        pct_remaining: u8,
    },
}

impl Location {
    pub fn at(place: Place) -> Self {
        match place {
            Place::Home => Location::Home,
            Place::Work => Location::Work,
        }
    }

    /// The place the agent is at, or `None` while en route.
    pub fn place(self) -> Option<Place> {
        match self {
            Location::Home => Some(Place::Home),
            Location::Work => Some(Place::Work),
            Location::EnRoute { .. } => None,
        }
    }

    pub fn is_at(self, place: Place) -> bool {
        self.place() == Some(place)
    }

    /// Charging is possible at home and at work.
    pub fn can_recharge(self) -> bool {
        self.place().is_some()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Home => f.write_str("home"),
            Location::Work => f.write_str("work"),
            Location::EnRoute { from, to, pct_remaining } => {
                write!(f, "{from}|{to}={pct_remaining:03}")
            }
        }
    }
}
