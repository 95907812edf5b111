use super::Log;
use std::fmt::{Display, Formatter};

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Failures(label) | Log::Matches(label) | Log::Verbose(label) => {
                write!(f, "{}", label)
            }
        }
    }
}

impl<T> Log<T> {
    /// The verbosity order of the level.
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Failures(_) => 1,
            Log::Matches(_) => 2,
            Log::Verbose(_) => 3,
        }
    }

    pub fn covers(&self, level: &Log<()>) -> bool {
        self.order() >= level.order()
    }
}
