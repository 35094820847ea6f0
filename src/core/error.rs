use std::fmt;

pub type TimeResult<T> = Result<T, TimeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    CapabilityUnavailable(String),
    TimerCreation(u32),
    TimerArm(u32),
    WaitFailed(u32),
    EventFailure(u32),
    Interrupted,
    InvalidInput(String),
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapabilityUnavailable(msg) => {
                write!(f, "Required OS capability unavailable: {}", msg)
            }
            Self::TimerCreation(code) => {
                write!(f, "Failed to create waitable timer (os error {})", code)
            }
            Self::TimerArm(code) => {
                write!(f, "Failed to arm waitable timer (os error {})", code)
            }
            Self::WaitFailed(code) => {
                write!(f, "Wait on timer failed (os error {})", code)
            }
            Self::EventFailure(code) => {
                write!(f, "Interrupt event operation failed (os error {})", code)
            }
            Self::Interrupted => write!(f, "Sleep interrupted"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for TimeError {}

impl TimeError {
    /// Win32 error code carried by OS-level failures, if any.
    pub fn os_code(&self) -> Option<u32> {
        match self {
            Self::TimerCreation(code)
            | Self::TimerArm(code)
            | Self::WaitFailed(code)
            | Self::EventFailure(code) => Some(*code),
            _ => None,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}
