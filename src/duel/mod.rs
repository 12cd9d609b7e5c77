pub mod display;
pub mod session;

pub use display::{DuelDisplayRecord, ParticipantSnapshot};
pub use session::{DuelSession, SessionPhase, SessionSnapshot};
