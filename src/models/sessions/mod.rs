pub mod draft;
pub mod entities;
pub mod remaining;
pub mod requests;
pub mod responses;
pub mod round;

pub use draft::{EligibilityScope, SessionDraft};
pub use remaining::TimeRemaining;
pub use round::QuizRound;
