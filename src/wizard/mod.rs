//! Onboarding wizard — the multi-step profile collection flow.
//!
//! The wizard walks a new user through six linear steps, accumulating a
//! `ProfileDraft` that stays client-side until the review step confirms it.
//! Submission then writes everything to the remote backend in one pass.

pub mod draft;
pub mod session;
pub mod step;
pub mod submit;

pub use draft::{Gender, GenderPreference, Photo, ProfileDraft, Vibe};
pub use session::{Advance, Retreat, WizardSession};
pub use step::WizardStep;
pub use submit::{SubmissionReport, submit};
