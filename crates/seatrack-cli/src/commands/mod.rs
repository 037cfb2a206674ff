//! Command implementations.

pub mod track;

pub use self::track::{execute_track, track_booking, RecordSource, TrackOutcome, TrackRequest};
