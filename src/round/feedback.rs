//! Audio and speech notifications.
//!
//! The board never waits on feedback and never reads anything back from it.
//! Sinks swallow their own failures.

use std::sync::{Arc, Mutex, PoisonError};

use crate::vocab::Language;

/// Sound cue for a round event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// A round started or its intro finished.
    Start,
    /// A tile was picked up.
    Click,
    /// A move was rejected.
    Error,
    /// Two tiles matched.
    Match,
    /// A hint was requested.
    Hint,
    /// A move was undone.
    Undo,
    /// The board was shuffled.
    Shuffle,
    /// The round was won.
    Win,
    /// The round was lost.
    Loss,
}

impl Cue {
    /// Short name, as used for sound assets.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Cue::Start => "start",
            Cue::Click => "click",
            Cue::Error => "error",
            Cue::Match => "match",
            Cue::Hint => "hint",
            Cue::Undo => "undo",
            Cue::Shuffle => "shuffle",
            Cue::Win => "win",
            Cue::Loss => "game_over",
        }
    }
}

/// Fire-and-forget audio collaborator.
pub trait Feedback {
    /// Play a sound cue.
    fn cue(&mut self, cue: Cue);

    /// Speak a word aloud.
    fn speak(&mut self, text: &str, language: Language);
}

/// Logs feedback through `tracing` instead of playing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl Feedback for TracingFeedback {
    fn cue(&mut self, cue: Cue) {
        tracing::debug!(cue = cue.name(), "cue");
    }

    fn speak(&mut self, text: &str, language: Language) {
        tracing::debug!(text, language = language.code(), "speak");
    }
}

/// Discards all feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl Feedback for NullFeedback {
    fn cue(&mut self, _cue: Cue) {}

    fn speak(&mut self, _text: &str, _language: Language) {}
}

/// Everything a [`RecordingFeedback`] received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recording {
    /// Cues, in order.
    pub cues: Vec<Cue>,
    /// Spoken words, in order.
    pub spoken: Vec<(String, Language)>,
}

/// Records feedback; clones share one recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingFeedback {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn recording(&self) -> Recording {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Feedback for RecordingFeedback {
    fn cue(&mut self, cue: Cue) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).cues.push(cue);
    }

    fn speak(&mut self, text: &str, language: Language) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .spoken
            .push((text.to_string(), language));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_is_shared() {
        let recorder = RecordingFeedback::new();
        let mut sink: Box<dyn Feedback> = Box::new(recorder.clone());
        sink.cue(Cue::Match);
        sink.speak("elma", Language::Turkish);
        let rec = recorder.recording();
        assert_eq!(rec.cues, vec![Cue::Match]);
        assert_eq!(rec.spoken, vec![("elma".to_string(), Language::Turkish)]);
    }
}
