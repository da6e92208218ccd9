//! Rounds in sequence, with progress carried between them.
//!
//! The session reads progress once per round start, deals a round and, when
//! a round is won, advances the word index and the level exactly once.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::config::GameConfig;
use crate::error::SessionError;
use crate::progress::Progress;
use crate::round::feedback::Feedback;
use crate::round::plan::LevelPlan;
use crate::round::state::{Phase, Round, RoundEvent, RoundOptions};
use crate::vocab::{PairRequest, Vocabulary, WordId, select_pairs};

/// The round controller.
pub struct Session {
    vocab: Vocabulary,
    progress: Progress,
    feedback: Box<dyn Feedback>,
    config: GameConfig,
    rng: SmallRng,
    round: Option<Round>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("words", &self.vocab.len())
            .field("progress", &self.progress)
            .field("round", &self.round.as_ref().map(Round::level))
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session. No round is dealt until [`Session::start_round`].
    ///
    /// `seed` makes every dealt round reproducible; `None` uses entropy.
    pub fn new(
        vocab: Vocabulary,
        progress: Progress,
        feedback: Box<dyn Feedback>,
        config: GameConfig,
        seed: Option<u64>,
    ) -> Self {
        let rng = seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
        Self {
            vocab,
            progress,
            feedback,
            config,
            rng,
            round: None,
        }
    }

    /// Deal a round for the saved level.
    ///
    /// The dealt word ids are added to the used set immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyVocabulary`] when no words are loaded.
    pub fn start_round(&mut self) -> Result<&Round, SessionError> {
        let level = self.progress.current_level();
        self.deal(level)
    }

    fn deal(&mut self, level: u32) -> Result<&Round, SessionError> {
        if self.vocab.is_empty() {
            return Err(SessionError::EmptyVocabulary);
        }

        let start_index = self.progress.word_index();
        let used: HashSet<WordId> = self.progress.used_word_ids().iter().cloned().collect();
        let floor = self.config.vocab_level.unwrap_or_else(|| self.progress.vocab_level());

        let plan = LevelPlan::for_level(level);
        let mut request = PairRequest {
            count: plan.pair_count,
            start_index,
            review_count: plan.review_count,
            used_ids: &used,
            start_level: Some(floor),
        };
        let mut selection = select_pairs(&self.vocab, &request, &mut self.rng);

        let recycled = HashSet::new();
        if selection.is_empty() {
            tracing::info!(words = self.vocab.len(), "every word has been dealt; recycling vocabulary");
            request.used_ids = &recycled;
            selection = select_pairs(&self.vocab, &request, &mut self.rng);
        }
        if selection.new_word_count < plan.pair_count {
            tracing::debug!(
                wanted = plan.pair_count,
                got = selection.new_word_count,
                "vocabulary short; dealing a smaller round"
            );
        }

        self.progress.add_used_word_ids(&selection.new_ids);

        let options = RoundOptions {
            show_symbols: self.config.show_symbols,
            timings: self.config.timings,
            seed: Some(self.rng.next_u64()),
        };
        let round = Round::new(&plan, selection, options);
        Ok(self.round.insert(round))
    }

    /// Advance the current round and dispatch its events.
    ///
    /// Returns the events so front ends can react too.
    pub fn tick(&mut self, dt: f32) -> Vec<RoundEvent> {
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        round.tick(dt);
        self.dispatch()
    }

    /// Dispatch events raised by direct round actions without ticking.
    pub fn dispatch(&mut self) -> Vec<RoundEvent> {
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        let events = round.drain_events();
        let new_words = round.new_word_count();

        for event in &events {
            if let Some(cue) = event.cue() {
                self.feedback.cue(cue);
            }
            if let Some((text, language)) = event.speech() {
                self.feedback.speak(text, language);
            }
            if *event == RoundEvent::Won {
                self.progress.advance_word_index(new_words);
                self.progress.next_level();
                tracing::info!(
                    level = self.progress.current_level(),
                    word_index = self.progress.word_index(),
                    "progress advanced"
                );
            }
        }
        events
    }

    /// Deal the current round's level again, even after it was won.
    ///
    /// Without a current round this deals the saved level.
    ///
    /// # Errors
    ///
    /// Same as [`Session::start_round`].
    pub fn retry(&mut self) -> Result<&Round, SessionError> {
        let level = self
            .round
            .as_ref()
            .map_or_else(|| self.progress.current_level(), Round::level);
        self.deal(level)
    }

    /// Deal the next level after a win.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] unless the current round
    /// was won, otherwise the errors of [`Session::start_round`].
    pub fn advance(&mut self) -> Result<&Round, SessionError> {
        if self.round.as_ref().map(Round::phase) != Some(Phase::Won) {
            return Err(SessionError::InvalidTransition("advance"));
        }
        self.start_round()
    }

    /// The current round.
    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// The current round, for input handling.
    pub fn round_mut(&mut self) -> Option<&mut Round> {
        self.round.as_mut()
    }

    /// Saved progress.
    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Loaded vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{MemoryStore, ProgressState};
    use crate::round::feedback::{Cue, NullFeedback, RecordingFeedback};
    use crate::vocab::{CefrLevel, WordEntry};

    fn vocab(n: usize) -> Vocabulary {
        Vocabulary::from_entries(
            (0..n)
                .map(|i| WordEntry::new(format!("w{i}"), CefrLevel::A1, format!("en{i}"), format!("tr{i}")))
                .collect(),
        )
    }

    fn session(n: usize, store: MemoryStore, feedback: Box<dyn Feedback>) -> Session {
        Session::new(vocab(n), Progress::open(store), feedback, GameConfig::default(), Some(9))
    }

    fn win_current_round(session: &mut Session) {
        let round = session.round_mut().unwrap();
        round.skip_intro();
        round.settle(1.0 / 60.0, 600);
        let (a, b) = round.request_hint().unwrap();
        round.select(a).unwrap();
        round.select(b).unwrap();
        for _ in 0..600 {
            session.tick(1.0 / 60.0);
            if session.round().unwrap().phase() == Phase::Won {
                break;
            }
        }
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let mut s = session(0, MemoryStore::new(), Box::new(NullFeedback));
        assert_eq!(s.start_round().unwrap_err(), SessionError::EmptyVocabulary);
        assert!(s.round().is_none());
    }

    #[test]
    fn test_win_advances_progress_once() {
        let store = MemoryStore::new();
        let handle = store.clone();
        let recorder = RecordingFeedback::new();
        let mut s = session(10, store, Box::new(recorder.clone()));

        let round = s.start_round().unwrap();
        assert_eq!(round.tiles().len(), 2);
        assert_eq!(handle.snapshot().unwrap().used_word_ids, vec![WordId::new("w0")]);

        win_current_round(&mut s);
        assert_eq!(s.round().unwrap().phase(), Phase::Won);
        // Further ticks must not advance again.
        s.tick(1.0 / 60.0);
        s.tick(1.0 / 60.0);

        let saved = handle.snapshot().unwrap();
        assert_eq!(saved.current_level, 2);
        assert_eq!(saved.unlocked_levels, 2);
        assert_eq!(saved.words_learned_index, 1);

        let rec = recorder.recording();
        assert!(rec.cues.contains(&Cue::Match));
        assert_eq!(rec.cues.iter().filter(|c| **c == Cue::Win).count(), 1);
        assert_eq!(rec.spoken.len(), 2);

        let next = s.advance().unwrap();
        assert_eq!(next.level(), 2);
        assert_eq!(next.tiles().len(), 4);
    }

    #[test]
    fn test_retry_after_win_replays_the_won_level() {
        let store = MemoryStore::new();
        let handle = store.clone();
        let mut s = session(10, store, Box::new(NullFeedback));
        s.start_round().unwrap();
        win_current_round(&mut s);
        assert_eq!(s.round().unwrap().phase(), Phase::Won);

        let again = s.retry().unwrap();
        assert_eq!(again.level(), 1);
        assert_eq!(again.tiles().len(), 2);
        assert_eq!(again.phase(), Phase::Intro);
        // The saved level stays where the win left it.
        assert_eq!(handle.snapshot().unwrap().current_level, 2);
    }

    #[test]
    fn test_retry_after_loss_keeps_the_level() {
        let store = MemoryStore::with_state(ProgressState {
            current_level: 3,
            unlocked_levels: 3,
            ..ProgressState::default()
        });
        let mut s = session(40, store, Box::new(NullFeedback));
        s.start_round().unwrap();
        assert_eq!(s.retry().unwrap().level(), 3);
    }

    #[test]
    fn test_advance_requires_win() {
        let mut s = session(10, MemoryStore::new(), Box::new(NullFeedback));
        s.start_round().unwrap();
        assert_eq!(s.advance().unwrap_err(), SessionError::InvalidTransition("advance"));
    }

    #[test]
    fn test_exhausted_vocabulary_is_recycled() {
        let used = vec![WordId::new("w0"), WordId::new("w1")];
        let store = MemoryStore::with_state(ProgressState {
            used_word_ids: used,
            ..ProgressState::default()
        });
        let mut s = session(2, store, Box::new(NullFeedback));
        let round = s.start_round().unwrap();
        assert_eq!(round.tiles().len(), 2);
    }

    #[test]
    fn test_round_clamped_to_vocabulary() {
        let store = MemoryStore::with_state(ProgressState {
            current_level: 5,
            unlocked_levels: 5,
            ..ProgressState::default()
        });
        let mut s = session(3, store, Box::new(NullFeedback));
        let round = s.start_round().unwrap();
        assert_eq!(round.tiles().len(), 6);
        assert_eq!(round.new_word_count(), 3);
    }
}
