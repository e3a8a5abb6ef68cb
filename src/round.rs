//! Round controller
//!
//! Owns one round's state and its collaborators: turns simulation events into
//! audio cues and hands the final result to the score store exactly once.

use crate::audio::{AudioSink, SoundCue};
use crate::highscores::{HighScoreError, ScoreStore};
use crate::renderer::Frame;
use crate::sim::{GameEvent, GamePhase, GameState, PowerUpKind, TickInput, resume, tick};
use crate::truncate_name;

/// Where the round stands after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Running,
    /// Waiting on `resolve_pause`
    Paused,
    /// GameOver reached and the score submitted
    Over,
    /// Player quit from the pause menu
    Abandoned,
}

/// Pause menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseChoice {
    Resume,
    QuitToMenu,
}

/// Audio cue for a simulation event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::BrickHit { .. } => Some(SoundCue::BrickHit),
        GameEvent::LifeLost { .. } => Some(SoundCue::LifeLost),
        GameEvent::PowerUpCaught(PowerUpKind::ExtraLife) => Some(SoundCue::LifeGained),
        GameEvent::PowerUpCaught(_) => Some(SoundCue::PowerUpCaught),
        GameEvent::LevelStarted { .. } => Some(SoundCue::LevelStart),
        _ => None,
    }
}

pub struct RoundController<A: AudioSink, S: ScoreStore> {
    state: GameState,
    audio: A,
    scores: S,
    player_name: String,
    submitted: bool,
    abandoned: bool,
    rank: Option<usize>,
}

impl<A: AudioSink, S: ScoreStore> RoundController<A, S> {
    pub fn new(state: GameState, audio: A, scores: S, player_name: &str) -> Self {
        let mut round = Self {
            state,
            audio,
            scores,
            player_name: truncate_name(player_name),
            submitted: false,
            abandoned: false,
            rank: None,
        };
        // Start-of-level cue for level 1
        for event in round.state.drain_events() {
            round.play_cue(&event);
        }
        round
    }

    /// Run one tick. Only a failed high-score write is an error.
    pub fn step(
        &mut self,
        input: &TickInput,
        dt_us: u64,
    ) -> Result<RoundStatus, HighScoreError> {
        if self.abandoned {
            return Ok(RoundStatus::Abandoned);
        }

        tick(&mut self.state, input, dt_us);

        for event in self.state.drain_events() {
            self.play_cue(&event);
            if let GameEvent::GameOver { score, level } = event {
                self.submit(score, level)?;
            }
        }

        Ok(self.status())
    }

    /// Act on the pause menu
    pub fn resolve_pause(&mut self, choice: PauseChoice) -> RoundStatus {
        if self.state.phase != GamePhase::Paused {
            return self.status();
        }
        match choice {
            PauseChoice::Resume => {
                resume(&mut self.state);
                self.state.drain_events();
            }
            PauseChoice::QuitToMenu => {
                log::info!(
                    "Round abandoned at level {} with score {}",
                    self.state.level,
                    self.state.score
                );
                self.abandoned = true;
            }
        }
        self.status()
    }

    pub fn status(&self) -> RoundStatus {
        if self.abandoned {
            return RoundStatus::Abandoned;
        }
        match self.state.phase {
            GamePhase::GameOver => RoundStatus::Over,
            GamePhase::Paused => RoundStatus::Paused,
            _ => RoundStatus::Running,
        }
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    /// Rank achieved in the score table, once the round is over
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    fn play_cue(&mut self, event: &GameEvent) {
        if let Some(cue) = cue_for(event) {
            self.audio.play(cue);
        }
    }

    fn submit(&mut self, score: u64, level: u32) -> Result<(), HighScoreError> {
        if self.submitted {
            return Ok(());
        }
        self.submitted = true;
        self.rank = self.scores.submit(&self.player_name, score, level)?;
        match self.rank {
            Some(rank) => log::info!("{} placed #{} with {}", self.player_name, rank, score),
            None => log::info!("{} scored {}, not a high score", self.player_name, score),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::consts::TICK_US;
    use crate::highscores::HighScores;

    #[test]
    fn test_cue_mapping() {
        assert_eq!(
            cue_for(&GameEvent::PowerUpCaught(PowerUpKind::ExtraLife)),
            Some(SoundCue::LifeGained)
        );
        assert_eq!(
            cue_for(&GameEvent::PowerUpCaught(PowerUpKind::StickyPaddle)),
            Some(SoundCue::PowerUpCaught)
        );
        assert_eq!(cue_for(&GameEvent::LevelStarted { level: 4 }), Some(SoundCue::LevelStart));
        assert_eq!(cue_for(&GameEvent::BallLaunched), None);
        assert_eq!(cue_for(&GameEvent::PowerUpSpawned(PowerUpKind::ExtraLife)), None);
    }

    #[test]
    fn test_pause_resume_and_quit() {
        let mut round = RoundController::new(GameState::new(1), Silent, HighScores::new(), "Tess");
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        assert_eq!(round.step(&pause, TICK_US).unwrap(), RoundStatus::Paused);
        assert_eq!(round.resolve_pause(PauseChoice::Resume), RoundStatus::Running);
        assert_eq!(round.state().phase, GamePhase::Ready);

        round.step(&pause, TICK_US).unwrap();
        assert_eq!(round.resolve_pause(PauseChoice::QuitToMenu), RoundStatus::Abandoned);
        assert_eq!(round.step(&TickInput::default(), TICK_US).unwrap(), RoundStatus::Abandoned);
        assert!(round.scores().is_empty());
    }

    #[test]
    fn test_resolve_pause_ignored_while_playing() {
        let mut round = RoundController::new(GameState::new(1), Silent, HighScores::new(), "Tess");
        assert_eq!(round.resolve_pause(PauseChoice::QuitToMenu), RoundStatus::Running);
    }
}
