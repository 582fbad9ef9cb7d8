//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Stone physics
//! works in per-tick units: each tick moves the stone by its velocity, then
//! adds gravity to its vertical velocity. `dt` only drives the delayed stage
//! transitions.

use super::collision::first_hit;
use super::schedule::Transition;
use super::state::{Balloon, FailReason, GameEvent, GameState, Stage, Stone};
use crate::Tuning;

/// Outcome of moving a stone one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoneStep {
    /// Still flying
    Flying,
    /// Overlapped the balloon at this index
    Hit(usize),
    /// Left the playfield
    Lost,
}

/// Explicit Euler step followed by hit and bounds checks
pub fn step_stone(stone: &mut Stone, balloons: &[Balloon], tuning: &Tuning) -> StoneStep {
    stone.pos += stone.vel;
    stone.vel.y += tuning.gravity;

    if let Some(index) = first_hit(balloons, stone.pos, stone.radius) {
        StoneStep::Hit(index)
    } else if !tuning.in_playfield(stone.pos) {
        StoneStep::Lost
    } else {
        StoneStep::Flying
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    state.time_ticks += 1;

    for transition in state.schedule.advance(dt) {
        apply_transition(state, transition);
    }

    if state.stage != Stage::Aiming {
        return;
    }

    advance_stone(state);
    check_round_progress(state);
}

fn advance_stone(state: &mut GameState) {
    let Some(stone) = state.stone.as_mut() else {
        return;
    };

    match step_stone(stone, &state.balloons, &state.tuning) {
        StoneStep::Flying => {}
        StoneStep::Hit(index) => {
            state.stone = None;
            let balloon = &mut state.balloons[index];
            balloon.burst = true;
            let letter = balloon.letter;
            state.collected[index] = Some(letter);
            log::debug!("Popped balloon {index} ('{letter}')");
            state.events.push(GameEvent::BalloonPopped { index, letter });
        }
        StoneStep::Lost => {
            state.stone = None;
            log::debug!("Stone left the playfield");
            state.events.push(GameEvent::StoneLost);
        }
    }
}

/// Schedule the end of the aiming stage once its outcome is settled
fn check_round_progress(state: &mut GameState) {
    if state.transition_pending() || state.stone.is_some() {
        return;
    }

    if state.all_burst() {
        let carry = state.shots_left.min(state.tuning.max_carryover);
        state.carried_chances = carry;
        log::info!(
            "All balloons popped with {} shot(s) left, carrying {carry}",
            state.shots_left
        );
        let delay = state.tuning.guess_stage_delay;
        state.schedule.schedule(Transition::EnterGuessing, delay);
    } else if state.shots_left == 0 {
        let left = state.balloons.len() - state.burst_count();
        log::info!("Out of shots with {left} balloon(s) left");
        let delay = state.tuning.out_of_shots_delay;
        state
            .schedule
            .schedule(Transition::EnterFailed(FailReason::OutOfShots), delay);
    }
}

fn apply_transition(state: &mut GameState, transition: Transition) {
    match (transition, state.stage) {
        (Transition::EnterGuessing, Stage::Aiming) => {
            state.guess_chances = state
                .tuning
                .base_guess_chances
                .saturating_add(state.carried_chances);
            state.guess.clear();
            state.last_outcome = None;
            state.set_stage(Stage::Guessing);
        }
        (Transition::EnterFailed(reason), Stage::Aiming | Stage::Guessing) => {
            state.set_stage(Stage::Failed(reason));
        }
        (transition, stage) => {
            log::warn!("Dropping {transition:?} in stage {stage:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    fn run(state: &mut GameState, ticks: u32) {
        for _ in 0..ticks {
            tick(state, SIM_DT);
        }
    }

    /// Fire straight up from rest at full pull
    fn fire_up(state: &mut GameState) -> bool {
        state.fling(POUCH_REST + Vec2::new(0.0, MAX_PULL))
    }

    /// Put the stone right on top of balloon `index`
    fn stone_on(state: &mut GameState, index: usize) {
        state.stone = Some(Stone {
            pos: state.balloons[index].pos + Vec2::new(0.0, 40.0),
            vel: Vec2::new(0.0, -1.0),
            radius: STONE_RADIUS,
        });
    }

    #[test]
    fn test_euler_step() {
        let tuning = Tuning::default();
        let mut stone = Stone {
            pos: Vec2::new(100.0, 300.0),
            vel: Vec2::new(2.0, -10.0),
            radius: STONE_RADIUS,
        };
        assert_eq!(step_stone(&mut stone, &[], &tuning), StoneStep::Flying);
        // Moves by the old velocity, then gravity applies
        assert_eq!(stone.pos, Vec2::new(102.0, 290.0));
        assert_eq!(stone.vel, Vec2::new(2.0, -10.0 + GRAVITY));
    }

    #[test]
    fn test_straight_up_pops_middle_balloon() {
        let mut state = GameState::new(42);
        assert!(fire_up(&mut state));
        run(&mut state, 60);

        assert!(state.stone.is_none());
        assert!(state.balloons[2].burst);
        assert_eq!(state.burst_count(), 1);
        assert_eq!(state.collected[2], Some(state.balloons[2].letter));
        assert!(state
            .drain_events()
            .contains(&GameEvent::BalloonPopped {
                index: 2,
                letter: state.balloons[2].letter
            }));
    }

    #[test]
    fn test_stone_leaving_playfield_is_cleared() {
        let mut state = GameState::new(42);
        // Pull up-left: stone flies down-right out of the box
        assert!(state.fling(POUCH_REST + Vec2::new(-60.0, -50.0)));
        run(&mut state, 200);

        assert!(state.stone.is_none());
        assert_eq!(state.burst_count(), 0);
        assert!(state.drain_events().contains(&GameEvent::StoneLost));
    }

    #[test]
    fn test_one_pop_per_tick() {
        let mut state = GameState::new(8);
        // Overlapping balloons 1 and 2
        state.balloons[1].pos = state.balloons[2].pos + Vec2::new(-10.0, 0.0);
        stone_on(&mut state, 2);
        tick(&mut state, SIM_DT);
        assert_eq!(state.burst_count(), 1);
        assert!(state.balloons[1].burst);
        assert!(!state.balloons[2].burst);
    }

    #[test]
    fn test_all_popped_moves_to_guessing_with_carry() {
        let mut state = GameState::new(3);
        for i in 0..state.balloons.len() {
            state.balloons[i].burst = true;
            state.collected[i] = Some(state.balloons[i].letter);
        }
        state.shots_left = 5;
        tick(&mut state, SIM_DT);

        // Carry is fixed immediately, the stage flips after the delay
        assert_eq!(state.carried_chances, MAX_CARRYOVER);
        assert_eq!(state.stage, Stage::Aiming);
        assert!(!state.can_launch());
        run(&mut state, 60);
        assert_eq!(state.stage, Stage::Guessing);
        assert_eq!(state.guess_chances, BASE_GUESS_CHANCES + MAX_CARRYOVER);
    }

    #[test]
    fn test_carry_limited_by_shots_left() {
        let mut state = GameState::new(3);
        for i in 0..4 {
            state.balloons[i].burst = true;
        }
        state.shots_left = 1;
        stone_on(&mut state, 4);
        tick(&mut state, SIM_DT);
        assert!(state.all_burst());
        assert_eq!(state.carried_chances, 1);
        run(&mut state, 60);
        assert_eq!(state.guess_chances, BASE_GUESS_CHANCES + 1);
    }

    #[test]
    fn test_huge_guess_budget_saturates() {
        let mut state = GameState::new(3);
        state.tuning.base_guess_chances = u32::MAX;
        for i in 0..4 {
            state.balloons[i].burst = true;
        }
        stone_on(&mut state, 4);
        run(&mut state, 60);
        assert_eq!(state.stage, Stage::Guessing);
        assert_eq!(state.carried_chances, MAX_CARRYOVER);
        assert_eq!(state.guess_chances, u32::MAX);
    }

    #[test]
    fn test_last_shot_can_still_win() {
        let mut state = GameState::new(3);
        for i in 0..4 {
            state.balloons[i].burst = true;
        }
        state.shots_left = 0;
        stone_on(&mut state, 4);
        // In flight with zero shots: no failure yet
        run(&mut state, 1);
        assert!(state.all_burst());
        assert_eq!(state.carried_chances, 0);
        run(&mut state, 60);
        assert_eq!(state.stage, Stage::Guessing);
        assert_eq!(state.guess_chances, BASE_GUESS_CHANCES);
    }

    #[test]
    fn test_out_of_shots_fails() {
        let mut state = GameState::new(11);
        state.shots_left = 1;
        assert!(state.fling(POUCH_REST + Vec2::new(-60.0, -50.0)));
        assert_eq!(state.shots_left, 0);
        run(&mut state, 300);
        assert_eq!(state.stage, Stage::Failed(FailReason::OutOfShots));
        assert!(state.is_finished());
    }

    #[test]
    fn test_restart_cancels_pending_failure() {
        let mut state = GameState::new(11);
        state.stage = Stage::Guessing;
        state.guess_chances = 1;
        state.submit_guess("XXXXX");
        assert!(state.transition_pending());

        assert!(state.restart());
        run(&mut state, 200);
        assert_eq!(state.stage, Stage::Aiming);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let pulls = [Vec2::new(0.0, 80.0), Vec2::new(30.0, 60.0), Vec2::new(-45.0, 55.0)];
        for pull in pulls {
            state1.fling(POUCH_REST + pull);
            state2.fling(POUCH_REST + pull);
            run(&mut state1, 90);
            run(&mut state2, 90);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.balloons, state2.balloons);
        assert_eq!(state1.shots_left, state2.shots_left);
        assert_eq!(state1.stage, state2.stage);
    }
}
