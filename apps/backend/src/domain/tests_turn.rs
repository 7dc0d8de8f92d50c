use crate::domain::board::Sector;
use crate::domain::events::{CompletionReason, EventKind};
use crate::domain::gate::QuantumGate;
use crate::domain::session::{GameSession, GameStatus, ParticleKind, ParticleLocation};
use crate::domain::test_state_helpers::{ctx, place_at, started_session, NOW};
use crate::domain::turn::{apply_move, PlayerAction, TurnContext};
use crate::domain::win::WinPolicy;
use crate::errors::DomainError;

fn act(s: &mut GameSession, who: &str, action: &str, target: Option<&str>) -> Result<(), DomainError> {
    apply_move(s, who, action, target, &ctx(WinPolicy::ActingPlayer)).map(|_| ())
}

#[test]
fn end_turn_wraps_from_last_seat() {
    let mut s = started_session(3, 4, 11, 40);
    act(&mut s, "alice", "end_turn", None).unwrap();
    act(&mut s, "bob", "end_turn", None).unwrap();
    assert_eq!(s.current_turn_index, 2);

    act(&mut s, "carol", "end_turn", None).unwrap();
    assert_eq!(s.current_turn_index, 0);
    assert_eq!(s.turn_counter, 3);
    assert_eq!(
        s.events.last().map(|e| &e.kind),
        Some(&EventKind::TurnEnded {
            player_id: "carol".into(),
            next_player_id: "alice".into()
        })
    );
}

#[test]
fn move_does_not_end_the_turn() {
    let mut s = started_session(2, 2, 3, 40);
    place_at(&mut s, &[Sector::SectorH, Sector::SectorH]);
    act(&mut s, "alice", "move", Some("sector_b")).unwrap();
    act(&mut s, "alice", "move", Some("sector_c")).unwrap();
    assert_eq!(s.current_turn_index, 0);
    assert_eq!(s.turn_counter, 0);
    assert_eq!(s.players[0].sector, Sector::SectorC);
}

#[test]
fn non_adjacent_move_is_rejected_without_changes() {
    let mut s = started_session(2, 6, 5, 40);
    let before = s.clone();
    let err = act(&mut s, "alice", "move", Some("sector_a")).unwrap_err();
    assert!(matches!(err, DomainError::InvalidTarget(_)));
    assert_eq!(s, before);
}

#[test]
fn moving_onto_particles_collects_all_in_id_order() {
    let mut s = started_session(2, 4, 9, 40);
    place_at(
        &mut s,
        &[Sector::SectorE, Sector::SectorA, Sector::SectorE, Sector::SectorE],
    );
    let events_before = s.events.len();

    let outcome = apply_move(
        &mut s,
        "alice",
        "move",
        Some("sector_e"),
        &ctx(WinPolicy::ActingPlayer),
    )
    .unwrap();

    assert_eq!(outcome.action, PlayerAction::Move(Sector::SectorE));
    assert_eq!(outcome.collected, vec![1, 3, 4]);
    assert_eq!(s.collected_by("alice").count(), 3);
    assert_eq!(s.unheld_particles().count(), 1);

    let new: Vec<&EventKind> = s.events.since(events_before as u64).iter().map(|e| &e.kind).collect();
    assert_eq!(
        new,
        vec![
            &EventKind::ParticleCollected {
                player_id: "alice".into(),
                particle_id: 1,
                particle_kind: ParticleKind::Photon
            },
            &EventKind::ParticleCollected {
                player_id: "alice".into(),
                particle_id: 3,
                particle_kind: ParticleKind::Ion
            },
            &EventKind::ParticleCollected {
                player_id: "alice".into(),
                particle_id: 4,
                particle_kind: ParticleKind::Qubit
            },
        ]
    );
}

#[test]
fn wrong_player_is_told_it_is_not_their_turn() {
    let mut s = started_session(2, 2, 1, 40);
    assert!(matches!(
        act(&mut s, "bob", "end_turn", None),
        Err(DomainError::NotYourTurn(_))
    ));
    // Outsiders get the same answer.
    assert!(matches!(
        act(&mut s, "mallory", "end_turn", None),
        Err(DomainError::NotYourTurn(_))
    ));
}

#[test]
fn turn_is_checked_before_action_name() {
    let mut s = started_session(2, 2, 1, 40);
    assert!(matches!(
        act(&mut s, "bob", "dance", None),
        Err(DomainError::NotYourTurn(_))
    ));
    assert!(matches!(
        act(&mut s, "alice", "dance", None),
        Err(DomainError::InvalidAction(_))
    ));
}

#[test]
fn actions_require_in_progress() {
    let mut s = started_session(2, 2, 1, 40);
    s.status = GameStatus::Completed;
    assert!(matches!(
        act(&mut s, "alice", "end_turn", None),
        Err(DomainError::InvalidState(_))
    ));
}

#[test]
fn budget_exhaustion_completes_without_winner() {
    let mut s = started_session(2, 3, 2, 3);
    place_at(&mut s, &[Sector::SectorA, Sector::SectorC, Sector::SectorH]);
    act(&mut s, "alice", "end_turn", None).unwrap();
    act(&mut s, "bob", "end_turn", None).unwrap();
    assert_eq!(s.status, GameStatus::InProgress);

    act(&mut s, "alice", "end_turn", None).unwrap();
    assert_eq!(s.turn_counter, 3);
    assert_eq!(s.status, GameStatus::Completed);
    assert_eq!(s.winner, None);
    assert_eq!(
        s.events.last().map(|e| &e.kind),
        Some(&EventKind::GameCompleted {
            winner: None,
            reason: CompletionReason::TurnBudgetExhausted
        })
    );

    // Completed sessions are frozen.
    let frozen = s.clone();
    assert!(matches!(
        act(&mut s, "bob", "end_turn", None),
        Err(DomainError::InvalidState(_))
    ));
    assert_eq!(s, frozen);
}

#[test]
fn collecting_the_last_particle_and_returning_home_wins() {
    let mut s = started_session(2, 1, 4, 40);
    place_at(&mut s, &[Sector::SectorB]);

    act(&mut s, "alice", "move", Some("sector_b")).unwrap();
    assert_eq!(s.status, GameStatus::InProgress);

    let outcome = apply_move(
        &mut s,
        "alice",
        "move",
        Some("start"),
        &ctx(WinPolicy::ActingPlayer),
    )
    .unwrap();
    assert_eq!(outcome.completed, Some(CompletionReason::ParticlesSecured));
    assert_eq!(s.status, GameStatus::Completed);
    assert_eq!(s.winner.as_deref(), Some("alice"));
}

#[test]
fn any_player_policy_wins_when_teammate_waits_at_start() {
    let mut s = started_session(2, 1, 4, 40);
    place_at(&mut s, &[Sector::SectorB]);

    let outcome = apply_move(
        &mut s,
        "alice",
        "move",
        Some("sector_b"),
        &ctx(WinPolicy::AnyPlayer),
    )
    .unwrap();
    assert_eq!(outcome.completed, Some(CompletionReason::ParticlesSecured));
    assert_eq!(s.winner.as_deref(), Some("alice"));
}

#[test]
fn default_gate_only_logs_the_event() {
    let mut s = started_session(2, 3, 8, 40);
    let before = s.clone();
    act(&mut s, "alice", "use_quantum_gate", None).unwrap();

    assert_eq!(s.players, before.players);
    assert_eq!(s.particles, before.particles);
    assert_eq!(s.current_turn_index, 0);
    assert_eq!(
        s.events.last().map(|e| &e.kind),
        Some(&EventKind::QuantumGateUsed {
            player_id: "alice".into()
        })
    );
}

#[derive(Debug)]
struct HomeGate;

impl QuantumGate for HomeGate {
    fn name(&self) -> &'static str {
        "home"
    }

    fn apply(&self, session: &mut GameSession, acting: usize) -> Result<(), DomainError> {
        session.players[acting].sector = Sector::Start;
        Ok(())
    }
}

#[derive(Debug)]
struct LeakyGate;

impl QuantumGate for LeakyGate {
    fn name(&self) -> &'static str {
        "leaky"
    }

    fn apply(&self, session: &mut GameSession, _acting: usize) -> Result<(), DomainError> {
        session.particles.pop();
        Ok(())
    }
}

#[test]
fn custom_gate_effect_is_applied() {
    let mut s = started_session(2, 1, 4, 40);
    place_at(&mut s, &[Sector::SectorB]);
    act(&mut s, "alice", "move", Some("sector_b")).unwrap();

    let gate = HomeGate;
    let ctx = TurnContext {
        gate: &gate,
        win_policy: WinPolicy::ActingPlayer,
        now: NOW,
    };
    let outcome = apply_move(&mut s, "alice", "use_quantum_gate", None, &ctx).unwrap();
    assert_eq!(s.players[0].sector, Sector::Start);
    assert_eq!(outcome.completed, Some(CompletionReason::ParticlesSecured));
}

#[test]
fn gate_that_loses_particles_is_rejected() {
    let mut s = started_session(2, 3, 4, 40);
    let gate = LeakyGate;
    let ctx = TurnContext {
        gate: &gate,
        win_policy: WinPolicy::ActingPlayer,
        now: NOW,
    };
    assert!(matches!(
        apply_move(&mut s, "alice", "use_quantum_gate", None, &ctx),
        Err(DomainError::Internal(_))
    ));
}

#[test]
fn held_particles_stay_with_their_holder() {
    let mut s = started_session(2, 2, 4, 40);
    place_at(&mut s, &[Sector::SectorB, Sector::SectorD]);
    act(&mut s, "alice", "move", Some("sector_b")).unwrap();
    act(&mut s, "alice", "end_turn", None).unwrap();
    act(&mut s, "bob", "move", Some("sector_b")).unwrap();

    assert_eq!(
        s.particles[0].location,
        ParticleLocation::HeldBy("alice".into())
    );
    assert_eq!(s.collected_by("bob").count(), 0);
}
