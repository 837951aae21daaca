//! Turn transition coordination.
//!
//! Runs after every executed command: decides round rollover vs. turn
//! handoff, advances missiles at round boundaries, detects the end of
//! combat, and schedules AI re-entry as a deferred task on the session's
//! own queue.

use highguard_core::enums::{EndReason, SessionPhase};
use highguard_core::events::{CombatEvent, Outbound, PartyHull};
use highguard_core::ship::WeaponId;
use highguard_core::types::CombatantId;

use crate::missiles::MissileAdvance;
use crate::resolver;
use crate::session::CombatSession;

/// Advance session turn state after a command completed.
///
/// Both flags set: increment the round, move missiles, reset the flags,
/// and hand the turn to the parity leader. One flag set: hand the turn
/// to the other party. Either way, if the new active party is
/// AI-controlled, schedule its turn at `now + ai_delay_ms`.
pub fn after_action(
    session: &mut CombatSession,
    now_ms: u64,
    ai_delay_ms: u64,
    events: &mut Vec<Outbound>,
) {
    if session.phase != SessionPhase::Active {
        return;
    }

    // A command may have zeroed a hull; that ends the session before any
    // turn bookkeeping.
    if check_destruction(session, events) {
        return;
    }

    if session.both_turns_complete() {
        session.round += 1;
        advance_missiles(session, events);
        if session.phase != SessionPhase::Active {
            return;
        }
        session.turn_complete = [false, false];
        let leader = session.round_leader(session.round);
        session.begin_turn_for(leader);
        events.push(Outbound::both(CombatEvent::NewRound {
            round: session.round,
            hulls: party_hulls(session),
        }));
    } else {
        let Some(next) = session.opponent_of(session.active_party) else {
            return;
        };
        session.begin_turn_for(next);
        events.push(Outbound::both(CombatEvent::TurnChange {
            active_party: session.active_party,
            round: session.round,
        }));
    }

    schedule_ai_if_needed(session, now_ms, ai_delay_ms);
}

/// Emit the session-start handoff and schedule the opening AI turn.
pub fn begin_session(
    session: &mut CombatSession,
    now_ms: u64,
    ai_delay_ms: u64,
    events: &mut Vec<Outbound>,
) {
    session.phase = SessionPhase::Active;
    let leader = session.round_leader(session.round);
    session.begin_turn_for(leader);
    events.push(Outbound::both(CombatEvent::TurnChange {
        active_party: session.active_party,
        round: session.round,
    }));
    schedule_ai_if_needed(session, now_ms, ai_delay_ms);
}

/// Arm the deferred AI task when the active party is AI-controlled.
pub fn schedule_ai_if_needed(session: &mut CombatSession, now_ms: u64, ai_delay_ms: u64) {
    if session.strategy_of(session.active_party).is_some() {
        session.pending_ai_at = Some(now_ms + ai_delay_ms);
    }
}

/// Move every missile one band closer and resolve impacts.
fn advance_missiles(session: &mut CombatSession, events: &mut Vec<Outbound>) {
    let advances = session.missiles.advance_round();
    for advance in advances {
        match advance {
            MissileAdvance::Moved {
                id,
                old_range,
                new_range,
            } => {
                events.push(Outbound::both(CombatEvent::MissileMoved {
                    missile_id: id,
                    old_range,
                    new_range,
                }));
            }
            MissileAdvance::Impacting(missile) => {
                let Some(target_slot) = session.slot_of(missile.target) else {
                    continue;
                };
                let notation = WeaponId::MissileRack.spec().damage;
                let before_hull = session.combatants[target_slot].hull;
                let impact = match resolver::resolve_impact(
                    &session.combatants[target_slot],
                    notation,
                    &mut session.dice,
                ) {
                    Ok(impact) => impact,
                    Err(_) => continue,
                };
                session.combatants[target_slot].hull = impact.new_hull;
                events.push(Outbound::both(CombatEvent::MissileImpact {
                    missile_id: missile.id,
                    hit: true,
                    damage: impact.damage,
                    target_hull: impact.new_hull,
                }));

                let max_hull = session.combatants[target_slot].max_hull;
                if let Some(crit) = resolver::roll_critical(
                    before_hull,
                    impact.new_hull,
                    max_hull,
                    &mut session.dice,
                ) {
                    session.combatants[target_slot].criticals.push(crit);
                    events.push(Outbound::both(CombatEvent::Critical {
                        target: missile.target,
                        system: crit.system,
                        severity: crit.severity,
                        damage: crit.damage,
                    }));
                }

                if check_destruction(session, events) {
                    return;
                }
            }
        }
    }
}

/// End the session if a hull reached zero. Returns true when it did.
fn check_destruction(session: &mut CombatSession, events: &mut Vec<Outbound>) -> bool {
    let Some(loser_slot) = session.combatants.iter().position(|c| c.hull == 0) else {
        return false;
    };
    let winner = session.combatants[1 - loser_slot].id;
    finish(session, winner, None, events);
    true
}

/// Terminate the session and emit `CombatEnd`.
///
/// A normal kill broadcasts to both parties; a disconnect forfeiture
/// notifies only the remaining party.
pub fn finish(
    session: &mut CombatSession,
    winner: CombatantId,
    reason: Option<EndReason>,
    events: &mut Vec<Outbound>,
) {
    session.phase = match reason {
        None => SessionPhase::Victory,
        Some(EndReason::OpponentDisconnected) => SessionPhase::Forfeited,
        Some(EndReason::Abandoned) => SessionPhase::Abandoned,
    };
    let loser = session.opponent_of(winner).unwrap_or(winner);
    let event = CombatEvent::CombatEnd {
        winner,
        loser,
        reason,
        final_hulls: party_hulls(session),
        rounds: session.round,
    };
    let outbound = match reason {
        Some(EndReason::OpponentDisconnected) => Outbound::to(winner, event),
        _ => Outbound::both(event),
    };
    events.push(outbound);

    session.history.clear();
    session.inbox.clear();
    session.pending_ai_at = None;
}

fn party_hulls(session: &CombatSession) -> Vec<PartyHull> {
    session
        .combatants
        .iter()
        .map(|c| PartyHull {
            party: c.id,
            hull: c.hull,
        })
        .collect()
}
