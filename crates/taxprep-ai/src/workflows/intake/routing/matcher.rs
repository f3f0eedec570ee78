use std::cmp::Ordering;

use serde::Serialize;

use super::super::domain::{Client, ClientId, ComplexityLevel, Specialization, StaffId, TaxPro};
use super::scoring::{complexity_level, complexity_score, required_specializations};
use super::weights::RoutingPolicy;

/// One scored candidate, exposed for both the primary match and alternates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateView {
    pub staff_id: StaffId,
    pub name: String,
    pub match_score: f32,
    pub matched_specializations: usize,
    pub open_slots: u32,
}

/// Result of a routing query: the best available preparer (if any), up to two
/// alternates, and a narrated reason.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingOutcome {
    pub client_id: ClientId,
    pub complexity_score: u8,
    pub complexity_level: ComplexityLevel,
    pub required_specializations: Vec<Specialization>,
    pub selected: Option<CandidateView>,
    pub alternates: Vec<CandidateView>,
    pub reason: String,
}

/// Greedily match a client against the roster. Pure with respect to its
/// inputs; persistence of the score and the assignment is the caller's job.
pub fn match_tax_pro(client: &Client, roster: &[TaxPro], policy: &RoutingPolicy) -> RoutingOutcome {
    let score = complexity_score(client);
    let level = complexity_level(score);
    let required = required_specializations(client);

    let mut candidates: Vec<CandidateView> = roster
        .iter()
        .filter(|pro| pro.has_capacity())
        .map(|pro| score_candidate(pro, level, &required, policy))
        .collect();

    if candidates.is_empty() {
        return RoutingOutcome {
            client_id: client.id.clone(),
            complexity_score: score,
            complexity_level: level,
            required_specializations: required,
            selected: None,
            alternates: Vec::new(),
            reason: "no staff members are currently available for new assignments".to_string(),
        };
    }

    // Stable sort keeps roster order as the tie-break, so results are
    // deterministic for equal scores.
    candidates.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });

    let top = candidates.remove(0);
    if top.match_score < 0.0 {
        return RoutingOutcome {
            client_id: client.id.clone(),
            complexity_score: score,
            complexity_level: level,
            required_specializations: required,
            selected: None,
            alternates: Vec::new(),
            reason: format!(
                "no available preparer can take on {} complexity right now",
                level.label()
            ),
        };
    }

    candidates.truncate(policy.alternate_count);
    let reason = narrate_match(&top, level, &required);

    RoutingOutcome {
        client_id: client.id.clone(),
        complexity_score: score,
        complexity_level: level,
        required_specializations: required,
        selected: Some(top),
        alternates: candidates,
        reason,
    }
}

fn score_candidate(
    pro: &TaxPro,
    level: ComplexityLevel,
    required: &[Specialization],
    policy: &RoutingPolicy,
) -> CandidateView {
    let mut score = if pro.max_complexity < level {
        policy.tier_shortfall_penalty
    } else {
        policy.tier_bonus
    };

    let matched = required
        .iter()
        .filter(|spec| pro.specializations.contains(*spec))
        .count();
    // `required` always contains the individual tag, so the ratio is defined.
    score += matched as f32 / required.len() as f32 * policy.specialization_weight;

    let open_slots = pro.max_daily_appointments.saturating_sub(pro.current_load);
    if pro.max_daily_appointments > 0 {
        score +=
            open_slots as f32 / pro.max_daily_appointments as f32 * policy.load_balance_weight;
    }

    score += pro.rating * policy.rating_weight;

    CandidateView {
        staff_id: pro.id.clone(),
        name: pro.name.clone(),
        match_score: score,
        matched_specializations: matched,
        open_slots,
    }
}

fn narrate_match(
    candidate: &CandidateView,
    level: ComplexityLevel,
    required: &[Specialization],
) -> String {
    let needed = required
        .iter()
        .map(|spec| spec.label())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{} return needing {}; {} covers {}/{} specializations and has {} open slot(s) today",
        level.label(),
        needed,
        candidate.name,
        candidate.matched_specializations,
        required.len(),
        candidate.open_slots
    )
}
