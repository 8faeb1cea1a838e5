// Integration tests for the eligibility engine.
//
// These tests exercise the engine end-to-end through the library crate's
// public API: a fixture club is loaded from JSON the way the persistence
// layer would supply it, and assignments plus full-roster validations are
// driven across the standard championship, the feminine designation, the
// mid-season rule and the alternate competition.

use std::sync::Once;

use anyhow::{Context, Result};
use serde::Deserialize;

use lineup_guard::config::RulesConfig;
use lineup_guard::roster::{Composition, Phase, Player, Team};
use lineup_guard::rules::{
    AssignmentResult, PointQuotaValidator, QuotaVerdict, Reason, RosterValidator,
    UncappedQuota, ValidationContext,
};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the project root, which is the cwd
/// for `cargo test`).
const FIXTURES: &str = "tests/fixtures";

static TRACING: Once = Once::new();

/// Install a test subscriber once; `RUST_LOG` filters apply.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Deserialize)]
struct ClubFixture {
    players: Vec<Player>,
    teams: Vec<Team>,
}

fn load_club() -> Result<ClubFixture> {
    init_tracing();
    let path = format!("{FIXTURES}/club.json");
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn rules() -> RulesConfig {
    let mut rules = RulesConfig::for_club("Riverside TT");
    rules.alternate.divisions.insert("Coupe D1".into(), 3);
    rules.alternate.divisions.insert("Coupe D3".into(), 1);
    rules
}

fn first_half(round: u32) -> ValidationContext {
    ValidationContext {
        phase: Phase::FirstHalf,
        round,
    }
}

fn reason_code(result: &AssignmentResult) -> Option<&'static str> {
    result.reason.as_ref().map(Reason::code)
}

/// Quota stub rejecting rosters whose summed points exceed a cap.
struct SummedPointsCap(u32);

impl PointQuotaValidator for SummedPointsCap {
    fn validate(&self, roster: &[&Player], division: &str, _female: bool) -> QuotaVerdict {
        let total: u32 = roster.iter().map(|p| p.points).sum();
        if total > self.0 {
            QuotaVerdict::rejected(format!("{total} points exceed {} in {division}", self.0))
        } else {
            QuotaVerdict::ok()
        }
    }
}

// ===========================================================================
// Standard championship
// ===========================================================================

#[test]
fn locked_player_is_barred_from_weaker_teams_but_not_stronger() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    let validator = RosterValidator::new(&rules, &UncappedQuota, &club.players, &club.teams);

    // lic-bernard is locked to ceiling 2 in the masculine first half.
    let rejected = validator.assign("lic-bernard", "t3", &Composition::new(), &first_half(1));
    assert!(!rejected.allowed);
    assert_eq!(reason_code(&rejected), Some("locked_out"));
    assert_eq!(rejected.simulated, Composition::new());

    let allowed = validator.assign("lic-bernard", "t2", &Composition::new(), &first_half(1));
    assert!(allowed.allowed, "ceiling 2 permits team 2: {allowed:?}");
    Ok(())
}

#[test]
fn second_match_reports_advisory_lock_metadata() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    let validator = RosterValidator::new(&rules, &UncappedQuota, &club.players, &club.teams);

    // lic-petit already has one masculine match for team 3; a second
    // match there locks them onto team 3, but the assignment itself is
    // allowed.
    let result = validator.assign("lic-petit", "t3", &Composition::new(), &first_half(1));
    assert!(result.allowed);
    assert!(result.will_become_locked);
    assert_eq!(result.new_lock_threshold, Some(3));

    // A debutant triggers no metadata.
    let debut = validator.assign("lic-noir", "t3", &Composition::new(), &first_half(1));
    assert!(debut.allowed);
    assert!(!debut.will_become_locked);
    assert_eq!(debut.new_lock_threshold, None);
    Ok(())
}

#[test]
fn quotas_apply_over_the_simulated_roster() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    let validator = RosterValidator::new(&rules, &UncappedQuota, &club.players, &club.teams);

    // Foreign quota: one foreign player passes, the second is rejected.
    let roster = Composition::new().with_team("t3", ["lic-garcia"]);
    let second = validator.assign("lic-silva", "t3", &roster, &first_half(1));
    assert_eq!(reason_code(&second), Some("foreign_quota"));

    // European players do not count against the cap.
    let european = validator.assign("lic-weber", "t3", &roster, &first_half(1));
    assert!(european.allowed);

    // Female quota on a male-designated team: the third female fails...
    let two_females = Composition::new().with_team("t3", ["lic-durand", "lic-moreau"]);
    let third = validator.assign("lic-lefevre", "t3", &two_females, &first_half(1));
    assert_eq!(reason_code(&third), Some("female_quota"));

    // ...but the feminine-designated team has no such cap.
    let fem_roster = Composition::new().with_team("fem1", ["lic-durand", "lic-moreau"]);
    let fem = validator.assign("lic-lefevre", "fem1", &fem_roster, &first_half(1));
    assert!(fem.allowed, "feminine team must accept a third female: {fem:?}");
    Ok(())
}

#[test]
fn point_quota_delegate_rejects_over_the_division_cap() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    let quota = SummedPointsCap(1500);
    let validator = RosterValidator::new(&rules, &quota, &club.players, &club.teams);

    let roster = Composition::new().with_team("t3", ["lic-martin"]);
    let result = validator.assign("lic-petit", "t3", &roster, &first_half(1));
    assert_eq!(reason_code(&result), Some("point_quota"));
    match result.reason {
        Some(Reason::PointQuota { ref detail }) => {
            assert!(detail.contains("1630"), "detail should carry the total: {detail}")
        }
        ref other => panic!("expected PointQuota, got {other:?}"),
    }
    Ok(())
}

#[test]
fn midseason_rule_caps_round_one_reinforcements() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    let validator = RosterValidator::new(&rules, &UncappedQuota, &club.players, &club.teams);

    // lic-martin and lic-petit both played round 1 for team 2; on the
    // designated round a team-3 roster may field only one of them.
    let roster = Composition::new().with_team("t3", ["lic-martin"]);
    let second = validator.assign("lic-petit", "t3", &roster, &first_half(2));
    assert_eq!(reason_code(&second), Some("midseason_reinforcement"));

    // The same pair is fine on any other round.
    let later = validator.assign("lic-petit", "t3", &roster, &first_half(3));
    assert!(later.allowed);
    Ok(())
}

// ===========================================================================
// Rule-exempt teams
// ===========================================================================

#[test]
fn non_numbered_team_bypasses_lock_and_quota_checks() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    // A zero-cap quota would reject anything it is asked about.
    let quota = SummedPointsCap(0);
    let validator = RosterValidator::new(&rules, &quota, &club.players, &club.teams);

    // Locked player, friendly squad: allowed by design.
    let result = validator.assign("lic-bernard", "loisir", &Composition::new(), &first_half(2));
    assert!(result.allowed, "exempt team must bypass checks: {result:?}");
    assert!(!result.will_become_locked);

    let roster = Composition::new().with_team("loisir", ["lic-bernard"]);
    assert!(validator.validate_roster("loisir", &roster, &first_half(2)).valid);
    Ok(())
}

// ===========================================================================
// Alternate competition
// ===========================================================================

#[test]
fn alternate_group_cap_names_every_offender() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    let validator = RosterValidator::new(&rules, &UncappedQuota, &club.players, &club.teams);

    // lic-roux and lic-blanc each have three alternate matches in team 1.
    // Completing the single group of "Coupe D3" with both is rejected.
    let roster = Composition::new().with_team("alt2", ["lic-roux", "lic-blanc"]);
    let result = validator.assign("lic-noir", "alt2", &roster, &first_half(1));
    assert!(!result.allowed);
    match result.reason {
        Some(Reason::GroupBurnout { group, ref players }) => {
            assert_eq!(group, 1);
            assert_eq!(players, &["lic-roux".to_string(), "lic-blanc".to_string()]);
        }
        ref other => panic!("expected GroupBurnout, got {other:?}"),
    }

    // A partial roster with both is tolerated until complete.
    let partial = Composition::new().with_team("alt2", ["lic-roux"]);
    let second = validator.assign("lic-blanc", "alt2", &partial, &first_half(1));
    assert!(second.allowed);
    Ok(())
}

#[test]
fn alternate_assignment_reports_the_alternate_lock() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    let validator = RosterValidator::new(&rules, &UncappedQuota, &club.players, &club.teams);

    // Three matches in team 1 bar lic-roux from team 2 going forward.
    let result = validator.assign("lic-roux", "alt2", &Composition::new(), &first_half(1));
    assert!(result.allowed);
    assert!(result.will_become_locked);
    assert_eq!(result.new_lock_threshold, Some(2));

    // The alternate competition carries no nationality cap.
    let roster = Composition::new().with_team("alt2", ["lic-garcia"]);
    let foreign = validator.assign("lic-silva", "alt2", &roster, &first_half(1));
    assert!(foreign.allowed);
    Ok(())
}

// ===========================================================================
// Full-roster validation
// ===========================================================================

#[test]
fn roster_validation_catches_violations_from_any_path() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    let validator = RosterValidator::new(&rules, &UncappedQuota, &club.players, &club.teams);

    // A roster assembled outside the assignment path still fails: the
    // locked player sits on team 3 directly.
    let roster = Composition::new().with_team("t3", ["lic-bernard", "lic-noir"]);
    let result = validator.validate_roster("t3", &roster, &first_half(1));
    assert!(!result.valid);
    assert_eq!(result.reason.as_ref().map(Reason::code), Some("locked_out"));
    assert_eq!(result.offending_players, vec!["lic-bernard"]);
    Ok(())
}

#[test]
fn roster_validation_is_idempotent() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    let validator = RosterValidator::new(&rules, &UncappedQuota, &club.players, &club.teams);

    let roster = Composition::new().with_team("t3", ["lic-martin", "lic-noir"]);
    let first = validator.validate_roster("t3", &roster, &first_half(1));
    let second = validator.validate_roster("t3", &roster, &first_half(1));
    assert_eq!(first, second);
    assert!(first.valid);

    // The roster the caller handed in was never touched.
    assert_eq!(
        roster.players("t3"),
        ["lic-martin".to_string(), "lic-noir".to_string()]
    );
    Ok(())
}

#[test]
fn assignment_results_round_trip_through_serde() -> Result<()> {
    let club = load_club()?;
    let rules = rules();
    let validator = RosterValidator::new(&rules, &UncappedQuota, &club.players, &club.teams);

    let result = validator.assign("lic-bernard", "t3", &Composition::new(), &first_half(1));
    let json = serde_json::to_string(&result)?;
    let back: AssignmentResult = serde_json::from_str(&json)?;
    assert_eq!(back.allowed, result.allowed);
    assert_eq!(
        back.reason.as_ref().map(Reason::code),
        result.reason.as_ref().map(Reason::code)
    );
    Ok(())
}
