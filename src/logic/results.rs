//! Result entry: validate a reported result, then commit it to the scheduled match.

use crate::logic::match_rule::MatchRule;
use crate::models::{GameMatch, MatchReport, PlayerId, Tournament, TournamentError};

/// Record the result of the match between two players.
///
/// The match is looked up by the unordered name pair, in `round` if given or
/// in any round otherwise. A report that names the players in the reverse of
/// the scheduled order is flipped to match it. If the resulting match fails
/// [`MatchRule::is_valid`], nothing changes and `InvalidResult` is returned.
pub fn record_result(
    tournament: &mut Tournament,
    round: Option<u32>,
    player_1: &str,
    player_2: &str,
    report: MatchReport,
) -> Result<(), TournamentError> {
    let not_found = || TournamentError::MatchNotFound {
        player_1: player_1.to_string(),
        player_2: player_2.to_string(),
    };
    let id_1 = tournament.player_by_name(player_1).ok_or_else(not_found)?.id;
    let id_2 = tournament.player_by_name(player_2).ok_or_else(not_found)?.id;

    let rule = MatchRule::new(tournament.best_of);
    let include_set_results = tournament.include_set_results;
    let game = find_match_mut(tournament, round, id_1, id_2).ok_or_else(not_found)?;

    let report = if game.player_1 == id_1 { report } else { report.swapped() };
    let candidate = rule.generate_result(
        game.player_1,
        game.player_2,
        report.player_1_sets,
        report.player_2_sets,
        report.sets,
        include_set_results,
    );
    if !rule.is_valid(&candidate) {
        log::warn!(
            "Rejected result {}-{} for {} vs {}",
            candidate.player_1_sets,
            candidate.player_2_sets,
            player_1,
            player_2
        );
        return Err(TournamentError::InvalidResult);
    }

    log::debug!(
        "Recorded {}-{} for {} vs {}",
        candidate.player_1_sets,
        candidate.player_2_sets,
        player_1,
        player_2
    );
    game.replace_result(candidate);
    tournament.touch();
    Ok(())
}

fn find_match_mut(
    tournament: &mut Tournament,
    round: Option<u32>,
    a: PlayerId,
    b: PlayerId,
) -> Option<&mut GameMatch> {
    match round {
        Some(number) => tournament.round_mut(number)?.find_match_mut(a, b),
        None => tournament
            .rounds
            .iter_mut()
            .find_map(|r| r.find_match_mut(a, b)),
    }
}
