//! Integration tests for JSON export/import, the tournament library and roster import.

use round_robin_web::{
    compute_standings, create_schedule, from_json, read_roster_csv, record_result, to_json,
    MatchReport, Tournament, TournamentError, TournamentLibrary,
};

fn five_player_league() -> Tournament {
    let mut t = create_schedule("Spring league", &["Ana", "Bo", "Cy", "Dee", "Eli"], 3, true).unwrap();
    record_result(&mut t, None, "Ana", "Bo", MatchReport::with_sets(&[(11, 7), (11, 9)])).unwrap();
    record_result(&mut t, None, "Cy", "Eli", MatchReport::with_sets(&[(9, 11), (12, 10)])).unwrap();
    compute_standings(&mut t);
    t
}

#[test]
fn json_round_trip_rebuilds_the_same_tournament() {
    let t = five_player_league();
    let json = to_json(&t).unwrap();
    let back = from_json(&json).unwrap();

    assert_eq!(back, t);
    // Every schedule reference resolves to an entry of the roster itself.
    for round in &back.rounds {
        for m in &round.matches {
            assert!(back.player(m.player_1).is_some());
            assert!(back.player(m.player_2).is_some());
        }
        let bye = round.bye.expect("five players means one bye per round");
        assert!(back.player(bye).is_some());
    }
}

#[test]
fn imported_roster_is_shared_by_all_rounds() {
    let mut back = from_json(&to_json(&five_player_league()).unwrap()).unwrap();
    let bo = back.player_by_name("Bo").unwrap().id;
    back.rename_player(bo, "Bob").unwrap();

    let doc = serde_json::to_value(&back).unwrap();
    let mentions = doc["rounds"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|r| r["matches"].as_array().unwrap().iter())
        .filter(|m| m["player_1"] == "Bob" || m["player_2"] == "Bob")
        .count();
    assert_eq!(mentions, 4);
    assert!(!doc.to_string().contains("\"Bo\""));
}

#[test]
fn document_with_unknown_player_is_rejected() {
    let json = to_json(&five_player_league()).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    doc["rounds"][0]["matches"][0]["player_1"] = "Ghost".into();
    assert!(matches!(
        from_json(&doc.to_string()),
        Err(TournamentError::InvalidDocument(_))
    ));

    let mut even: serde_json::Value = serde_json::from_str(&json).unwrap();
    even["best_of"] = 4.into();
    assert!(matches!(
        from_json(&even.to_string()),
        Err(TournamentError::InvalidDocument(_))
    ));
}

#[test]
fn player_rename_conflicts_are_rejected() {
    let mut t = five_player_league();
    let ana = t.player_by_name("Ana").unwrap().id;
    assert_eq!(
        t.rename_player(ana, "dee"),
        Err(TournamentError::NameConflict("dee".into()))
    );
    assert_eq!(t.player(ana).unwrap().name, "Ana");
    // Changing only the case of one's own name is fine.
    t.rename_player(ana, "ANA").unwrap();
    assert_eq!(t.player(ana).unwrap().name, "ANA");
}

#[test]
fn library_lists_searches_and_renames() {
    let mut lib = TournamentLibrary::new();
    let spring = lib.insert(five_player_league()).unwrap();
    let autumn = lib
        .insert(create_schedule("Autumn cup", &["X", "Y"], 1, false).unwrap())
        .unwrap();

    let names: Vec<_> = lib.list().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Autumn cup", "Spring league"]);
    assert_eq!(lib.search("LEAGUE").len(), 1);
    assert_eq!(lib.search("LEAGUE")[0].id, spring);

    assert_eq!(
        lib.rename(autumn, "spring league"),
        Err(TournamentError::NameConflict("spring league".into()))
    );
    lib.rename(autumn, "Winter cup").unwrap();
    assert!(lib.find_by_name("winter cup").is_some());

    let dup = create_schedule("Winter Cup", &["X", "Y"], 1, false).unwrap();
    assert!(matches!(lib.insert(dup), Err(TournamentError::NameConflict(_))));

    lib.remove(autumn).unwrap();
    assert_eq!(lib.len(), 1);
    assert_eq!(lib.remove(autumn), Err(TournamentError::TournamentNotFound(autumn)));
}

#[test]
fn library_export_import_replaces_same_tournament() {
    let mut lib = TournamentLibrary::new();
    let id = lib.insert(five_player_league()).unwrap();
    let json = lib.export_json(id).unwrap();

    assert_eq!(lib.import_json(&json).unwrap(), id);
    assert_eq!(lib.len(), 1);

    let mut other = TournamentLibrary::new();
    other
        .insert(create_schedule("Spring league", &["Q", "R"], 1, false).unwrap())
        .unwrap();
    assert!(matches!(other.import_json(&json), Err(TournamentError::NameConflict(_))));
}

#[test]
fn idle_tournaments_are_evicted() {
    let mut lib = TournamentLibrary::new();
    lib.insert(five_player_league()).unwrap();
    assert_eq!(lib.evict_idle(chrono::Duration::hours(1)), 0);
    assert_eq!(lib.evict_idle(chrono::Duration::seconds(-1)), 1);
    assert!(lib.is_empty());
}

#[test]
fn roster_csv_reads_first_column() {
    let csv = "# club roster\nAna, A-team\n  Bo \n\n,blank\nCy\n";
    let names = read_roster_csv(csv.as_bytes()).unwrap();
    assert_eq!(names, vec!["Ana", "Bo", "Cy"]);
}

#[test]
fn names_differing_only_in_accented_case_survive_a_round_trip() {
    // Uniqueness ignores ASCII case only, so these are two distinct players.
    let t = create_schedule("Liga", &["Ángel", "ángel", "Bo"], 3, false).unwrap();
    assert_eq!(t.players.len(), 3);

    let back = from_json(&to_json(&t).unwrap()).unwrap();
    assert_eq!(back, t);
    let upper = back.players[0].id;
    let lower = back.players[1].id;
    assert!(back.rounds.iter().any(|r| r.find_match(upper, lower).is_some()));
}

#[test]
fn document_breaking_schedule_invariants_is_rejected() {
    let json = to_json(&five_player_league()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

    let mut same_id = doc.clone();
    same_id["players"][1]["id"] = doc["players"][0]["id"].clone();
    assert!(matches!(
        from_json(&same_id.to_string()),
        Err(TournamentError::InvalidDocument(_))
    ));

    let mut self_match = doc.clone();
    let opponent = self_match["rounds"][0]["matches"][0]["player_2"].clone();
    self_match["rounds"][0]["matches"][0]["player_1"] = opponent;
    assert!(matches!(
        from_json(&self_match.to_string()),
        Err(TournamentError::InvalidDocument(_))
    ));

    let mut beyond_best_of = doc.clone();
    let m = &mut beyond_best_of["rounds"][0]["matches"][0];
    m["include_set_results"] = false.into();
    m["sets"] = serde_json::json!({});
    m["player_1_sets"] = 3.into();
    m["player_2_sets"] = 0.into();
    assert!(matches!(
        from_json(&beyond_best_of.to_string()),
        Err(TournamentError::InvalidDocument(_))
    ));

    let mut counts_disagree_with_sets = doc;
    let m = &mut counts_disagree_with_sets["rounds"][0]["matches"][0];
    m["sets"] = serde_json::json!({ "0": { "player_1_points": 11, "player_2_points": 4 } });
    m["player_1_sets"] = 2.into();
    m["player_2_sets"] = 1.into();
    assert!(matches!(
        from_json(&counts_disagree_with_sets.to_string()),
        Err(TournamentError::InvalidDocument(_))
    ));
}

#[test]
fn importing_a_renamed_copy_replaces_the_same_tournament() {
    let mut lib = TournamentLibrary::new();
    let id = lib.insert(five_player_league()).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&lib.export_json(id).unwrap()).unwrap();
    doc["name"] = "Spring league (final)".into();

    assert_eq!(lib.import_json(&doc.to_string()).unwrap(), id);
    assert_eq!(lib.len(), 1);
    assert_eq!(lib.get(id).unwrap().name, "Spring league (final)");
}

#[test]
fn exporting_counts_as_activity() {
    let mut lib = TournamentLibrary::new();
    let id = lib.insert(five_player_league()).unwrap();
    let inserted = lib.last_accessed(id).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    lib.export_json(id).unwrap();
    assert!(lib.last_accessed(id).unwrap() > inserted);

    // Listing is read-only and leaves the access time alone.
    let exported = lib.last_accessed(id).unwrap();
    lib.list();
    assert_eq!(lib.last_accessed(id).unwrap(), exported);
}
