use pretty_assertions::assert_eq;
use ranked_tally::tabulator::winners;
use ranked_tally::{
    CandidateAction, ElectionConfig, ElectionType, RankedBallot, RoundReport, Tallier, VoteCounts,
};

const EPSILON: f64 = 1e-9;

fn ranking(names: &[&str]) -> RankedBallot {
    names.iter().copied().collect()
}

/// Consolidates `count` copies of each ranking, one voter at a time.
fn consolidate(groups: &[(&[&str], usize)]) -> VoteCounts {
    VoteCounts::from_rankings(
        groups
            .iter()
            .flat_map(|(names, count)| std::iter::repeat_n(ranking(names), *count)),
    )
    .unwrap()
}

fn three_way() -> VoteCounts {
    consolidate(&[
        (&["ALPHA", "BETA", "GAMMA"], 40),
        (&["ALPHA", "GAMMA", "BETA"], 42),
        (&["BETA", "ALPHA", "GAMMA"], 44),
        (&["GAMMA", "ALPHA", "BETA"], 46),
        (&["GAMMA", "BETA", "ALPHA"], 48),
    ])
}

fn primary() -> VoteCounts {
    consolidate(&[
        (&["ALPHA", "BETA", "GAMMA"], 400),
        (&["ALPHA", "GAMMA", "BETA"], 420),
        (&["BETA", "ALPHA", "GAMMA"], 440),
        (&["GAMMA", "ALPHA", "BETA"], 460),
        (&["GAMMA", "BETA", "ALPHA"], 480),
        (&["DELTA", "BETA", "GAMMA"], 400),
        (&["DELTA", "GAMMA", "BETA"], 420),
        (&["BETA", "DELTA", "GAMMA"], 440),
        (&["GAMMA", "DELTA", "BETA"], 460),
        (&["GAMMA", "BETA", "DELTA"], 480),
        (&["DELTA", "EPSILON", "GAMMA"], 400),
        (&["DELTA", "GAMMA", "EPSILON"], 420),
        (&["EPSILON", "DELTA", "GAMMA"], 440),
        (&["GAMMA", "DELTA", "EPSILON"], 460),
        (&["GAMMA", "EPSILON", "DELTA"], 480),
        (&["ALPHA", "EPSILON", "GAMMA"], 400),
        (&["ALPHA", "ZETA", "BETA"], 420),
        (&["BETA", "ALPHA", "ZETA"], 440),
        (&["ZETA", "ALPHA", "BETA"], 460),
        (&["ZETA", "BETA", "ALPHA"], 480),
    ])
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}

fn assert_round(
    report: &RoundReport,
    round: u32,
    results: &[(&str, f64)],
    outcome: Option<(&str, CandidateAction, u32, f64)>,
) {
    assert_eq!(report.round, round);

    let names: Vec<_> = report.results.iter().map(|(c, _)| c.as_str()).collect();
    let expected_names: Vec<_> = results.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, expected_names, "round {} candidates", round);
    for ((candidate, votes), (_, expected)) in report.results.iter().zip(results) {
        assert_close(votes, *expected, &format!("round {} {}", round, candidate));
    }

    match (&report.outcome, outcome) {
        (None, None) => {}
        (Some(actual), Some((candidate, action, seats, transferred))) => {
            assert_eq!(actual.candidate.as_str(), candidate);
            assert_eq!(actual.action, action);
            assert_eq!(actual.round, round);
            assert_eq!(actual.seats, seats);
            assert_close(
                actual.votes_transferred,
                transferred,
                &format!("round {} transferred", round),
            );
        }
        (actual, expected) => panic!(
            "round {}: expected outcome {:?}, got {:?}",
            round, expected, actual
        ),
    }
}

#[test]
fn consolidation_matches_vote_record() {
    let votes = three_way();
    assert_eq!(votes.len(), 5);
    let record: Vec<_> = votes.iter().map(|(r, c)| (r.to_key(), c)).collect();
    assert_eq!(
        record,
        vec![
            (r#"["ALPHA","BETA","GAMMA"]"#.to_string(), 40),
            (r#"["ALPHA","GAMMA","BETA"]"#.to_string(), 42),
            (r#"["BETA","ALPHA","GAMMA"]"#.to_string(), 44),
            (r#"["GAMMA","ALPHA","BETA"]"#.to_string(), 46),
            (r#"["GAMMA","BETA","ALPHA"]"#.to_string(), 48),
        ]
    );
}

#[test]
fn duplicate_entries_build_one_ballot() {
    let mut votes = VoteCounts::new();
    votes.add(ranking(&["A", "B"]), 3).unwrap();
    votes.add(ranking(&["B", "A"]), 2).unwrap();
    votes.add(ranking(&["A", "B"]), 4).unwrap();

    let tallier = Tallier::new(votes, ElectionConfig::default()).unwrap();
    assert_eq!(tallier.ballots().len(), 2);
    assert_eq!(tallier.ballots()[0].current_weight(), 7.0);
    assert_eq!(tallier.quota(), 5);
}

#[test]
fn constructs_instant_runoff() {
    let tallier = Tallier::new(three_way(), ElectionConfig::default()).unwrap();
    let weights: Vec<_> = tallier
        .ballots()
        .iter()
        .map(|b| b.current_weight())
        .collect();
    assert_eq!(weights, vec![40.0, 42.0, 44.0, 46.0, 48.0]);
    assert_eq!(tallier.seats_remaining(), 1);
    assert_eq!(tallier.quota(), 111);
    assert_round(
        &RoundReport {
            round: tallier.round(),
            results: tallier.round_tally(),
            outcome: None,
        },
        1,
        &[("ALPHA", 82.0), ("BETA", 44.0), ("GAMMA", 94.0)],
        None,
    );
}

#[test]
fn constructs_multi_seat() {
    let tallier = Tallier::new(
        three_way(),
        ElectionConfig::new(2, ElectionType::MultiSeat),
    )
    .unwrap();
    assert_eq!(tallier.seats_remaining(), 2);
    assert_eq!(tallier.quota(), 74);
}

#[test]
fn tallies_instant_runoff() {
    let mut tallier = Tallier::new(three_way(), ElectionConfig::default()).unwrap();
    let reports = tallier.tally();
    assert_eq!(reports.len(), 3);

    assert_round(
        &reports[0],
        1,
        &[("ALPHA", 82.0), ("BETA", 44.0), ("GAMMA", 94.0)],
        Some(("BETA", CandidateAction::Eliminated, 0, 44.0)),
    );
    assert_round(
        &reports[1],
        2,
        &[("ALPHA", 126.0), ("GAMMA", 94.0)],
        Some(("ALPHA", CandidateAction::Elected, 1, 15.0)),
    );
    assert_round(&reports[2], 3, &[("GAMMA", 109.0)], None);
}

#[test]
fn tallies_single_transferable_vote() {
    let mut tallier = Tallier::new(
        three_way(),
        ElectionConfig::new(2, ElectionType::MultiSeat),
    )
    .unwrap();
    let reports = tallier.tally();
    assert_eq!(reports.len(), 3);

    assert_round(
        &reports[0],
        1,
        &[("ALPHA", 82.0), ("BETA", 44.0), ("GAMMA", 94.0)],
        Some(("GAMMA", CandidateAction::Elected, 1, 20.0)),
    );
    assert_round(
        &reports[1],
        2,
        &[("ALPHA", 91.7872340425532), ("BETA", 54.212765957446805)],
        Some(("ALPHA", CandidateAction::Elected, 1, 17.787234042553195)),
    );
    assert_round(&reports[2], 3, &[("BETA", 72.0)], None);
}

#[test]
fn tallies_large_instant_runoff() {
    let mut tallier = Tallier::new(primary(), ElectionConfig::default()).unwrap();
    assert_eq!(tallier.quota(), 4401);
    let reports = tallier.tally();
    assert_eq!(reports.len(), 6);

    assert_round(
        &reports[0],
        1,
        &[
            ("ALPHA", 1640.0),
            ("BETA", 1320.0),
            ("GAMMA", 2820.0),
            ("DELTA", 1640.0),
            ("EPSILON", 440.0),
            ("ZETA", 940.0),
        ],
        Some(("EPSILON", CandidateAction::Eliminated, 0, 440.0)),
    );
    assert_round(
        &reports[1],
        2,
        &[
            ("ALPHA", 1640.0),
            ("BETA", 1320.0),
            ("GAMMA", 2820.0),
            ("DELTA", 2080.0),
            ("ZETA", 940.0),
        ],
        Some(("ZETA", CandidateAction::Eliminated, 0, 940.0)),
    );
    assert_round(
        &reports[2],
        3,
        &[
            ("ALPHA", 2100.0),
            ("BETA", 1800.0),
            ("GAMMA", 2820.0),
            ("DELTA", 2080.0),
        ],
        Some(("BETA", CandidateAction::Eliminated, 0, 1800.0)),
    );
    assert_round(
        &reports[3],
        4,
        &[("ALPHA", 3460.0), ("GAMMA", 2820.0), ("DELTA", 2520.0)],
        Some(("DELTA", CandidateAction::Eliminated, 0, 2520.0)),
    );
    assert_round(
        &reports[4],
        5,
        &[("ALPHA", 3460.0), ("GAMMA", 5340.0)],
        Some(("GAMMA", CandidateAction::Elected, 1, 939.0)),
    );
    assert_round(&reports[5], 6, &[("ALPHA", 3625.2921348314603)], None);
}

#[test]
fn tallies_large_single_transferable_vote() {
    let mut tallier = Tallier::new(primary(), ElectionConfig::new(3, ElectionType::MultiSeat))
        .unwrap();
    assert_eq!(tallier.quota(), 2201);
    let reports = tallier.tally();
    assert_eq!(reports.len(), 7);

    assert_round(
        &reports[0],
        1,
        &[
            ("ALPHA", 1640.0),
            ("BETA", 1320.0),
            ("GAMMA", 2820.0),
            ("DELTA", 1640.0),
            ("EPSILON", 440.0),
            ("ZETA", 940.0),
        ],
        Some(("GAMMA", CandidateAction::Elected, 1, 619.0)),
    );
    assert_round(
        &reports[1],
        2,
        &[
            ("ALPHA", 1740.9716312056737),
            ("BETA", 1530.723404255319),
            ("DELTA", 1841.9432624113474),
            ("EPSILON", 545.3617021276596),
            ("ZETA", 940.0),
        ],
        Some(("EPSILON", CandidateAction::Eliminated, 0, 545.3617021276596)),
    );
    assert_round(
        &reports[2],
        3,
        &[
            ("ALPHA", 1740.9716312056737),
            ("BETA", 1530.723404255319),
            ("DELTA", 2387.304964539007),
            ("ZETA", 940.0),
        ],
        Some(("DELTA", CandidateAction::Elected, 1, 186.30496453900696)),
    );
    assert_round(
        &reports[3],
        4,
        &[
            ("ALPHA", 1740.9716312056737),
            ("BETA", 1602.59590887533),
            ("ZETA", 940.0),
        ],
        Some(("ZETA", CandidateAction::Eliminated, 0, 940.0)),
    );
    assert_round(
        &reports[4],
        5,
        &[("ALPHA", 2200.9716312056735), ("BETA", 2082.5959088753298)],
        Some(("BETA", CandidateAction::Eliminated, 0, 2082.5959088753298)),
    );
    assert_round(
        &reports[5],
        6,
        &[("ALPHA", 3666.333333333333)],
        Some(("ALPHA", CandidateAction::Assigned, 1, 0.0)),
    );
    assert_round(&reports[6], 7, &[], None);
}

#[test]
fn tallies_democratic_primary() {
    let mut tallier = Tallier::new(
        primary(),
        ElectionConfig::new(24, ElectionType::DemocraticPrimary),
    )
    .unwrap();
    assert_eq!(tallier.quota(), 353);
    let reports = tallier.tally().to_vec();
    assert_eq!(reports.len(), 7);

    let delegates: u32 = winners(&reports).iter().map(|(_, seats)| seats).sum();
    assert_eq!(delegates, 24);
    assert_eq!(tallier.seats_remaining(), 0);

    assert_round(
        &reports[0],
        1,
        &[
            ("ALPHA", 1640.0),
            ("BETA", 1320.0),
            ("GAMMA", 2820.0),
            ("DELTA", 1640.0),
            ("EPSILON", 440.0),
            ("ZETA", 940.0),
        ],
        Some(("GAMMA", CandidateAction::Elected, 7, 349.0)),
    );
    assert_round(
        &reports[1],
        2,
        &[
            ("ALPHA", 1696.9290780141844),
            ("BETA", 1438.8085106382978),
            ("DELTA", 1753.8581560283687),
            ("EPSILON", 499.40425531914894),
            ("ZETA", 940.0),
        ],
        Some(("DELTA", CandidateAction::Elected, 4, 341.85815602836874)),
    );
    assert_round(
        &reports[2],
        3,
        &[
            ("ALPHA", 1696.9290780141844),
            ("BETA", 1609.7375886524821),
            ("EPSILON", 670.3333333333334),
            ("ZETA", 940.0),
        ],
        Some(("ALPHA", CandidateAction::Elected, 4, 284.92907801418437)),
    );
    assert_round(
        &reports[3],
        4,
        &[
            ("BETA", 1756.9815701009052),
            ("EPSILON", 737.4967950727291),
            ("ZETA", 1010.5216348263655),
        ],
        Some(("BETA", CandidateAction::Elected, 4, 344.9815701009052)),
    );
    assert_round(
        &reports[4],
        5,
        &[("EPSILON", 737.4967950727291), ("ZETA", 1096.9151937728493)],
        Some(("ZETA", CandidateAction::Elected, 3, 37.91519377284931)),
    );
    assert_round(
        &reports[5],
        6,
        &[("EPSILON", 737.4967950727291)],
        Some(("EPSILON", CandidateAction::Elected, 2, 31.496795072729128)),
    );
    assert_round(&reports[6], 7, &[], None);
}

#[test]
fn quota_never_changes_during_tally() {
    let mut tallier = Tallier::new(primary(), ElectionConfig::new(3, ElectionType::MultiSeat))
        .unwrap();
    let quota = tallier.quota();
    while tallier.step().is_some() {
        assert_eq!(tallier.quota(), quota);
    }
}

#[test]
fn weight_bookkeeping_holds_every_round() {
    let mut tallier = Tallier::new(primary(), ElectionConfig::new(3, ElectionType::MultiSeat))
        .unwrap();
    let quota = tallier.quota() as f64;

    loop {
        let before: f64 = tallier
            .ballots()
            .iter()
            .filter(|b| !b.is_exhausted())
            .map(|b| b.current_weight())
            .sum();
        let outcome = match tallier.step() {
            Some(report) => report.outcome.clone(),
            None => break,
        };
        // ballots emptied this round are only dropped at the start of the next
        let after: f64 = tallier.ballots().iter().map(|b| b.current_weight()).sum();
        match outcome.map(|o| (o.action, o.seats)) {
            Some((CandidateAction::Eliminated, _)) => {
                assert!((before - after).abs() < 1e-6, "elimination lost weight")
            }
            Some((CandidateAction::Elected, seats)) => assert!(
                (before - after - f64::from(seats) * quota).abs() < 1e-6,
                "election removed the wrong amount of weight"
            ),
            _ => {}
        }
    }
}

#[test]
fn terminates_within_candidate_count() {
    for config in [
        ElectionConfig::default(),
        ElectionConfig::new(3, ElectionType::MultiSeat),
        ElectionConfig::new(24, ElectionType::DemocraticPrimary),
    ] {
        let mut tallier = Tallier::new(primary(), config).unwrap();
        let reports = tallier.tally();
        // six candidates, plus the closing report
        assert!(reports.len() <= 7);
        assert!(reports.last().unwrap().outcome.is_none());
        assert!(reports[..reports.len() - 1]
            .iter()
            .all(|r| r.outcome.is_some()));
    }
}

#[test]
fn report_serializes_like_the_vote_record_consumers_expect() {
    let mut tallier = Tallier::new(three_way(), ElectionConfig::default()).unwrap();
    let json = serde_json::to_value(tallier.tally()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {
                "round": 1,
                "results": {"ALPHA": 82.0, "BETA": 44.0, "GAMMA": 94.0},
                "outcome": {
                    "candidate": "BETA",
                    "action": "ELIMINATED - FEWEST VOTES",
                    "round": 1,
                    "seats": 0,
                    "votesTransferred": 44.0
                }
            },
            {
                "round": 2,
                "results": {"ALPHA": 126.0, "GAMMA": 94.0},
                "outcome": {
                    "candidate": "ALPHA",
                    "action": "ELECTED - MET QUOTA",
                    "round": 2,
                    "seats": 1,
                    "votesTransferred": 15.0
                }
            },
            {"round": 3, "results": {"GAMMA": 109.0}}
        ])
    );
}
