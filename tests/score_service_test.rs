//! Score service end to end: tiny_http server on an ephemeral port, tokio client.

use std::thread;
use std::time::Duration;

use tetris_duel::core::{Match, MatchConfig, ScoreSink};
use tetris_duel::scores::{ScoreClient, ScoreConfig, ScoreError, ScoreReporter, ScoreServer, ScoreStore};

/// Start a server over an in-memory store; returns its `host:port`.
fn spawn_server() -> String {
    let mut server = ScoreServer::with_store("127.0.0.1:0", ScoreStore::in_memory()).unwrap();
    let addr = server.local_addr().unwrap().to_string();
    thread::spawn(move || server.run());
    addr
}

fn client(addr: &str) -> ScoreClient {
    ScoreClient::new(addr, Duration::from_secs(2))
}

#[tokio::test]
async fn submit_then_fetch_leaderboard() {
    let addr = spawn_server();
    let client = client(&addr);

    assert!(client.leaderboard().await.unwrap().is_empty());

    let first = client.submit("ann", 90).await.unwrap();
    let second = client.submit("bob", 160).await.unwrap();
    assert!(second > first);
    client.submit("cy", 90).await.unwrap();

    let board = client.leaderboard().await.unwrap();
    let names: Vec<_> = board.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["bob", "ann", "cy"]);
}

#[tokio::test]
async fn zero_score_is_rejected_with_400() {
    let addr = spawn_server();
    match client(&addr).submit("ann", 0).await {
        Err(ScoreError::Http { status, .. }) => assert_eq!(status, 400),
        other => panic!("expected 400, got {other:?}"),
    }
    assert!(client(&addr).leaderboard().await.unwrap().is_empty());
}

#[test]
fn leaderboard_is_capped_at_ten() {
    let addr = spawn_server();
    let client = client(&addr);

    tokio_test::block_on(async {
        for score in 1..=12 {
            client.submit("p", score * 10).await.unwrap();
        }
        let board = client.leaderboard().await.unwrap();
        assert_eq!(board.len(), 10);
        assert_eq!(board[0].score, 120);
        assert_eq!(board[9].score, 30);
    });
}

#[test]
fn reporter_submits_in_the_background() {
    let addr = spawn_server();
    let port = addr.rsplit(':').next().unwrap().parse().unwrap();
    let config = ScoreConfig {
        port,
        ..ScoreConfig::default()
    };

    let mut reporter = ScoreReporter::new(&config).unwrap().unwrap();
    reporter.submit("ann", 40);
    reporter.flush(Duration::from_secs(2));

    let board = reporter.leaderboard().unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!((board[0].name.as_str(), board[0].score), ("ann", 40));
}

#[test]
fn reporter_plugs_into_a_match() {
    let addr = spawn_server();
    let port = addr.rsplit(':').next().unwrap().parse().unwrap();
    let config = ScoreConfig {
        port,
        ..ScoreConfig::default()
    };
    let reporter = ScoreReporter::new(&config).unwrap().unwrap();

    // A match without clears never reports anything.
    let mut game = Match::solo(MatchConfig::solo().with_seed(9)).with_score_sink(reporter.clone());
    game.start();
    while !game.is_over() {
        game.apply_action(
            tetris_duel::types::PlayerSlot::One,
            tetris_duel::types::GameAction::Drop,
        );
    }
    reporter.flush(Duration::from_secs(2));
    assert!(reporter.leaderboard().unwrap().is_empty());
}

#[test]
fn unreachable_service_is_an_error_not_a_panic() {
    let config = ScoreConfig {
        port: 9,
        timeout_ms: 300,
        ..ScoreConfig::default()
    };
    let reporter = ScoreReporter::new(&config).unwrap().unwrap();
    assert!(reporter.leaderboard().is_err());
}
