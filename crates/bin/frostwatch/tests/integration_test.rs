//! End-to-end tests for the watcher stack.
//!
//! Each test wires the real reqwest adapter and the real pollers against a
//! `mockito` server standing in for the monitoring API.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use frostwatch_adapter_http_reqwest::ReqwestMonitorApi;
use frostwatch_app::polling::{FirstTick, schedule};
use frostwatch_app::ports::{CardRegistry, CardView, DetailView, Sleeper};
use frostwatch_app::services::dashboard_poller::DashboardPoller;
use frostwatch_app::services::detail_poller::DetailPoller;
use frostwatch_domain::detail::{Badge, HistoryRow};
use frostwatch_domain::snapshot::{CardPaint, CardState};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test views
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Cards {
    known: Vec<&'static str>,
    painted: RefCell<Vec<(String, CardPaint)>>,
}

struct Card {
    name: String,
    cards: Rc<Cards>,
}

impl CardView for Card {
    fn paint(&self, paint: &CardPaint) {
        self.cards
            .painted
            .borrow_mut()
            .push((self.name.clone(), paint.clone()));
    }
}

struct Registry(Rc<Cards>);

impl CardRegistry for Registry {
    type Card = Card;

    fn resolve(&self, device_name: &str) -> Option<Card> {
        self.0.known.contains(&device_name).then(|| Card {
            name: device_name.to_string(),
            cards: self.0.clone(),
        })
    }
}

#[derive(Default)]
struct Detail {
    badges: RefCell<Vec<[Badge; 4]>>,
    rows: RefCell<Vec<HistoryRow>>,
}

struct DetailHandle(Rc<Detail>);

impl DetailView for DetailHandle {
    fn render_op_status(&self, badges: &[Badge; 4]) {
        self.0.badges.borrow_mut().push(*badges);
    }

    fn prepend_history_row(&self, row: &HistoryRow) {
        self.0.rows.borrow_mut().insert(0, row.clone());
    }
}

struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

fn latest_body() -> String {
    json!([
        {"device_name": "A", "temperature": -18.44, "set_temp": -20.0, "status": "정상", "is_alarm": false},
        {"device_name": "B", "temperature": -2.0, "set_temp": -20.0, "status": "정상", "is_alarm": true},
        {"device_name": "ghost", "temperature": 4.0, "set_temp": 3.0, "status": "정상", "is_alarm": false},
        {"device_name": "C", "temperature": null, "set_temp": null, "status": "통신 두절", "is_alarm": false}
    ])
    .to_string()
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_paint_known_cards_and_skip_missing_ones() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/latest_data")
        .with_status(200)
        .with_body(latest_body())
        .create_async()
        .await;
    let cards = Rc::new(Cards {
        known: vec!["A", "B", "C"],
        ..Cards::default()
    });
    let poller = DashboardPoller::new(
        ReqwestMonitorApi::from_base_url(&server.url()).unwrap(),
        Registry(cards.clone()),
    );

    let report = poller.poll_once().await.unwrap();

    mock.assert();
    assert_eq!(report.updated, vec!["A", "B", "C"]);
    assert_eq!(report.skipped, vec!["ghost"]);
    let painted = cards.painted.borrow();
    assert_eq!(painted[0].1.temperature, "-18.4");
    assert_eq!(painted[0].1.state, CardState::Normal);
    assert_eq!(painted[1].1.state, CardState::Alarm);
    assert_eq!(painted[2].1.state, CardState::Offline);
    assert_eq!(painted[2].1.set_temp, "--°C");
}

#[tokio::test]
async fn should_skip_poll_when_server_fails() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/latest_data")
        .with_status(500)
        .create_async()
        .await;
    let cards = Rc::new(Cards {
        known: vec!["A"],
        ..Cards::default()
    });
    let poller = DashboardPoller::new(
        ReqwestMonitorApi::from_base_url(&server.url()).unwrap(),
        Registry(cards.clone()),
    );

    let err = poller.poll_once().await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 500");
    assert!(cards.painted.borrow().is_empty());
}

#[tokio::test]
async fn should_poll_repeatedly_until_cancelled() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/latest_data")
        .with_status(200)
        .with_body(latest_body())
        .expect_at_least(2)
        .create_async()
        .await;
    let cards = Rc::new(Cards {
        known: vec!["A"],
        ..Cards::default()
    });
    let (run, guard) = schedule(
        TokioSleeper,
        Duration::from_millis(10),
        FirstTick::Immediate,
        DashboardPoller::new(
            ReqwestMonitorApi::from_base_url(&server.url()).unwrap(),
            Registry(cards.clone()),
        ),
    );

    let stop = async {
        while cards.painted.borrow().len() < 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        guard.cancel();
    };
    tokio::time::timeout(Duration::from_secs(5), async {
        futures::join!(run, stop);
    })
    .await
    .unwrap();

    mock.assert();
    assert!(guard.is_cancelled());
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_render_badges_and_prepend_rows_for_escaped_device() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/device_data/Walk-in%20A")
        .with_status(200)
        .with_body(
            json!({
                "timestamp": "2024-05-01 12:00:10",
                "temperature": -18.26,
                "op_status": {"run": true, "comp": true, "defrost": false, "fan": true}
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;
    let detail = Rc::new(Detail::default());
    let poller = DetailPoller::new(
        ReqwestMonitorApi::from_base_url(&server.url()).unwrap(),
        DetailHandle(detail.clone()),
        "Walk-in A",
    );

    poller.poll_once().await.unwrap();
    poller.poll_once().await.unwrap();

    mock.assert();
    let rows = detail.rows.borrow();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].timestamp, "2024-05-01 12:00:10");
    assert_eq!(rows[0].temperature, "-18.3");
    let badges = detail.badges.borrow();
    assert_eq!(
        badges[0].iter().map(|b| b.active).collect::<Vec<_>>(),
        vec![true, true, false, true]
    );
}
