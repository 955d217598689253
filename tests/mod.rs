use calfeed::Tz;
use chrono::{DateTime, TimeZone, Utc};

pub fn berlin() -> Tz {
    Tz::from(chrono_tz::Europe::Berlin)
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Fold `line` into physical lines of at most `width` characters.
pub fn fold(line: &str, width: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\r\n ")
}

pub mod line {
    use crate::fold;
    use calfeed::{LineReader, parser::unfold};
    use itertools::Itertools;
    use rstest::rstest;

    const LOGICAL: &[&str] = &[
        "BEGIN:VEVENT",
        "SUMMARY:Quarterly planning with the whole product and engineering organisation",
        "DESCRIPTION:Agenda: roadmap\\, hiring\\, budget. Bring laptops.",
        "LOCATION:Zürich, Büro 3",
        "X-EMPTY:",
        "END:VEVENT",
    ];

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(7)]
    #[case(40)]
    #[case(75)]
    #[case(500)]
    fn folding_round_trip(#[case] width: usize) {
        let folded = LOGICAL.iter().map(|line| fold(line, width)).join("\r\n");
        let unfolded = unfold(&folded)
            .into_iter()
            .map(|line| line.into_inner())
            .collect_vec();
        similar_asserts::assert_eq!(unfolded, LOGICAL.to_vec());
    }

    #[test]
    fn tab_continuation() {
        let lines = LineReader::from_str("SUMMARY:Long\n\t title\nEND:VEVENT")
            .map(|line| line.to_string())
            .collect_vec();
        assert_eq!(lines, vec!["1: SUMMARY:Long title", "3: END:VEVENT"]);
    }

    #[test]
    fn team_calendar() {
        let input = include_str!("./resources/team.ics");
        let lines = LineReader::from_str(input).map(|line| line.into_inner()).collect_vec();
        assert!(lines.contains(
            &"SUMMARY:Quarterly planning with the whole product and engineering organisation"
                .to_owned()
        ));
        assert!(lines.iter().all(|line| !line.contains('\r')));
    }
}

pub mod property {
    use calfeed::{ContentLine, LineReader};

    #[test]
    fn team_calendar_properties() {
        let input = include_str!("./resources/team.ics");
        let names: Vec<String> = LineReader::from_str(input)
            .filter_map(|line| ContentLine::parse(line.as_str()))
            .filter(|prop| prop.name.starts_with("DT"))
            .map(|prop| format!("{}={}", prop.name, prop.value))
            .collect();
        insta::assert_snapshot!(names.join("\n"), @r"
        DTSTART=19701025T030000
        DTSTAMP=20240101T000000Z
        DTSTART=20240117T130000Z
        DTEND=20240117T160000Z
        DTSTART=20240116T091500
        DTEND=20240116T093000
        DTSTART=20240118
        DTEND=20240120
        DTEND=20240119T100000Z
        ");
    }
}

pub mod parser {
    use crate::{berlin, utc};
    use calfeed::{EventParser, IcalEvent, component::parse_events};

    #[test]
    fn team_calendar() {
        let input = include_str!("./resources/team.ics");
        let events = parse_events(input, &berlin());
        similar_asserts::assert_eq!(
            events,
            vec![
                IcalEvent {
                    title: "Quarterly planning with the whole product and engineering organisation"
                        .to_owned(),
                    start: utc(2024, 1, 17, 13, 0),
                    end: utc(2024, 1, 17, 16, 0),
                    location: "Main hall".to_owned(),
                },
                IcalEvent {
                    title: "Standup".to_owned(),
                    start: utc(2024, 1, 16, 8, 15),
                    end: utc(2024, 1, 16, 8, 30),
                    location: String::new(),
                },
                IcalEvent {
                    title: "Offsite".to_owned(),
                    start: utc(2024, 1, 17, 23, 0),
                    end: utc(2024, 1, 19, 23, 0),
                    location: "Lisbon".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn truncated_feed() {
        let input = include_str!("./resources/truncated.ics");
        let titles: Vec<String> = EventParser::from_str(input, berlin())
            .map(|event| event.title)
            .collect();
        assert_eq!(titles, vec!["Release"]);
    }
}

pub mod aggregate {
    use crate::{berlin, utc};
    use calfeed::{Aggregator, CalendarResponse, EventAlert, HttpFetcher, TimeWindow, MAX_EVENTS};
    use chrono::TimeDelta;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(server: &MockServer, route: &str, status: u16, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(server)
            .await;
    }

    fn aggregator(urls: Vec<String>) -> Aggregator<HttpFetcher> {
        Aggregator::new(urls, HttpFetcher::new().unwrap()).with_timezone(berlin())
    }

    #[tokio::test]
    async fn failing_feed_is_isolated() {
        let server = MockServer::start().await;
        serve(&server, "/down.ics", 500, "oops".to_owned()).await;
        serve(&server, "/team.ics", 200, include_str!("./resources/team.ics").to_owned()).await;

        let response = aggregator(vec![
            format!("{}/down.ics", server.uri()),
            format!("{}/team.ics", server.uri()),
        ])
        .aggregate(&TimeWindow::new(utc(2024, 1, 16, 0, 0), utc(2024, 1, 18, 0, 0)))
        .await;

        insta::assert_snapshot!(serde_json::to_string_pretty(&response).unwrap(), @r#"
        {
          "configured": true,
          "events": [
            {
              "title": "Standup",
              "start": "2024-01-16T08:15:00.000Z",
              "end": "2024-01-16T08:30:00.000Z",
              "location": "",
              "source": "127.0.0.1"
            },
            {
              "title": "Quarterly planning with the whole product and engineering organisation",
              "start": "2024-01-17T13:00:00.000Z",
              "end": "2024-01-17T16:00:00.000Z",
              "location": "Main hall",
              "source": "127.0.0.1"
            },
            {
              "title": "Offsite",
              "start": "2024-01-17T23:00:00.000Z",
              "end": "2024-01-19T23:00:00.000Z",
              "location": "Lisbon",
              "source": "127.0.0.1"
            }
          ]
        }
        "#);
    }

    #[tokio::test]
    async fn unreachable_feeds_yield_empty_configured_response() {
        let server = MockServer::start().await;
        serve(&server, "/gone.ics", 404, String::new()).await;

        let response = aggregator(vec![
            format!("{}/gone.ics", server.uri()),
            "http://127.0.0.1:9/closed.ics".to_owned(),
        ])
        .aggregate(&TimeWindow::upcoming(utc(2024, 1, 1, 0, 0)))
        .await;
        assert_eq!(response, CalendarResponse::degraded());
    }

    #[tokio::test]
    async fn caps_merged_events() {
        let server = MockServer::start().await;
        let mut urls = vec![];
        for feed in 0..5 {
            let mut ics = String::from("BEGIN:VCALENDAR\r\n");
            for slot in 0..5 {
                // Feeds interleave: feed 0 holds hours 0, 5, 10, ...
                let start = utc(2024, 2, 1, 0, 0) + TimeDelta::hours(slot * 5 + feed);
                ics += &format!(
                    "BEGIN:VEVENT\r\nSUMMARY:{feed}-{slot}\r\nDTSTART:{}\r\nEND:VEVENT\r\n",
                    start.format("%Y%m%dT%H%M%SZ")
                );
            }
            ics += "END:VCALENDAR\r\n";
            let route = format!("/feed-{feed}.ics");
            serve(&server, &route, 200, ics).await;
            urls.push(format!("{}{route}", server.uri()));
        }

        let response = aggregator(urls)
            .aggregate(&TimeWindow::upcoming(utc(2024, 2, 1, 0, 0)))
            .await;

        assert_eq!(response.events.len(), MAX_EVENTS);
        let expected: Vec<_> = (0..20)
            .map(|hour| utc(2024, 2, 1, 0, 0) + TimeDelta::hours(hour))
            .collect();
        let starts: Vec<_> = response.events.iter().map(|e| e.start).collect();
        assert_eq!(starts, expected);
        assert_eq!(response.events[0].title, "0-0");
        assert_eq!(response.events[19].title, "4-3");
    }

    #[tokio::test]
    async fn not_configured() {
        let response = aggregator(vec![])
            .aggregate(&TimeWindow::upcoming(utc(2024, 1, 1, 0, 0)))
            .await;
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "configured": false, "events": [] })
        );
    }

    #[tokio::test]
    async fn alert_for_next_event() {
        let server = MockServer::start().await;
        serve(&server, "/team.ics", 200, include_str!("./resources/team.ics").to_owned()).await;

        let now = utc(2024, 1, 16, 8, 0);
        let response = aggregator(vec![format!("{}/team.ics", server.uri())])
            .aggregate(&TimeWindow::alert(now))
            .await;
        let alert = EventAlert::upcoming(&response, now).unwrap();
        assert_eq!(alert.message, "Standup starts in 15 min");
        assert_eq!(alert.id, "event-Standup-2024-01-16T08:15:00.000Z");
    }
}
