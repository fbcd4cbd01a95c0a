//! Line-oriented stand-in for the map widget and the command input.

use std::fmt::Write as _;

use foundation::{LonLat, MarkerId};
use layers::symbology::Rgba;
use layers::{MapEvent, PickedFeature, VectorLayer, VectorLayerSnapshot, apply_map_event};
use scene::SelectionMode;
use thiserror::Error;
use tracing::warn;

use crate::session::{Dispatch, Session};

pub const HELP: &str = "\
commands:
  click <lon> <lat>     place a marker (bare `click` misses the map)
  pick <marker>         toggle a marker's selection (e.g. `pick m0`)
  group [<marker>...]   group markers into a polygon (default: the selection)
  mode single|multi     switch selection mode
  show                  print markers and polygons
  ask <text>            send a command to the service
  help | quit
any other text is sent as a command";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Map(MapEvent),
    Group(Vec<MarkerId>),
    Mode(SelectionMode),
    Show,
    Help,
    Quit,
    Ask(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a number: {0:?}")]
    Number(String),

    #[error("not a marker id: {0:?}")]
    Marker(String),
}

pub enum Step {
    Continue(Option<String>),
    Send(Dispatch),
    Quit,
}

pub fn parse(line: &str) -> Result<ConsoleCommand, ConsoleError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ConsoleCommand::Ask(line.to_string()));
    };
    let rest: Vec<&str> = words.collect();

    match head {
        "click" => match rest.as_slice() {
            [] => Ok(ConsoleCommand::Map(MapEvent::Click(None))),
            [lon, lat] => Ok(ConsoleCommand::Map(MapEvent::Click(Some(LonLat::new(
                number(lon)?,
                number(lat)?,
            ))))),
            _ => Err(ConsoleError::Usage("click [<lon> <lat>]")),
        },
        "pick" => match rest.as_slice() {
            [id] => Ok(ConsoleCommand::Map(MapEvent::Pick(PickedFeature::Marker(
                marker_id(id)?,
            )))),
            _ => Err(ConsoleError::Usage("pick <marker>")),
        },
        "group" => rest
            .iter()
            .map(|id| marker_id(id))
            .collect::<Result<Vec<_>, _>>()
            .map(ConsoleCommand::Group),
        "mode" => match rest.as_slice() {
            ["single"] => Ok(ConsoleCommand::Mode(SelectionMode::Single)),
            ["multi"] => Ok(ConsoleCommand::Mode(SelectionMode::Multi)),
            _ => Err(ConsoleError::Usage("mode single|multi")),
        },
        "show" => Ok(ConsoleCommand::Show),
        "help" => Ok(ConsoleCommand::Help),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        "ask" => {
            let text = line.trim_start().strip_prefix("ask").unwrap_or_default();
            Ok(ConsoleCommand::Ask(text.trim_start().to_string()))
        }
        _ => Ok(ConsoleCommand::Ask(line.to_string())),
    }
}

pub fn execute(session: &mut Session, layer: &VectorLayer, command: ConsoleCommand) -> Step {
    match command {
        ConsoleCommand::Map(event) => {
            apply_map_event(session.state_mut(), event);
            Step::Continue(None)
        }
        ConsoleCommand::Group(ids) => {
            let state = session.state_mut();
            let created = if ids.is_empty() {
                state.on_polygon_create_from_selection()
            } else {
                state
                    .positions_of(&ids)
                    .and_then(|points| state.on_polygon_create(&points))
            };
            match created {
                Ok(id) => Step::Continue(Some(format!("created polygon {id}"))),
                Err(err) => {
                    warn!("group rejected: {err}");
                    Step::Continue(Some(format!("warning: {err}")))
                }
            }
        }
        ConsoleCommand::Mode(mode) => {
            session.state_mut().set_mode(mode);
            Step::Continue(None)
        }
        ConsoleCommand::Show => {
            let snapshot = layer.extract(session.state());
            Step::Continue(Some(render(&snapshot, session.in_flight())))
        }
        ConsoleCommand::Help => Step::Continue(Some(HELP.to_string())),
        ConsoleCommand::Quit => Step::Quit,
        ConsoleCommand::Ask(text) => match session.submit(&text) {
            Some(dispatch) => Step::Send(dispatch),
            None => Step::Continue(None),
        },
    }
}

pub fn render(snapshot: &VectorLayerSnapshot, in_flight: usize) -> String {
    let mut out = String::new();
    for p in &snapshot.points {
        let _ = writeln!(
            out,
            "{}  ({} {})  t={}  {}",
            p.marker,
            p.position.lon,
            p.position.lat,
            p.timestamp.as_millis(),
            hex(p.fill)
        );
    }
    for poly in &snapshot.polygons {
        let ring = poly
            .ring
            .iter()
            .map(|v| format!("{} {}", v.lon, v.lat))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "{}  [{}]  {}", poly.polygon, ring, hex(poly.fill));
    }
    let _ = write!(
        out,
        "{} markers, {} polygons, {} pending",
        snapshot.points.len(),
        snapshot.polygons.len(),
        in_flight
    );
    out
}

fn number(s: &str) -> Result<f64, ConsoleError> {
    s.parse().map_err(|_| ConsoleError::Number(s.to_string()))
}

fn marker_id(s: &str) -> Result<MarkerId, ConsoleError> {
    s.parse().map_err(|_| ConsoleError::Marker(s.to_string()))
}

fn hex([r, g, b, a]: Rgba) -> String {
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

#[cfg(test)]
mod tests {
    use foundation::{LonLat, ManualClock, MarkerId};
    use layers::{MapEvent, PickedFeature, VectorLayer};
    use pretty_assertions::assert_eq;
    use scene::{MapState, SelectionMode};

    use super::{ConsoleCommand, ConsoleError, Step, execute, parse};
    use crate::config::ResponseOrdering;
    use crate::session::Session;

    fn session() -> Session {
        let state = MapState::with_clock(SelectionMode::Multi, Box::new(ManualClock::new(0, 1)));
        Session::new(state, ResponseOrdering::Arrival)
    }

    fn run(s: &mut Session, line: &str) -> Option<String> {
        match execute(s, &VectorLayer::default(), parse(line).unwrap()) {
            Step::Continue(out) => out,
            Step::Send(_) => Some("sent".to_string()),
            Step::Quit => Some("quit".to_string()),
        }
    }

    #[test]
    fn parses_map_events() {
        assert_eq!(
            parse("click 10 20.5"),
            Ok(ConsoleCommand::Map(MapEvent::Click(Some(LonLat::new(10.0, 20.5)))))
        );
        assert_eq!(parse("click"), Ok(ConsoleCommand::Map(MapEvent::Click(None))));
        assert_eq!(
            parse("pick m3"),
            Ok(ConsoleCommand::Map(MapEvent::Pick(PickedFeature::Marker(
                MarkerId::new(3)
            ))))
        );
        assert_eq!(parse("click x 1"), Err(ConsoleError::Number("x".to_string())));
        assert_eq!(parse("pick"), Err(ConsoleError::Usage("pick <marker>")));
    }

    #[test]
    fn free_text_is_a_command() {
        assert_eq!(
            parse("ask  which is closest"),
            Ok(ConsoleCommand::Ask("which is closest".to_string()))
        );
        assert_eq!(
            parse("restaurants near here"),
            Ok(ConsoleCommand::Ask("restaurants near here".to_string()))
        );
        assert_eq!(parse("   "), Ok(ConsoleCommand::Ask("   ".to_string())));
    }

    #[test]
    fn group_rejects_two_points_with_warning() {
        let mut s = session();
        run(&mut s, "click 0 0");
        run(&mut s, "click 0 1");
        run(&mut s, "pick m0");
        run(&mut s, "pick m1");

        let out = run(&mut s, "group").unwrap();
        assert!(out.starts_with("warning:"), "{out}");
        assert_eq!(s.state().selection().len(), 2);

        run(&mut s, "click 1 1");
        let out = run(&mut s, "group m0 m1 m2").unwrap();
        assert_eq!(out, "created polygon p0");
        assert!(s.state().selection().is_empty());
    }

    #[test]
    fn ask_without_selection_is_silent() {
        let mut s = session();
        run(&mut s, "click 0 0");
        assert_eq!(run(&mut s, "what is this"), None);
        run(&mut s, "pick m0");
        assert_eq!(run(&mut s, "what is this"), Some("sent".to_string()));
    }

    #[test]
    fn show_lists_colored_points() {
        let mut s = session();
        run(&mut s, "click 1 2");
        run(&mut s, "click 3 4");
        run(&mut s, "pick m1");
        let out = run(&mut s, "show").unwrap();
        assert_eq!(
            out,
            "m0  (1 2)  t=0  #ff0000ff\n\
             m1  (3 4)  t=1  #0000ffff\n\
             2 markers, 0 polygons, 0 pending"
        );
    }
}
