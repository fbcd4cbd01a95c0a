//! Command dispatch against the single `MapState` owner.
//!
//! A submitted command is serialized from a snapshot taken at submit time.
//! The network round trip runs off the event loop; its `Completion` is fed
//! back through `Session::complete`, which is the only place responses
//! touch state. Overlapping commands are not cancelled.

use foundation::PolygonId;
use protocol::{ProcessResponse, Skip, build_input, reconcile};
use scene::{MapState, Marker};
use tracing::{debug, error, info};

use crate::config::ResponseOrdering;
use crate::error::ClientError;
use crate::service::ProcessService;

/// A command ready to send, with the markers its response is matched against.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub seq: u64,
    pub input: String,
    markers: Vec<Marker>,
}

#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    markers: Vec<Marker>,
    outcome: Result<ProcessResponse, ClientError>,
}

impl Dispatch {
    pub async fn run(self, service: &dyn ProcessService) -> Completion {
        let outcome = service.process(self.input).await;
        Completion {
            seq: self.seq,
            markers: self.markers,
            outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Reconciled {
        highlighted: usize,
        polygons: Vec<PolygonId>,
    },
    Failed,
    /// Dropped under `ResponseOrdering::LatestOnly`.
    Stale,
}

#[derive(Debug)]
pub struct Session {
    state: MapState,
    ordering: ResponseOrdering,
    next_seq: u64,
    in_flight: usize,
}

impl Session {
    pub fn new(state: MapState, ordering: ResponseOrdering) -> Self {
        Self {
            state,
            ordering,
            next_seq: 0,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MapState {
        &mut self.state
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Prepares `command` for sending.
    ///
    /// Blank commands and commands without a selection return `None` and are
    /// not counted as dispatched.
    pub fn submit(&mut self, command: &str) -> Option<Dispatch> {
        let snapshot = self.state.snapshot();
        let input = match build_input(command, &snapshot) {
            Ok(input) => input,
            Err(Skip::EmptyCommand) => return None,
            Err(Skip::NoSelection) => {
                debug!("command ignored: nothing selected");
                return None;
            }
        };

        self.next_seq += 1;
        self.in_flight += 1;
        debug!(seq = self.next_seq, bytes = input.len(), "command dispatched");
        Some(Dispatch {
            seq: self.next_seq,
            input,
            markers: snapshot.markers,
        })
    }

    /// Applies a finished command. Failures clear highlights and are logged;
    /// they never propagate.
    pub fn complete(&mut self, done: Completion) -> Applied {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.ordering == ResponseOrdering::LatestOnly && done.seq < self.next_seq {
            debug!(seq = done.seq, latest = self.next_seq, "stale response dropped");
            return Applied::Stale;
        }

        match done.outcome {
            Ok(response) => {
                let rec = reconcile(&response, &done.markers);
                let highlighted = rec.highlighted.len();
                let polygons = rec.apply(&mut self.state);
                info!(
                    seq = done.seq,
                    highlighted,
                    polygons = polygons.len(),
                    "response applied"
                );
                Applied::Reconciled {
                    highlighted,
                    polygons,
                }
            }
            Err(err) => {
                error!(seq = done.seq, "command failed: {err}");
                self.state.clear_highlights();
                Applied::Failed
            }
        }
    }
}
