/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::SimulationConfig;
use crate::elevator::Fleet;
use crate::registry::CallRegistry;
use crate::shared::{Call, ElevatorReport, ElevatorState, ProgressEvent};

/**
 * Executes calls for one elevator.
 *
 * The `ElevatorConsumer` waits for the registry's work signal, claims a call through the
 * dispatcher and drives its elevator `Idle -> MovingToOrigin -> MovingToDestination -> Idle`
 * until every call is serviced or the registry is closed, then ends in `Stopped`.
 *
 * # Fields
 * - `id`:              Id of the elevator this consumer owns. It is the only writer of that
 *                      elevator's fleet cell.
 * - `registry`:        Shared call registry.
 * - `fleet`:           Shared elevator states.
 * - `event_tx`:        Sender for progress events.
 * - `work_rx`:         Receives one token per available call.
 * - `shutdown_rx`:     Disconnects once no more calls will be generated.
 * - `time_unit`:       Travel time for one floor.
 * - `claim_backoff`:   Pause after a claim attempt that resolved to another elevator.
 *
 */

enum Event {
    WorkAvailable,
    Shutdown,
}

pub struct ElevatorConsumer {
    id: usize,
    registry: Arc<CallRegistry>,
    fleet: Arc<Fleet>,
    event_tx: cbc::Sender<ProgressEvent>,
    work_rx: cbc::Receiver<()>,
    shutdown_rx: cbc::Receiver<()>,
    time_unit: Duration,
    claim_backoff: Duration,
}

impl ElevatorConsumer {
    pub fn new(
        id: usize,
        config: &SimulationConfig,
        registry: Arc<CallRegistry>,
        fleet: Arc<Fleet>,
        event_tx: cbc::Sender<ProgressEvent>,
    ) -> ElevatorConsumer {
        let (work_rx, shutdown_rx) = registry.subscribe();

        ElevatorConsumer {
            id,
            registry,
            fleet,
            event_tx,
            work_rx,
            shutdown_rx,
            time_unit: config.time_unit(),
            claim_backoff: config.claim_backoff(),
        }
    }

    pub fn run(self) -> ElevatorReport {
        // Main loop
        loop {
            if self.registry.is_complete() {
                break;
            }

            match self.wait_for_event() {
                Event::WorkAvailable => self.handle_work(),
                Event::Shutdown => {
                    self.drain();
                    break;
                }
            }
        }

        self.stop()
    }

    fn wait_for_event(&self) -> Event {
        cbc::select! {
            recv(self.work_rx) -> token => {
                match token {
                    Ok(()) => Event::WorkAvailable,
                    Err(_) => Event::Shutdown,
                }
            }
            // Nothing is ever sent here, a disconnect is the broadcast
            recv(self.shutdown_rx) -> _ => Event::Shutdown,
        }
    }

    fn handle_work(&self) {
        match self.registry.claim_next(self.id) {
            Some(call) => self.execute(call),
            None => {
                // The dispatcher picked a peer, hand the token on
                self.registry.repost_work();
                sleep(self.claim_backoff);
            }
        }
    }

    // No more calls will be generated. Serve what is left, then stop.
    fn drain(&self) {
        loop {
            match self.registry.claim_next(self.id) {
                Some(call) => self.execute(call),
                None if self.registry.unclaimed_count() == 0 => return,
                None => sleep(self.claim_backoff),
            }
        }
    }

    // Runs unconditionally once a claim succeeded: the elevator always ends up Idle and the
    // call always counts as serviced.
    fn execute(&self, call: Call) {
        let start = self.fleet.state(self.id).map_or(call.origin, |state| state.floor);
        let _ = self.event_tx.send(ProgressEvent::CallClaimed {
            elevator: self.id,
            call: call.id,
            origin: call.origin,
            destination: call.destination,
        });

        self.travel(start, call.origin);
        self.fleet.arrive_at_origin(self.id, call.origin);
        let _ = self.event_tx.send(ProgressEvent::ArrivedAtOrigin {
            elevator: self.id,
            call: call.id,
            floor: call.origin,
        });

        self.travel(call.origin, call.destination);
        let served = self
            .fleet
            .arrive_at_destination(self.id, call.destination)
            .unwrap_or_default();
        let _ = self.event_tx.send(ProgressEvent::ArrivedAtDestination {
            elevator: self.id,
            call: call.id,
            floor: call.destination,
        });

        self.registry.mark_serviced(call.id);
        log::debug!("Elevator {} finished call {}, {} served so far", self.id, call.id, served);
    }

    fn travel(&self, from: u8, to: u8) {
        sleep(self.time_unit * from.abs_diff(to) as u32);
    }

    fn stop(&self) -> ElevatorReport {
        let state = self
            .fleet
            .stop(self.id)
            .unwrap_or_else(|| ElevatorState::new(self.id));
        let _ = self.event_tx.send(ProgressEvent::ElevatorStopped {
            elevator: self.id,
            floor: state.floor,
            calls_served: state.calls_served,
        });
        ElevatorReport::from(&state)
    }
}
