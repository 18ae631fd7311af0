/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use rand::Rng;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::SimulationConfig;
use crate::registry::{CallRegistry, RegistryError};
use crate::shared::ProgressEvent;

/**
 * # Floor Producer
 * Generates calls originating at one floor until the registry reaches its call target.
 *
 * # Fields
 * - `floor`:           The floor this producer represents. Every call it makes starts here.
 * - `registry`:        Shared call registry the calls are appended to.
 * - `event_tx`:        Sender for progress events.
 * - `think_time`:      Inclusive range of time units to wait between two calls.
 * - `time_unit`:       Wall-clock length of one time unit.
 *
 * The think time is spent without holding any lock. A `CapacityExceeded` from the registry
 * means another producer filled the target first; the producer stops and never retries.
 */
pub struct FloorProducer {
    floor: u8,
    registry: Arc<CallRegistry>,
    event_tx: cbc::Sender<ProgressEvent>,
    think_time: (u64, u64),
    time_unit: Duration,
}

impl FloorProducer {
    pub fn new(
        floor: u8,
        config: &SimulationConfig,
        registry: Arc<CallRegistry>,
        event_tx: cbc::Sender<ProgressEvent>,
    ) -> FloorProducer {
        FloorProducer {
            floor,
            registry,
            event_tx,
            think_time: (config.think_time_min, config.think_time_max),
            time_unit: config.time_unit(),
        }
    }

    /// Runs until the call target is reached. Returns the number of calls this floor created.
    pub fn run(self) -> usize {
        let mut rng = rand::rng();
        let mut created = 0;

        while self.registry.generated_count() < self.registry.target() {
            let destination = random_destination(self.floor, self.registry.n_floors(), &mut rng);

            match self.registry.append_call(self.floor, destination) {
                Ok(call) => {
                    created += 1;
                    let _ = self.event_tx.send(ProgressEvent::CallCreated {
                        call: call.id,
                        origin: call.origin,
                        destination: call.destination,
                    });
                }
                Err(RegistryError::CapacityExceeded { target }) => {
                    log::debug!("Floor {} stopping, target of {} calls reached", self.floor, target);
                    break;
                }
                Err(e) => {
                    log::error!("Floor {} produced an invalid call: {}", self.floor, e);
                    break;
                }
            }

            let units = rng.random_range(self.think_time.0..=self.think_time.1);
            sleep(self.time_unit * units as u32);
        }

        created
    }
}

/// Uniformly random floor in `0..n_floors`, never equal to `origin`.
pub fn random_destination<R: Rng + ?Sized>(origin: u8, n_floors: u8, rng: &mut R) -> u8 {
    // Draw from the n_floors - 1 other floors and skip over the origin
    let pick = rng.random_range(0..n_floors - 1);
    if pick >= origin {
        pick + 1
    } else {
        pick
    }
}
