/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher;
use crate::elevator::Fleet;
use crate::shared::Call;

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("call target of {target} already reached")]
    CapacityExceeded { target: usize },

    #[error("invalid call {origin} -> {destination} in a building with {n_floors} floors")]
    InvalidCall {
        origin: u8,
        destination: u8,
        n_floors: u8,
    },
}

/***************************************/
/*       Private data structures       */
/***************************************/
struct CallTable {
    // Append-only, index == call id == creation order
    calls: Vec<Call>,
    serviced: usize,
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * # Call Registry
 * The single store of issued calls, shared by every floor producer and elevator consumer.
 *
 * Three separate mechanisms are used:
 * - `calls`:           One mutex guarding the call list and the serviced counter. Appends,
 *                      claim scans and serviced marks all happen inside it.
 * - `work_tx/rx`:      A counting signal. Each successful append sends exactly one token, so
 *                      exactly one waiting consumer is released per call.
 * - `shutdown_tx/rx`:  A broadcast. `close` drops the only sender and every receiver observes
 *                      the disconnect, however many consumers are waiting.
 *
 * Lock order is registry then fleet. The fleet is never held while taking the registry lock.
 */
pub struct CallRegistry {
    n_floors: u8,
    target: usize,
    fleet: Arc<Fleet>,
    calls: Mutex<CallTable>,
    work_tx: cbc::Sender<()>,
    work_rx: cbc::Receiver<()>,
    shutdown_tx: Mutex<Option<cbc::Sender<()>>>,
    shutdown_rx: cbc::Receiver<()>,
}

impl CallRegistry {
    pub fn new(n_floors: u8, target: usize, fleet: Arc<Fleet>) -> CallRegistry {
        let (work_tx, work_rx) = cbc::unbounded::<()>();
        let (shutdown_tx, shutdown_rx) = cbc::bounded::<()>(0);

        CallRegistry {
            n_floors,
            target,
            fleet,
            calls: Mutex::new(CallTable {
                calls: Vec::with_capacity(target),
                serviced: 0,
            }),
            work_tx,
            work_rx,
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
            shutdown_rx,
        }
    }

    /// Stores a new call and releases one waiting consumer.
    ///
    /// The capacity check and the append happen in one critical section, so no more than
    /// `target` calls are ever generated regardless of how many producers race here.
    pub fn append_call(&self, origin: u8, destination: u8) -> Result<Call, RegistryError> {
        if origin >= self.n_floors || destination >= self.n_floors || origin == destination {
            return Err(RegistryError::InvalidCall {
                origin,
                destination,
                n_floors: self.n_floors,
            });
        }

        let call = {
            let mut table = self.lock();
            if table.calls.len() >= self.target {
                return Err(RegistryError::CapacityExceeded {
                    target: self.target,
                });
            }
            let call = Call::new(table.calls.len(), origin, destination);
            table.calls.push(call.clone());
            call
        };

        // The registry owns a receiver, so the channel is never disconnected
        let _ = self.work_tx.send(());
        Ok(call)
    }

    /// Claims the first unclaimed call (in creation order) that the dispatcher assigns to
    /// `elevator`, and marks that elevator busy before the registry lock is released.
    ///
    /// Returns `None` if no pending call resolves to `elevator`, including when there are no
    /// pending calls at all.
    pub fn claim_next(&self, elevator: usize) -> Option<Call> {
        let mut table = self.lock();
        let snapshot = self.fleet.snapshot();

        let call = table
            .calls
            .iter_mut()
            .filter(|call| !call.claimed)
            .find(|call| dispatcher::select_elevator(call.origin, &snapshot) == Some(elevator))?;

        call.claimed = true;
        call.assigned_to = Some(elevator);
        self.fleet.begin_call(elevator);

        Some(call.clone())
    }

    /// Records a finished call. Returns false if the call is unknown or was already serviced,
    /// in which case the counter is left untouched.
    pub fn mark_serviced(&self, call_id: usize) -> bool {
        let mut table = self.lock();
        let table = &mut *table;

        match table.calls.get_mut(call_id) {
            Some(call) if call.claimed && !call.serviced => {
                call.serviced = true;
                table.serviced += 1;
                true
            }
            Some(_) => {
                log::warn!("Call {} was not claimed or is already serviced", call_id);
                false
            }
            None => {
                log::warn!("Call {} does not exist", call_id);
                false
            }
        }
    }

    pub fn generated_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn serviced_count(&self) -> usize {
        self.lock().serviced
    }

    pub fn unclaimed_count(&self) -> usize {
        self.lock().calls.iter().filter(|call| !call.claimed).count()
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn n_floors(&self) -> u8 {
        self.n_floors
    }

    pub fn is_complete(&self) -> bool {
        self.lock().serviced >= self.target
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Receivers for the work-available signal and the shutdown broadcast.
    pub fn subscribe(&self) -> (cbc::Receiver<()>, cbc::Receiver<()>) {
        (self.work_rx.clone(), self.shutdown_rx.clone())
    }

    /// Puts a token back after a claim attempt that resolved to another elevator, so the
    /// consumer the dispatcher picked gets a chance to wake up.
    pub fn repost_work(&self) {
        let _ = self.work_tx.send(());
    }

    /// Wakes every consumer waiting on the shutdown receiver. Safe to call any number of times.
    pub fn close(&self) {
        let sender = self
            .shutdown_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if sender.is_some() {
            log::debug!("Call registry closed after {} calls", self.generated_count());
        }
    }

    fn lock(&self) -> MutexGuard<'_, CallTable> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
