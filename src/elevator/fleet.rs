/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Behaviour, ElevatorSnapshot, ElevatorState};

/**
 * # Fleet
 * State of every elevator in the building, one lock per elevator.
 *
 * Each cell has a single writer: the consumer thread owning that elevator id. Everyone else
 * (the dispatcher through `snapshot`, the consumer through `state`) only reads copies, so a
 * dispatcher decision may be made on a slightly stale position. That costs at most a
 * suboptimal assignment, never a duplicate claim, since claims are decided under the
 * registry lock.
 *
 * An unknown id is logged and leaves every cell untouched.
 */
pub struct Fleet {
    elevators: Vec<RwLock<ElevatorState>>,
}

impl Fleet {
    pub fn new(n_elevators: usize) -> Fleet {
        Fleet {
            elevators: (0..n_elevators)
                .map(|id| RwLock::new(ElevatorState::new(id)))
                .collect(),
        }
    }

    pub fn state(&self, id: usize) -> Option<ElevatorState> {
        self.read(id).map(|state| state.clone())
    }

    pub fn snapshot(&self) -> Vec<ElevatorSnapshot> {
        self.elevators
            .iter()
            .map(|cell| cell.read().unwrap_or_else(PoisonError::into_inner).snapshot())
            .collect()
    }

    // Idle -> MovingToOrigin
    pub fn begin_call(&self, id: usize) {
        if let Some(mut state) = self.write(id) {
            state.behaviour = Behaviour::MovingToOrigin;
        }
    }

    // MovingToOrigin -> MovingToDestination
    pub fn arrive_at_origin(&self, id: usize, floor: u8) {
        if let Some(mut state) = self.write(id) {
            state.floor = floor;
            state.behaviour = Behaviour::MovingToDestination;
        }
    }

    // MovingToDestination -> Idle
    pub fn arrive_at_destination(&self, id: usize, floor: u8) -> Option<usize> {
        let mut state = self.write(id)?;
        state.floor = floor;
        state.behaviour = Behaviour::Idle;
        state.calls_served += 1;
        Some(state.calls_served)
    }

    pub fn stop(&self, id: usize) -> Option<ElevatorState> {
        let mut state = self.write(id)?;
        state.behaviour = Behaviour::Stopped;
        Some(state.clone())
    }

    fn cell(&self, id: usize) -> Option<&RwLock<ElevatorState>> {
        let cell = self.elevators.get(id);
        if cell.is_none() {
            log::error!("Elevator {} does not exist, fleet has {}", id, self.elevators.len());
        }
        cell
    }

    fn read(&self, id: usize) -> Option<RwLockReadGuard<'_, ElevatorState>> {
        self.cell(id)
            .map(|cell| cell.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write(&self, id: usize) -> Option<RwLockWriteGuard<'_, ElevatorState>> {
        self.cell(id)
            .map(|cell| cell.write().unwrap_or_else(PoisonError::into_inner))
    }
}
