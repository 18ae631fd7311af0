/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "movingToOrigin")]
    MovingToOrigin,
    #[serde(rename = "movingToDestination")]
    MovingToDestination,
    #[serde(rename = "stopped")]
    Stopped,
}

/**
 * A passenger request from `origin` to `destination`.
 *
 * The `id` is the call's position in the registry, so ordering by id is creation order.
 * `claimed` goes from false to true exactly once and is never reset.
 */
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub id: usize,
    pub origin: u8,
    pub destination: u8,
    pub claimed: bool,
    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<usize>,
    pub serviced: bool,
}

impl Call {
    pub fn new(id: usize, origin: u8, destination: u8) -> Call {
        Call {
            id,
            origin,
            destination,
            claimed: false,
            assigned_to: None,
            serviced: false,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ElevatorState {
    pub id: usize,
    pub floor: u8,
    pub behaviour: Behaviour,
    #[serde(rename = "callsServed")]
    pub calls_served: usize,
}

impl ElevatorState {
    pub fn new(id: usize) -> ElevatorState {
        ElevatorState {
            id,
            floor: 0,
            behaviour: Behaviour::Idle,
            calls_served: 0,
        }
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            id: self.id,
            floor: self.floor,
            busy: self.behaviour != Behaviour::Idle,
        }
    }
}

// Advisory copy handed to the dispatcher. Stopped elevators report busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorSnapshot {
    pub id: usize,
    pub floor: u8,
    pub busy: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    CallCreated {
        call: usize,
        origin: u8,
        destination: u8,
    },
    CallClaimed {
        elevator: usize,
        call: usize,
        origin: u8,
        destination: u8,
    },
    ArrivedAtOrigin {
        elevator: usize,
        call: usize,
        floor: u8,
    },
    ArrivedAtDestination {
        elevator: usize,
        call: usize,
        floor: u8,
    },
    ElevatorStopped {
        elevator: usize,
        floor: u8,
        calls_served: usize,
    },
    SimulationComplete {
        generated: usize,
        serviced: usize,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ElevatorReport {
    pub id: usize,
    #[serde(rename = "finalFloor")]
    pub final_floor: u8,
    #[serde(rename = "callsServed")]
    pub calls_served: usize,
}

impl From<&ElevatorState> for ElevatorReport {
    fn from(state: &ElevatorState) -> Self {
        ElevatorReport {
            id: state.id,
            final_floor: state.floor,
            calls_served: state.calls_served,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SimulationSummary {
    #[serde(rename = "nFloors")]
    pub n_floors: u8,
    #[serde(rename = "nElevators")]
    pub n_elevators: usize,
    pub generated: usize,
    pub serviced: usize,
    pub elevators: Vec<ElevatorReport>,
}
