/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::OutputFormat;
use crate::shared::ProgressEvent;

/**
 * # Narrator
 * Renders progress events until every sender is gone.
 *
 * `Text` writes one log line per event, `Json` writes one JSON object per line to stdout.
 */
pub struct Narrator {
    format: OutputFormat,
    event_rx: cbc::Receiver<ProgressEvent>,
}

impl Narrator {
    pub fn new(format: OutputFormat, event_rx: cbc::Receiver<ProgressEvent>) -> Narrator {
        Narrator { format, event_rx }
    }

    /// Returns the number of events rendered.
    pub fn run(self) -> usize {
        let mut rendered = 0;

        for event in self.event_rx.iter() {
            match self.format {
                OutputFormat::Text => log::info!("{}", describe(&event)),
                OutputFormat::Json => match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => log::error!("Failed to serialize {:?}: {}", event, e),
                },
            }
            rendered += 1;
        }

        rendered
    }
}

pub fn describe(event: &ProgressEvent) -> String {
    match *event {
        ProgressEvent::CallCreated {
            call,
            origin,
            destination,
        } => format!("[Floor {}] New call {}: {} -> {}", origin, call, origin, destination),
        ProgressEvent::CallClaimed {
            elevator,
            call,
            origin,
            destination,
        } => format!(
            "[Elevator {}] Serving call {} from {} to {}",
            elevator, call, origin, destination
        ),
        ProgressEvent::ArrivedAtOrigin {
            elevator,
            call,
            floor,
        } => format!("[Elevator {}] Picked up call {} at floor {}", elevator, call, floor),
        ProgressEvent::ArrivedAtDestination {
            elevator,
            call,
            floor,
        } => format!("[Elevator {}] Dropped off call {} at floor {}", elevator, call, floor),
        ProgressEvent::ElevatorStopped {
            elevator,
            floor,
            calls_served,
        } => format!(
            "[Elevator {}] Stopped at floor {} after {} calls",
            elevator, floor, calls_served
        ),
        ProgressEvent::SimulationComplete {
            generated,
            serviced,
        } => format!(
            "Simulation complete: {} calls generated, {} serviced",
            generated, serviced
        ),
    }
}
