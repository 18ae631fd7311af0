/*
 * Unit tests for the simulation runner and narrator
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_simulation_completes_small_building
 * - test_simulation_completes_busy_building
 * - test_narrator_counts_events
 * - test_event_json_shape
 * - test_summary_json_shape
 *
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod runner_tests {
    use crate::config::{Config, OutputFormat, SimulationConfig, SimulationParams};
    use crate::shared::{ProgressEvent, SimulationSummary};
    use crate::simulation::narrator::describe;
    use crate::simulation::{Narrator, Simulation};
    use crossbeam_channel::unbounded;
    use std::thread::Builder;
    use std::time::Duration;

    fn fast_config() -> Config {
        Config {
            simulation: SimulationConfig {
                time_unit_ms: 1,
                think_time_min: 0,
                think_time_max: 2,
                claim_backoff_ms: 1,
            },
            ..Config::default()
        }
    }

    // Runs the whole simulation on a helper thread so a deadlock fails instead of hanging.
    fn run_with_timeout(params: SimulationParams) -> SimulationSummary {
        let (summary_tx, summary_rx) = unbounded::<SimulationSummary>();
        let simulation = Simulation::new(params, &fast_config());

        Builder::new()
            .name("simulation".into())
            .spawn(move || summary_tx.send(simulation.run().unwrap()).unwrap())
            .unwrap();

        summary_rx
            .recv_timeout(Duration::from_secs(20))
            .expect("simulation did not finish")
    }

    #[test]
    fn test_simulation_completes_small_building() {
        // Purpose: Verify that F=3, E=2, C=6 generates and services exactly six calls

        // Arrange
        let params = SimulationParams {
            n_floors: 3,
            n_elevators: 2,
            n_calls: 6,
        };

        // Act
        let summary = run_with_timeout(params);

        // Assert
        assert_eq!(summary.generated, 6);
        assert_eq!(summary.serviced, 6);
        assert_eq!(summary.elevators.len(), 2);
        let served: usize = summary.elevators.iter().map(|e| e.calls_served).sum();
        assert_eq!(served, 6);
        for (id, report) in summary.elevators.iter().enumerate() {
            assert_eq!(report.id, id);
            assert!(report.final_floor < 3);
        }
    }

    #[test]
    fn test_simulation_completes_busy_building() {
        // Arrange
        let params = SimulationParams {
            n_floors: 12,
            n_elevators: 4,
            n_calls: 40,
        };

        // Act
        let summary = run_with_timeout(params);

        // Assert
        assert_eq!(summary.generated, 40);
        assert_eq!(summary.serviced, 40);
        let served: usize = summary.elevators.iter().map(|e| e.calls_served).sum();
        assert_eq!(served, 40);
    }

    #[test]
    fn test_narrator_counts_events() {
        // Arrange
        let (event_tx, event_rx) = unbounded::<ProgressEvent>();
        let narrator = Narrator::new(OutputFormat::Text, event_rx);

        // Act
        event_tx
            .send(ProgressEvent::CallCreated { call: 0, origin: 1, destination: 2 })
            .unwrap();
        event_tx
            .send(ProgressEvent::SimulationComplete { generated: 1, serviced: 1 })
            .unwrap();
        drop(event_tx);

        // Assert
        assert_eq!(narrator.run(), 2);
    }

    #[test]
    fn test_event_json_shape() {
        // Purpose: Verify the tagged JSON line format of progress events

        // Arrange
        let event = ProgressEvent::ArrivedAtDestination { elevator: 2, call: 7, floor: 4 };

        // Act
        let value = serde_json::to_value(&event).unwrap();

        // Assert
        assert_eq!(
            value,
            serde_json::json!({"event": "arrived_at_destination", "elevator": 2, "call": 7, "floor": 4})
        );
        assert_eq!(describe(&event), "[Elevator 2] Dropped off call 7 at floor 4");
    }

    #[test]
    fn test_summary_json_shape() {
        // Arrange
        let summary = SimulationSummary {
            n_floors: 3,
            n_elevators: 1,
            generated: 2,
            serviced: 2,
            elevators: vec![crate::shared::ElevatorReport {
                id: 0,
                final_floor: 2,
                calls_served: 2,
            }],
        };

        // Act
        let value = serde_json::to_value(&summary).unwrap();

        // Assert
        assert_eq!(value["nFloors"], 3);
        assert_eq!(value["elevators"][0]["finalFloor"], 2);
        assert_eq!(value["elevators"][0]["callsServed"], 2);
    }
}
