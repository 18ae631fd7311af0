/*
 * Unit tests for the fleet
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_fleet_call_cycle
 * - test_fleet_unknown_id
 *
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod fleet_tests {
    use crate::elevator::Fleet;
    use crate::shared::{Behaviour, ElevatorSnapshot};

    #[test]
    fn test_fleet_call_cycle() {
        // Purpose: Verify that one call walks an elevator through every behaviour and back to idle

        // Arrange
        let fleet = Fleet::new(2);

        // Act
        fleet.begin_call(1);
        let busy = fleet.snapshot();
        fleet.arrive_at_origin(1, 3);
        let served = fleet.arrive_at_destination(1, 6);

        // Assert
        assert!(busy[1].busy);
        assert!(!busy[0].busy);
        assert_eq!(served, Some(1));
        let state = fleet.state(1).unwrap();
        assert_eq!(state.floor, 6);
        assert_eq!(state.behaviour, Behaviour::Idle);
    }

    #[test]
    fn test_fleet_unknown_id() {
        // Purpose: Verify that an id outside the fleet is rejected without panicking or
        // touching the existing elevators

        // Arrange
        let fleet = Fleet::new(2);
        let before = fleet.snapshot();

        // Act
        fleet.begin_call(2);
        fleet.arrive_at_origin(7, 4);
        let served = fleet.arrive_at_destination(2, 4);
        let stopped = fleet.stop(2);

        // Assert
        assert_eq!(fleet.state(2), None);
        assert_eq!(served, None);
        assert_eq!(stopped, None);
        assert_eq!(fleet.snapshot(), before);
        assert_eq!(
            before,
            vec![
                ElevatorSnapshot { id: 0, floor: 0, busy: false },
                ElevatorSnapshot { id: 1, floor: 0, busy: false },
            ]
        );
    }
}
