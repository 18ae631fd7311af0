/*
 * Unit tests for the dispatcher
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_dispatcher_nearest_free
 * - test_dispatcher_skips_busy
 * - test_dispatcher_tie_break
 * - test_dispatcher_all_busy
 * - test_dispatcher_empty
 * - test_dispatcher_returns_snapshot_id
 *
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod dispatcher_tests {
    use crate::dispatcher::{select_elevator, select_elevator_with};
    use crate::shared::ElevatorSnapshot;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::{Duration, Instant};

    fn fleet(floors: &[u8], busy: &[bool]) -> Vec<ElevatorSnapshot> {
        floors
            .iter()
            .zip(busy.iter())
            .enumerate()
            .map(|(id, (&floor, &busy))| ElevatorSnapshot { id, floor, busy })
            .collect()
    }

    #[test]
    fn test_dispatcher_nearest_free() {
        // Purpose: Verify that the closest elevator wins when there is no tie

        // Arrange
        let elevators = fleet(&[0, 7, 4], &[false, false, false]);

        // Act
        let selected = select_elevator(5, &elevators);

        // Assert
        assert_eq!(selected, Some(2));
    }

    #[test]
    fn test_dispatcher_skips_busy() {
        // Purpose: Verify that a busy elevator is never chosen even if it is closest

        // Arrange: elevator 0 sits on the origin but is busy, elevator 1 is the closest free one
        let elevators = fleet(&[5, 4, 9], &[true, false, false]);

        // Act
        let selected = select_elevator(5, &elevators);

        // Assert
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn test_dispatcher_tie_break() {
        // Purpose: Verify that ties are broken at random between the closest elevators only

        // Arrange
        let elevators = fleet(&[2, 2, 5], &[false, false, false]);
        let mut rng = StdRng::seed_from_u64(4145);
        let mut hits = [0usize; 3];

        // Act
        for _ in 0..1000 {
            let selected = select_elevator_with(2, &elevators, &mut rng).unwrap();
            hits[selected] += 1;
        }

        // Assert
        assert_eq!(hits[2], 0);
        assert_eq!(hits[0] + hits[1], 1000);
        assert!(hits[0] > 350, "elevator 0 picked {} times", hits[0]);
        assert!(hits[1] > 350, "elevator 1 picked {} times", hits[1]);
    }

    #[test]
    fn test_dispatcher_all_busy() {
        // Purpose: Verify that the dispatcher reports no assignment without blocking

        // Arrange
        let elevators = fleet(&[0, 3, 6], &[true, true, true]);
        let start = Instant::now();

        // Act
        let selected = select_elevator(3, &elevators);

        // Assert
        assert_eq!(selected, None);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_dispatcher_empty() {
        assert_eq!(select_elevator(0, &[]), None);
    }

    #[test]
    fn test_dispatcher_returns_snapshot_id() {
        // Purpose: Verify that the returned value is the elevator id and not the slice index

        // Arrange
        let elevators = vec![
            ElevatorSnapshot { id: 7, floor: 9, busy: false },
            ElevatorSnapshot { id: 3, floor: 1, busy: false },
        ];

        // Act
        let selected = select_elevator(0, &elevators);

        // Assert
        assert_eq!(selected, Some(3));
    }
}
