/***************************************/
/*        3rd party libraries          */
/***************************************/
use rand::seq::IndexedRandom;
use rand::Rng;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ElevatorSnapshot;

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Picks the free elevator closest to `origin`.
 *
 * Busy elevators are skipped. When several free elevators share the minimum distance one of
 * them is chosen uniformly at random, so low ids are not favoured under symmetric load.
 *
 * # Returns
 * - `Some(id)`:    The id of the chosen elevator (the snapshot's `id`, not its index).
 * - `None`:        Every elevator is busy. The caller retries later; this never blocks.
 */
pub fn select_elevator(origin: u8, elevators: &[ElevatorSnapshot]) -> Option<usize> {
    select_elevator_with(origin, elevators, &mut rand::rng())
}

pub fn select_elevator_with<R: Rng + ?Sized>(
    origin: u8,
    elevators: &[ElevatorSnapshot],
    rng: &mut R,
) -> Option<usize> {
    let mut min_distance = u8::MAX;
    let mut candidates: Vec<usize> = Vec::with_capacity(elevators.len());

    for elevator in elevators.iter().filter(|e| !e.busy) {
        let distance = elevator.floor.abs_diff(origin);

        if distance < min_distance || candidates.is_empty() {
            // Strictly closer, start a new candidate set
            min_distance = distance;
            candidates.clear();
            candidates.push(elevator.id);
        } else if distance == min_distance {
            candidates.push(elevator.id);
        }
    }

    candidates.choose(rng).copied()
}
