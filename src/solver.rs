use {
    crate::*,
    std::collections::{HashMap, VecDeque},
};

/// Vacancy check over the hallway stretch an amphipod would walk, exclusive of `from` (its own
/// cell, or the entrance it emerges from) and inclusive of `to`.
fn hallway_stretch_is_vacant(occupancy: &HallwayOccupancy, from: usize, to: usize) -> bool {
    let stretch: std::ops::Range<usize> = if from < to { from + 1..to + 1 } else { to..from };

    !occupancy[stretch].any()
}

/// Enumerates every legal single-amphipod move out of `burrow` as `(successor, energy)` pairs.
///
/// Two move families exist, both passing through exactly one room entrance:
///
/// * Hallway -> home room: legal only if every occupant of the home room already matches and the
///   hallway stretch to the entrance is clear; the amphipod settles in the deepest vacant slot.
/// * Room -> hallway: only the mouth-most occupant of a room may leave, and not when it's already
///   home with nothing of the wrong type beneath it; it may stop on any reachable parkable column.
pub fn push_neighbors(burrow: &Burrow, neighbors: &mut Vec<OpenSetElement<Burrow, u32>>) {
    neighbors.clear();

    let occupancy: HallwayOccupancy = burrow.hallway_occupancy();

    for (column, cell) in burrow.hallway().iter().copied().enumerate() {
        let Some(amphipod_index) = cell.amphipod_index() else {
            continue;
        };

        // Rooms are indexed by the amphipod they're home to.
        let room_index: usize = amphipod_index;
        let side_room: &[Cell] = &burrow.side_rooms()[room_index];

        if side_room.iter().any(|room_cell| {
            room_cell
                .amphipod_index()
                .map_or(false, |occupant_index| occupant_index != room_index)
        }) {
            continue;
        }

        let Some(slot) = side_room.iter().rposition(|room_cell| *room_cell == Cell::Vacant)
        else {
            // The home room is already full.
            continue;
        };

        let entrance_column: usize = ROOM_ENTRANCE_COLUMNS[room_index];

        if !hallway_stretch_is_vacant(&occupancy, column, entrance_column) {
            continue;
        }

        let steps: u32 = (column.abs_diff(entrance_column) + slot + 1_usize) as u32;

        neighbors.push(OpenSetElement(
            burrow
                .with_hallway_cell(column, Cell::Vacant)
                .with_side_room_cell(room_index, slot, cell),
            steps * Cell::energy_per_step_for_amphipod_index(amphipod_index),
        ));
    }

    for (room_index, side_room) in burrow.side_rooms().iter().enumerate() {
        let Some((slot, cell, amphipod_index)) =
            side_room.iter().enumerate().find_map(|(slot, room_cell)| {
                room_cell
                    .amphipod_index()
                    .map(|amphipod_index| (slot, *room_cell, amphipod_index))
            })
        else {
            continue;
        };

        // An amphipod already home, resting above only correctly-typed occupants, stays put.
        if amphipod_index == room_index
            && side_room[slot + 1_usize..].iter().all(|room_cell| {
                room_cell
                    .amphipod_index()
                    .map_or(true, |below_index| below_index == room_index)
            })
        {
            continue;
        }

        let entrance_column: usize = ROOM_ENTRANCE_COLUMNS[room_index];
        let energy_per_step: u32 = Cell::energy_per_step_for_amphipod_index(amphipod_index);

        for column in PARKABLE_COLUMNS {
            if !hallway_stretch_is_vacant(&occupancy, entrance_column, column) {
                continue;
            }

            let steps: u32 = (slot + 1_usize + entrance_column.abs_diff(column)) as u32;

            neighbors.push(OpenSetElement(
                burrow
                    .with_side_room_cell(room_index, slot, Cell::Vacant)
                    .with_hallway_cell(column, cell),
                steps * energy_per_step,
            ));
        }
    }
}

/// An admissible lower bound on the energy still needed to organize `burrow`: every amphipod not
/// yet in its home room walks an unobstructed path to the home room's mouth.
pub fn organize_heuristic(burrow: &Burrow) -> u32 {
    let hallway_energy: u32 = burrow
        .hallway()
        .iter()
        .enumerate()
        .filter_map(|(column, cell)| {
            cell.amphipod_index().map(|amphipod_index| {
                (column.abs_diff(ROOM_ENTRANCE_COLUMNS[amphipod_index]) + 1_usize) as u32
                    * Cell::energy_per_step_for_amphipod_index(amphipod_index)
            })
        })
        .sum();
    let side_room_energy: u32 = burrow
        .side_rooms()
        .iter()
        .enumerate()
        .flat_map(|(room_index, side_room)| {
            side_room
                .iter()
                .enumerate()
                .filter_map(move |(slot, cell)| {
                    cell.amphipod_index()
                        .filter(|amphipod_index| *amphipod_index != room_index)
                        .map(|amphipod_index| {
                            (slot
                                + 1_usize
                                + ROOM_ENTRANCE_COLUMNS[room_index]
                                    .abs_diff(ROOM_ENTRANCE_COLUMNS[amphipod_index])
                                + 1_usize) as u32
                                * Cell::energy_per_step_for_amphipod_index(amphipod_index)
                        })
                })
        })
        .sum();

    hallway_energy + side_room_energy
}

struct PreviousEntry {
    previous: Option<Burrow>,
    energy: u32,
}

/// The search problem of organizing a starting burrow, retaining the best known energy and
/// predecessor for every reached state.
pub struct OrganizeBurrow {
    start: Burrow,
    previous_map: HashMap<Burrow, PreviousEntry>,
}

impl OrganizeBurrow {
    pub fn new(start: Burrow) -> Self {
        Self {
            start,
            previous_map: HashMap::new(),
        }
    }
}

impl WeightedGraphSearch for OrganizeBurrow {
    type Vertex = Burrow;
    type Cost = u32;

    fn start(&self) -> &Burrow {
        &self.start
    }

    fn is_end(&self, vertex: &Burrow) -> bool {
        vertex.is_organized()
    }

    fn path_to(&self, vertex: &Burrow) -> Vec<Burrow> {
        let mut path: VecDeque<Burrow> = VecDeque::new();
        let mut vertex: Option<&Burrow> = Some(vertex);

        while let Some(current) = vertex {
            path.push_front(current.clone());
            vertex = self
                .previous_map
                .get(current)
                .and_then(|previous_entry| previous_entry.previous.as_ref());
        }

        path.into()
    }

    fn cost_from_start(&self, vertex: &Burrow) -> u32 {
        self.previous_map
            .get(vertex)
            .map_or(u32::MAX, |previous_entry| previous_entry.energy)
    }

    fn heuristic(&self, vertex: &Burrow) -> u32 {
        organize_heuristic(vertex)
    }

    fn neighbors(&self, vertex: &Burrow, neighbors: &mut Vec<OpenSetElement<Burrow, u32>>) {
        push_neighbors(vertex, neighbors);
    }

    fn update_vertex(&mut self, from: &Burrow, to: &Burrow, cost: u32, _heuristic: u32) {
        self.previous_map.insert(
            to.clone(),
            PreviousEntry {
                previous: Some(from.clone()),
                energy: cost,
            },
        );
    }

    fn reset(&mut self) {
        self.previous_map.clear();
        self.previous_map.insert(
            self.start.clone(),
            PreviousEntry {
                previous: None,
                energy: 0_u32,
            },
        );
    }
}

fn try_organize_internal<F: FnOnce(&mut OrganizeBurrow) -> Option<Vec<Burrow>>>(
    burrow: &Burrow,
    run: F,
) -> Option<(Vec<Burrow>, u32)> {
    let mut organize_burrow: OrganizeBurrow = OrganizeBurrow::new(burrow.clone());

    run(&mut organize_burrow).map(|path| {
        // The path always ends in the organized state the search terminated on.
        let energy: u32 = path
            .last()
            .map_or(0_u32, |end| organize_burrow.cost_from_start(end));

        (path, energy)
    })
}

/// Uniform-cost (Dijkstra) search for the cheapest move sequence organizing `burrow`, returning
/// the visited states alongside the total energy, or `None` when no legal sequence reaches an
/// organized state.
pub fn try_organize(burrow: &Burrow) -> Option<(Vec<Burrow>, u32)> {
    try_organize_internal(burrow, |organize_burrow| organize_burrow.run_dijkstra())
}

/// Same answer as `try_organize`, found faster for deep rooms via `organize_heuristic`.
pub fn try_organize_astar(burrow: &Burrow) -> Option<(Vec<Burrow>, u32)> {
    try_organize_internal(burrow, |organize_burrow| organize_burrow.run_a_star())
}

pub fn try_organize_energy(burrow: &Burrow) -> Option<u32> {
    try_organize(burrow).map(|(_, energy)| energy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_BURROW_STR: &str = concat!(
        "#############\n",
        "#...........#\n",
        "###B#C#B#D###\n",
        "  #A#D#C#A#\n",
        "  #########\n",
    );
    const UNFOLDED_EXAMPLE_BURROW_STR: &str = concat!(
        "#############\n",
        "#...........#\n",
        "###B#C#B#D###\n",
        "  #D#C#B#A#\n",
        "  #D#B#A#C#\n",
        "  #A#D#C#A#\n",
        "  #########\n",
    );
    const ORGANIZED_BURROW_STR: &str = concat!(
        "#############\n",
        "#...........#\n",
        "###A#B#C#D###\n",
        "  #A#B#C#D#\n",
        "  #########\n",
    );

    fn burrow(burrow_str: &str) -> Burrow {
        Burrow::try_from(burrow_str).unwrap()
    }

    fn amphipod_census(burrow: &Burrow) -> [usize; AMPHIPOD_TYPES] {
        let mut census: [usize; AMPHIPOD_TYPES] = [0_usize; AMPHIPOD_TYPES];

        for cell in burrow
            .hallway()
            .iter()
            .chain(burrow.side_rooms().iter().flatten())
        {
            if let Some(amphipod_index) = cell.amphipod_index() {
                census[amphipod_index] += 1_usize;
            }
        }

        census
    }

    fn neighbors(burrow: &Burrow) -> Vec<OpenSetElement<Burrow, u32>> {
        let mut neighbors: Vec<OpenSetElement<Burrow, u32>> = Vec::new();

        push_neighbors(burrow, &mut neighbors);

        neighbors
    }

    #[test]
    fn test_push_neighbors_example() {
        let example: Burrow = burrow(EXAMPLE_BURROW_STR);
        let neighbors: Vec<OpenSetElement<Burrow, u32>> = neighbors(&example);

        // Every room's mouth occupant is unsettled and the hallway is empty, so each of the 4
        // mouth occupants can reach each of the 7 parkable columns.
        assert_eq!(neighbors.len(), 28_usize);

        let census: [usize; AMPHIPOD_TYPES] = amphipod_census(&example);

        for OpenSetElement(neighbor, energy) in neighbors {
            assert!(energy > 0_u32);
            assert_eq!(amphipod_census(&neighbor), census);

            // Only mouth occupants move out; slot 1 of every room is untouched.
            for (side_room, neighbor_side_room) in
                example.side_rooms().iter().zip(neighbor.side_rooms())
            {
                assert_eq!(side_room[1_usize], neighbor_side_room[1_usize]);
            }
        }
    }

    #[test]
    fn test_push_neighbors_hallway_to_room() {
        let parked: Burrow = burrow(concat!(
            "#############\n",
            "#B..........#\n",
            "###A#.#C#D###\n",
            "  #A#B#C#D#\n",
            "  #########\n",
        ));
        let neighbors: Vec<OpenSetElement<Burrow, u32>> = neighbors(&parked);

        // The parked B walks 4 columns and down 1 slot into its home room; every room occupant is
        // settled, so that's the only legal move.
        assert_eq!(neighbors.len(), 1_usize);

        let OpenSetElement(neighbor, energy) = &neighbors[0_usize];

        assert_eq!(*energy, 50_u32);
        assert!(neighbor.is_organized());
    }

    #[test]
    fn test_push_neighbors_hallway_to_room_settles_deep() {
        let parked: Burrow = burrow(concat!(
            "#############\n",
            "#B..........#\n",
            "###A#.#C#D###\n",
            "  #A#.#C#D#\n",
            "  #########\n",
        ));

        let neighbors: Vec<OpenSetElement<Burrow, u32>> = neighbors(&parked);

        assert_eq!(neighbors.len(), 1_usize);

        for OpenSetElement(neighbor, energy) in neighbors {
            // The only legal move settles B in the deepest vacant slot of its home room.
            assert_eq!(neighbor.side_rooms()[1_usize][1_usize], Cell::Bronze);
            assert_eq!(energy, 60_u32);
        }
    }

    #[test]
    fn test_push_neighbors_obstructed_hallway() {
        let obstructed: Burrow = burrow(concat!(
            "#############\n",
            "#B.C........#\n",
            "###A#.#.#D###\n",
            "  #A#B#C#D#\n",
            "  #########\n",
        ));
        let neighbors: Vec<OpenSetElement<Burrow, u32>> = neighbors(&obstructed);

        // The C at column 2 blocks B's path to room 1, but can itself reach room 2.
        assert_eq!(neighbors.len(), 1_usize);

        let OpenSetElement(neighbor, energy) = &neighbors[0_usize];

        assert_eq!(*energy, 500_u32);
        assert_eq!(neighbor.side_rooms()[2_usize][0_usize], Cell::Copper);
    }

    #[test]
    fn test_push_neighbors_never_moves_buried_occupant() {
        let stacked: Burrow = burrow(concat!(
            "#############\n",
            "#...........#\n",
            "###A#B#C#D###\n",
            "  #B#A#C#D#\n",
            "  #########\n",
        ));

        for OpenSetElement(neighbor, _) in neighbors(&stacked) {
            // Rooms 0 and 1 hold foreigners beneath their mouths; only the mouth occupants may
            // leave, so no successor touches slot 1.
            assert_eq!(neighbor.side_rooms()[0_usize][1_usize], Cell::Bronze);
            assert_eq!(neighbor.side_rooms()[1_usize][1_usize], Cell::Amber);
        }
    }

    #[test]
    fn test_try_organize_energy_example() {
        assert_eq!(
            try_organize_energy(&burrow(EXAMPLE_BURROW_STR)),
            Some(12521_u32)
        );
    }

    #[test]
    fn test_try_organize_organized() {
        let (path, energy): (Vec<Burrow>, u32) =
            try_organize(&burrow(ORGANIZED_BURROW_STR)).unwrap();

        assert_eq!(energy, 0_u32);
        assert_eq!(path, vec![burrow(ORGANIZED_BURROW_STR)]);
    }

    #[test]
    fn test_try_organize_astar_agrees_with_dijkstra() {
        assert_eq!(
            try_organize_astar(&burrow(EXAMPLE_BURROW_STR)).map(|(_, energy)| energy),
            Some(12521_u32)
        );
    }

    #[test]
    fn test_try_organize_astar_unfolded_example() {
        assert_eq!(
            try_organize_astar(&burrow(UNFOLDED_EXAMPLE_BURROW_STR)).map(|(_, energy)| energy),
            Some(44169_u32)
        );
    }

    #[test]
    fn test_try_organize_unsolvable() {
        // 8 As can never produce organized B, C, and D rooms; the frontier must run dry.
        assert_eq!(
            try_organize_energy(&burrow(concat!(
                "#############\n",
                "#...........#\n",
                "###A#A#A#A###\n",
                "  #A#A#A#A#\n",
                "  #########\n",
            ))),
            None
        );
    }

    #[test]
    fn test_try_organize_path_is_playable() {
        let (path, energy): (Vec<Burrow>, u32) =
            try_organize(&burrow(EXAMPLE_BURROW_STR)).unwrap();

        assert_eq!(path.first(), Some(&burrow(EXAMPLE_BURROW_STR)));
        assert!(path.last().map_or(false, Burrow::is_organized));

        // Each consecutive state pair is one legal move apart, and the step energies sum to the
        // reported total.
        let mut total_energy: u32 = 0_u32;

        for states in path.windows(2_usize) {
            let step_energy: u32 = neighbors(&states[0_usize])
                .into_iter()
                .find_map(|OpenSetElement(neighbor, energy)| {
                    (neighbor == states[1_usize]).then_some(energy)
                })
                .unwrap();

            total_energy += step_energy;
        }

        assert_eq!(total_energy, energy);
    }

    #[test]
    fn test_organize_heuristic() {
        assert_eq!(organize_heuristic(&burrow(ORGANIZED_BURROW_STR)), 0_u32);
        assert!(organize_heuristic(&burrow(EXAMPLE_BURROW_STR)) <= 12521_u32);
        assert!(organize_heuristic(&burrow(UNFOLDED_EXAMPLE_BURROW_STR)) <= 44169_u32);
    }
}
