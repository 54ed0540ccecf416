use {
    crate::*,
    bitvec::prelude::*,
    nom::{
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::{map_opt, opt},
        error::Error,
        multi::{many0, many_m_n},
        sequence::{delimited, terminated, tuple},
        Err, IResult,
    },
    static_assertions::const_assert_eq,
    std::{
        fmt::{Display, Formatter, Result as FmtResult, Write},
        iter::once,
    },
};

pub const HALLWAY_LEN: usize = 11_usize;
pub const AMPHIPOD_TYPES: usize = 4_usize;

/// The hallway column directly above the mouth of each side room, indexed by room.
pub const ROOM_ENTRANCE_COLUMNS: [usize; AMPHIPOD_TYPES] = [2_usize, 4_usize, 6_usize, 8_usize];

/// The hallway columns an amphipod may stop on, which is every column that isn't a room entrance.
pub const PARKABLE_COLUMNS: [usize; HALLWAY_LEN - AMPHIPOD_TYPES] =
    [0_usize, 1_usize, 3_usize, 5_usize, 7_usize, 9_usize, 10_usize];

const_assert_eq!(
    ROOM_ENTRANCE_COLUMNS.len() + PARKABLE_COLUMNS.len(),
    HALLWAY_LEN
);

const TOP_WALL_STR: &str = "#############";
const BOTTOM_WALL_STR: &str = "  #########";

pub type HallwayOccupancy = BitArr!(for HALLWAY_LEN, in u16);

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum Cell {
        Vacant = VACANT = b'.',
        Amber = AMBER = b'A',
        Bronze = BRONZE = b'B',
        Copper = COPPER = b'C',
        Desert = DESERT = b'D',
    }
}

impl Cell {
    pub fn amphipod_index(self) -> Option<usize> {
        match self {
            Self::Vacant => None,
            _ => Some((self as u8 - Self::AMBER) as usize),
        }
    }

    #[inline(always)]
    pub const fn energy_per_step_for_amphipod_index(amphipod_index: usize) -> u32 {
        10_u32.pow(amphipod_index as u32)
    }

    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

/// The complete board state at one instant: 11 hallway cells and 4 side rooms of a uniform,
/// input-determined depth. Slot 0 of a side room is the room mouth; the highest slot is the
/// closed end. Room `i` is home to the amphipod with index `i`.
///
/// Equality and hashing are structural, so `Burrow` values can key the search's best-known-cost
/// map. States are never mutated in place; successors are built by `with_hallway_cell` and
/// `with_side_room_cell`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Burrow {
    hallway: [Cell; HALLWAY_LEN],
    side_rooms: [Vec<Cell>; AMPHIPOD_TYPES],
}

impl Burrow {
    #[inline]
    pub fn hallway(&self) -> &[Cell; HALLWAY_LEN] {
        &self.hallway
    }

    #[inline]
    pub fn side_rooms(&self) -> &[Vec<Cell>; AMPHIPOD_TYPES] {
        &self.side_rooms
    }

    pub fn side_room_len(&self) -> usize {
        self.side_rooms[0_usize].len()
    }

    /// A burrow is organized iff every slot of room `i` holds the amphipod with index `i`.
    pub fn is_organized(&self) -> bool {
        self.side_rooms
            .iter()
            .enumerate()
            .all(|(room_index, side_room)| {
                side_room
                    .iter()
                    .all(|cell| cell.amphipod_index() == Some(room_index))
            })
    }

    pub fn with_hallway_cell(&self, column: usize, cell: Cell) -> Self {
        let mut burrow: Self = self.clone();

        burrow.hallway[column] = cell;

        burrow
    }

    pub fn with_side_room_cell(&self, room_index: usize, slot: usize, cell: Cell) -> Self {
        let mut burrow: Self = self.clone();

        burrow.side_rooms[room_index][slot] = cell;

        burrow
    }

    pub fn hallway_occupancy(&self) -> HallwayOccupancy {
        let mut occupancy: HallwayOccupancy = HallwayOccupancy::ZERO;

        for (column, cell) in self.hallway.iter().enumerate() {
            occupancy.set(column, cell.amphipod_index().is_some());
        }

        occupancy
    }
}

fn parse_side_room_row<'i>(
    prefix: &'static str,
    suffix: &'static str,
) -> impl FnMut(&'i str) -> IResult<&'i str, [Cell; AMPHIPOD_TYPES]> {
    map_opt(
        delimited(
            tag(prefix),
            many_m_n(
                AMPHIPOD_TYPES,
                AMPHIPOD_TYPES,
                terminated(Cell::parse, tag("#")),
            ),
            tuple((tag(suffix), line_ending)),
        ),
        |cells: Vec<Cell>| cells.try_into().ok(),
    )
}

impl Parse for Burrow {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        let (input, _) = terminated(tag(TOP_WALL_STR), line_ending)(input)?;
        let (input, hallway) = map_opt(
            delimited(
                tag("#"),
                many_m_n(HALLWAY_LEN, HALLWAY_LEN, Cell::parse),
                tuple((tag("#"), line_ending)),
            ),
            |cells: Vec<Cell>| -> Option<[Cell; HALLWAY_LEN]> { cells.try_into().ok() },
        )(input)?;
        let (input, first_side_room_row) = parse_side_room_row("###", "##")(input)?;
        let (input, other_side_room_rows) = many0(parse_side_room_row("  #", ""))(input)?;
        let (input, _) = tuple((tag(BOTTOM_WALL_STR), opt(line_ending)))(input)?;

        let mut side_rooms: [Vec<Cell>; AMPHIPOD_TYPES] = Default::default();

        for side_room_row in once(first_side_room_row).chain(other_side_room_rows) {
            for (side_room, cell) in side_rooms.iter_mut().zip(side_room_row) {
                side_room.push(cell);
            }
        }

        Ok((
            input,
            Self {
                hallway,
                side_rooms,
            },
        ))
    }
}

impl<'i> TryFrom<&'i str> for Burrow {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}

impl Display for Burrow {
    /// Re-serializes the exact grid accepted by `parse`.
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(TOP_WALL_STR)?;
        f.write_char('\n')?;
        f.write_char('#')?;

        for cell in self.hallway {
            f.write_char(cell.as_char())?;
        }

        f.write_str("#\n")?;

        for slot in 0_usize..self.side_room_len() {
            let (prefix, suffix): (&str, &str) = if slot == 0_usize {
                ("###", "###")
            } else {
                ("  #", "#")
            };

            f.write_str(prefix)?;

            for (room_index, side_room) in self.side_rooms.iter().enumerate() {
                if room_index != 0_usize {
                    f.write_char('#')?;
                }

                f.write_char(side_room[slot].as_char())?;
            }

            f.write_str(suffix)?;
            f.write_char('\n')?;
        }

        f.write_str(BOTTOM_WALL_STR)?;
        f.write_char('\n')
    }
}
