use super::domain::{Room, Seat};
use super::error::AllocationError;

/// Room geometry as an addressable rows x columns matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Result<Self, AllocationError> {
        if rows == 0 || columns == 0 {
            return Err(AllocationError::InvalidDimensions { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    pub fn for_room(room: &Room) -> Result<Self, AllocationError> {
        Self::new(room.rows as usize, room.columns as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains(&self, seat: Seat) -> bool {
        seat.row < self.rows && seat.column < self.columns
    }

    /// Row-major, left-to-right, top-to-bottom. Placement visits seats in
    /// exactly this order.
    pub fn traversal_order(&self) -> Vec<Seat> {
        (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |column| Seat::new(row, column)))
            .collect()
    }

    /// Neighbours already visited when `seat` is reached in traversal order:
    /// the seat to the left and the seat above.
    pub fn neighbors(&self, seat: Seat) -> Vec<Seat> {
        let mut neighbors = Vec::with_capacity(2);
        if seat.column > 0 {
            neighbors.push(Seat::new(seat.row, seat.column - 1));
        }
        if seat.row > 0 {
            neighbors.push(Seat::new(seat.row - 1, seat.column));
        }
        neighbors
    }

    /// All edge-sharing neighbours inside the room.
    pub fn adjacent(&self, seat: Seat) -> Vec<Seat> {
        let mut adjacent = self.neighbors(seat);
        if seat.column + 1 < self.columns {
            adjacent.push(Seat::new(seat.row, seat.column + 1));
        }
        if seat.row + 1 < self.rows {
            adjacent.push(Seat::new(seat.row + 1, seat.column));
        }
        adjacent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(AllocationError::InvalidDimensions {
                rows: 0,
                columns: 5
            })
        );
        assert!(Grid::new(3, 0).is_err());
    }

    #[test]
    fn capacity_is_rows_times_columns() {
        let grid = Grid::new(4, 6).expect("valid grid");
        assert_eq!(grid.capacity(), 24);
    }

    #[test]
    fn traversal_is_row_major() {
        let grid = Grid::new(2, 3).expect("valid grid");
        assert_eq!(
            grid.traversal_order(),
            vec![
                Seat::new(0, 0),
                Seat::new(0, 1),
                Seat::new(0, 2),
                Seat::new(1, 0),
                Seat::new(1, 1),
                Seat::new(1, 2),
            ]
        );
    }

    #[test]
    fn neighbors_only_look_backwards() {
        let grid = Grid::new(3, 3).expect("valid grid");
        assert!(grid.neighbors(Seat::new(0, 0)).is_empty());
        assert_eq!(grid.neighbors(Seat::new(0, 2)), vec![Seat::new(0, 1)]);
        assert_eq!(grid.neighbors(Seat::new(2, 0)), vec![Seat::new(1, 0)]);
        assert_eq!(
            grid.neighbors(Seat::new(1, 1)),
            vec![Seat::new(1, 0), Seat::new(0, 1)]
        );
    }

    #[test]
    fn adjacent_is_clipped_at_room_edges() {
        let grid = Grid::new(3, 3).expect("valid grid");
        assert_eq!(grid.adjacent(Seat::new(1, 1)).len(), 4);
        assert_eq!(grid.adjacent(Seat::new(2, 2)).len(), 2);
        assert_eq!(grid.adjacent(Seat::new(0, 1)).len(), 3);
        assert!(grid.contains(Seat::new(2, 2)));
        assert!(!grid.contains(Seat::new(3, 0)));
    }
}
