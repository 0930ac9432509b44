use single_utilities::traits::FloatOpsTS;
pub use single_utilities::types::Direction;

/// Lower-case name of the axis, for messages.
pub(crate) fn axis_name(direction: &Direction) -> &'static str {
    match direction {
        Direction::ROW => "row",
        Direction::COLUMN => "column",
    }
}

/// The complementary axis.
pub(crate) fn other_axis(direction: &Direction) -> Direction {
    match direction {
        Direction::ROW => Direction::COLUMN,
        Direction::COLUMN => Direction::ROW,
    }
}

/// Rescales every row (or column) so that it sums to `target`.
pub trait Normalize<T: FloatOpsTS> {
    fn normalize(&mut self, sums: &[T], target: T, direction: &Direction) -> anyhow::Result<()>;
}
