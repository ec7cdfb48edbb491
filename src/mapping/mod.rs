pub(crate) mod direct_mapping;
pub(crate) mod indexed_mapping;
pub(crate) mod keyed_mapping;

/// The capability set shared by every child-map representation: find a child
/// by its key byte, append a child, and report occupancy against capacity.
/// Growth is not part of the trait; each representation offers a `from_*`
/// conversion constructor consuming the next-smaller class instead, so the
/// upgrade chain N4 -> N16 -> N48 -> N256 is closed at compile time.
pub(crate) trait NodeMapping<N> {
    fn add_child(&mut self, key: u8, node: N);
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn num_children(&self) -> usize;
    fn width(&self) -> usize;
}
