use crate::Slice;

/// Translates the rendered slice of the old movie into the index space of a movie that
/// received a pure prefix or append.
///
/// `inserted` is the index range the new items occupy in the new movie. Inserting at the front
/// (`inserted.start == 0`) shifts the slice by the number of inserted items; inserting at the
/// back leaves it as is. Hosts use the result to keep rendering the same items until the next
/// projection, instead of flashing whatever now sits at the old indexes.
///
/// Insertions or removals in the middle of the list are not covered; those need a full
/// projection.
pub fn map_old_slice_into_new_movie(current: Slice, inserted: Slice) -> Slice {
    if inserted.start == 0 {
        let start = inserted.end.saturating_add(current.start);
        Slice {
            start,
            end: start.saturating_add(current.len()),
        }
    } else {
        current
    }
}
