use crate::span::segment::Segment;

/// Closed-interval overlap in the 31-day-stride metric; touching endpoints overlap.
pub fn overlaps(a: &Segment, b: &Segment) -> bool {
    a.start.ordinal() <= b.end.ordinal() && b.start.ordinal() <= a.end.ordinal()
}

/// Assign stacking lanes and return segments in draw order.
///
/// Segments are ordered longest first (stable, so ties keep their input order), then placed
/// greedily: each one sits one lane above the highest already-placed segment it overlaps.
/// Long spans therefore hold the base lane and shorter ones are drawn over them. This is not a
/// minimal packing; lanes freed lower down are not reused.
pub fn resolve_offsets(mut segments: Vec<Segment>) -> Vec<Segment> {
    segments.sort_by(|a, b| b.duration.cmp(&a.duration));

    let mut placed = Vec::<Segment>::with_capacity(segments.len());
    for mut seg in segments {
        seg.offset = placed
            .iter()
            .filter(|p| overlaps(p, &seg))
            .map(|p| p.offset + 1)
            .max()
            .unwrap_or(0);
        placed.push(seg);
    }
    placed
}

/// Number of lanes in use (highest lane + 1), or 0 for no segments.
pub fn lane_count(segments: &[Segment]) -> u32 {
    segments.iter().map(|s| s.offset + 1).max().unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/overlap/resolver.rs"]
mod tests;
