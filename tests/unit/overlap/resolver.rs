use super::*;
use crate::calendar::date::CalendarDate;

fn seg(book: usize, month: u32, start_day: u32, end_day: u32) -> Segment {
    Segment::new(
        book,
        CalendarDate::new(2025, month, start_day),
        CalendarDate::new(2025, month, end_day),
        book,
        false,
    )
}

#[test]
fn overlap_is_closed_and_symmetric() {
    let a = seg(0, 4, 1, 10);
    let touching = seg(1, 4, 10, 20);
    let apart = seg(2, 4, 11, 20);
    let other_month = seg(3, 5, 1, 10);

    assert!(overlaps(&a, &touching));
    assert!(overlaps(&touching, &a));
    assert!(!overlaps(&a, &apart));
    assert!(!overlaps(&apart, &a));
    assert!(!overlaps(&a, &other_month));
}

#[test]
fn identical_segments_get_distinct_lanes() {
    let out = resolve_offsets(vec![seg(0, 2, 5, 9), seg(1, 2, 5, 9)]);
    assert_eq!(out.len(), 2);
    assert_ne!(out[0].offset, out[1].offset);
}

#[test]
fn longest_segment_takes_the_base_lane() {
    let short = seg(0, 6, 10, 12);
    let long = seg(1, 6, 1, 30);
    let out = resolve_offsets(vec![short, long]);

    assert_eq!(out[0].book, 1);
    assert_eq!(out[0].offset, 0);
    assert_eq!(out[1].book, 0);
    assert_eq!(out[1].offset, 1);
}

#[test]
fn equal_durations_keep_input_order() {
    let out = resolve_offsets(vec![seg(5, 1, 1, 4), seg(2, 1, 2, 5), seg(9, 1, 20, 23)]);
    assert_eq!(out.iter().map(|s| s.book).collect::<Vec<_>>(), vec![5, 2, 9]);
    assert_eq!(out.iter().map(|s| s.offset).collect::<Vec<_>>(), vec![0, 1, 0]);
}

#[test]
fn lanes_are_not_reused_below_the_highest_conflict() {
    // The tail only overlaps the mid span. Lane 0 is free on its days, yet it stacks on lane 2.
    let long = seg(0, 3, 1, 20);
    let mid = seg(1, 3, 15, 28);
    let tail = seg(2, 3, 25, 28);
    let out = resolve_offsets(vec![long, mid, tail]);

    let lane_of = |book: usize| out.iter().find(|s| s.book == book).unwrap().offset;
    assert_eq!(lane_of(0), 0);
    assert_eq!(lane_of(1), 1);
    assert_eq!(lane_of(2), 2);
    assert_eq!(lane_count(&out), 3);
}

#[test]
fn disjoint_segments_all_sit_on_base_lane() {
    let out = resolve_offsets(vec![seg(0, 0, 1, 5), seg(1, 0, 6, 9), seg(2, 1, 1, 28)]);
    assert!(out.iter().all(|s| s.offset == 0));
    assert_eq!(lane_count(&out), 1);
}

#[test]
fn resolving_twice_is_reproducible() {
    let input = vec![
        seg(0, 2, 1, 31),
        seg(1, 2, 4, 9),
        seg(2, 2, 9, 9),
        seg(3, 2, 8, 20),
        seg(4, 2, 30, 31),
    ];
    let a = resolve_offsets(input.clone());
    let b = resolve_offsets(input);
    assert_eq!(a, b);
}

#[test]
fn no_overlapping_pair_shares_a_lane() {
    let input = vec![
        seg(0, 8, 1, 12),
        seg(1, 8, 3, 7),
        seg(2, 8, 7, 15),
        seg(3, 8, 12, 12),
        seg(4, 8, 20, 30),
    ];
    let out = resolve_offsets(input);
    for (i, a) in out.iter().enumerate() {
        for b in &out[i + 1..] {
            if overlaps(a, b) {
                assert_ne!(a.offset, b.offset, "{a:?} vs {b:?}");
            }
        }
    }
}

#[test]
fn empty_input_is_empty() {
    assert!(resolve_offsets(Vec::new()).is_empty());
    assert_eq!(lane_count(&[]), 0);
}
