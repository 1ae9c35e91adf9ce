use crate::rect::Rect;
use crate::side::Side;
use crate::tile::{LeafArena, LeafId};
use fxhash::FxHasher;
use indexmap::IndexMap;
use std::hash::BuildHasherDefault;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Start = 0,
    End = 1,
}

struct Event {
    key: i32,
    kind: EventKind,
    side: Side,
    leaf: LeafId,
}

/// From the flat set of leaves, compute which pairs share a non-zero-length
/// colinear edge and on which side (spec §4.E). Populates each leaf's
/// `neighbors` list in place.
#[tracing::instrument(skip_all)]
pub fn build_adjacency(arena: &mut LeafArena) {
    let mut left_buckets: FxIndexMap<i32, Vec<LeafId>> = FxIndexMap::default();
    let mut right_buckets: FxIndexMap<i32, Vec<LeafId>> = FxIndexMap::default();
    let mut top_buckets: FxIndexMap<i32, Vec<LeafId>> = FxIndexMap::default();
    let mut bottom_buckets: FxIndexMap<i32, Vec<LeafId>> = FxIndexMap::default();

    for id in arena.ids() {
        let rect = arena.get(id).rect;
        left_buckets.entry(rect.x()).or_default().push(id);
        right_buckets.entry(rect.right()).or_default().push(id);
        top_buckets.entry(rect.y()).or_default().push(id);
        bottom_buckets.entry(rect.bottom()).or_default().push(id);
    }

    let columns: Vec<i32> = right_buckets
        .keys()
        .copied()
        .filter(|c| left_buckets.contains_key(c))
        .collect();
    let mut pair_count = 0usize;
    for c in columns {
        pair_count += sweep(
            arena,
            &right_buckets[&c],
            Side::Right,
            &left_buckets[&c],
            Side::Left,
            |rect: &Rect| (rect.y(), rect.bottom()),
        );
    }

    let rows: Vec<i32> = bottom_buckets
        .keys()
        .copied()
        .filter(|c| top_buckets.contains_key(c))
        .collect();
    for c in rows {
        pair_count += sweep(
            arena,
            &bottom_buckets[&c],
            Side::Bottom,
            &top_buckets[&c],
            Side::Top,
            |rect: &Rect| (rect.x(), rect.right()),
        );
    }

    tracing::debug!(leaf_count = arena.len(), pair_count, "adjacency built");
}

/// Sweep one shared boundary column (or row). `group_a`/`group_b` are the
/// leaves whose edges lie on this boundary from either side, tagged
/// `side_a`/`side_b`; `cross_range` extracts each leaf's interval along the
/// sweep axis (spec §4.E steps 2-4).
fn sweep(
    arena: &mut LeafArena,
    group_a: &[LeafId],
    side_a: Side,
    group_b: &[LeafId],
    side_b: Side,
    cross_range: impl Fn(&Rect) -> (i32, i32),
) -> usize {
    let mut events = Vec::with_capacity((group_a.len() + group_b.len()) * 2);
    for &leaf in group_a {
        let (lo, hi) = cross_range(&arena.get(leaf).rect);
        events.push(Event { key: lo, kind: EventKind::Start, side: side_a, leaf });
        events.push(Event { key: hi, kind: EventKind::End, side: side_a, leaf });
    }
    for &leaf in group_b {
        let (lo, hi) = cross_range(&arena.get(leaf).rect);
        events.push(Event { key: lo, kind: EventKind::Start, side: side_b, leaf });
        events.push(Event { key: hi, kind: EventKind::End, side: side_b, leaf });
    }

    events.sort_by_key(|e| (e.key, e.kind as u8, e.side as u8));

    let mut slot_a: Option<LeafId> = None;
    let mut slot_b: Option<LeafId> = None;
    let mut pairs = 0usize;

    for ev in events {
        let is_a = ev.side == side_a;
        match ev.kind {
            EventKind::Start => {
                if is_a {
                    slot_a = Some(ev.leaf);
                    if let Some(other) = slot_b {
                        link(arena, ev.leaf, side_a, other, side_b);
                        pairs += 1;
                    }
                } else {
                    slot_b = Some(ev.leaf);
                    if let Some(other) = slot_a {
                        link(arena, ev.leaf, side_b, other, side_a);
                        pairs += 1;
                    }
                }
            }
            EventKind::End => {
                if is_a {
                    slot_a = None;
                } else {
                    slot_b = None;
                }
            }
        }
    }

    pairs
}

fn link(arena: &mut LeafArena, leaf: LeafId, leaf_side: Side, other: LeafId, other_side: Side) {
    arena.get_mut(leaf).neighbors.push((other, leaf_side));
    arena.get_mut(other).neighbors.push((leaf, other_side));
}
