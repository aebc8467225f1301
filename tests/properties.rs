//! Property tests for sorted insertion and value conversions.

use std::cmp::Ordering;
use std::rc::Rc;

use cellkit::{ColorRef, GenericArray, IconHandle, RawArray, StringTable, Value, ValueKind};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(Value::int32),
        any::<u32>().prop_map(Value::uint32),
        any::<i64>().prop_map(Value::int64),
        any::<u64>().prop_map(Value::uint64),
        ".{0,12}".prop_map(|s| Value::string_w(&cellkit::text::to_wide(&s)).unwrap()),
        ".{0,12}".prop_map(|s| Value::string_a(&s).unwrap()),
        ".{0,12}".prop_map(|s| Value::immstring_w(Rc::from(cellkit::text::to_wide(&s)))),
        ".{0,12}".prop_map(|s| Value::immstring_a(Rc::from(s.as_str()))),
        any::<u32>().prop_map(|c| Value::color(ColorRef(c))),
        any::<usize>().prop_map(|h| Value::icon(IconHandle(h))),
    ]
}

fn sorted_column(keys: &[i32]) -> GenericArray<Value> {
    let mut column = GenericArray::new();
    for &k in keys {
        column.insert_sorted(Value::int32(k), Value::compare).unwrap();
    }
    column
}

fn column_keys(column: &GenericArray<Value>) -> Vec<i32> {
    column.iter().map(|v| v.to_int32().unwrap()).collect()
}

// =============================================================================
// Arrays
// =============================================================================

proptest! {
    #[test]
    fn insert_sorted_matches_sort(keys in prop::collection::vec(any::<i32>(), 0..200)) {
        let column = sorted_column(&keys);
        let mut expected = keys.clone();
        expected.sort();
        prop_assert_eq!(column.len(), keys.len());
        prop_assert!(column.capacity() >= column.len());
        prop_assert_eq!(column_keys(&column), expected);
    }

    #[test]
    fn insert_returns_lower_bound(
        keys in prop::collection::vec(-20i32..20, 0..60),
        probe in -25i32..25,
    ) {
        let mut column = sorted_column(&keys);
        let expected = keys.iter().filter(|&&k| k < probe).count();
        let index = column.insert_sorted(Value::int32(probe), Value::compare).unwrap();
        prop_assert_eq!(index, expected);
    }

    #[test]
    fn smart_insert_agrees_with_sorted(
        keys in prop::collection::vec(-20i32..20, 0..60),
        probe in -25i32..25,
        hint in 0usize..80,
    ) {
        let mut plain = sorted_column(&keys);
        let mut smart = plain.clone();
        let a = plain.insert_sorted(Value::int32(probe), Value::compare).unwrap();
        let b = smart.insert_smart(hint, Value::int32(probe), Value::compare).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(column_keys(&plain), column_keys(&smart));
    }

    #[test]
    fn smart_insert_accepts_correct_hint(
        keys in prop::collection::vec(any::<i32>(), 0..60),
        probe in any::<i32>(),
    ) {
        let mut column = sorted_column(&keys);
        let hint = keys.iter().filter(|&&k| k < probe).count();
        let index = column.insert_smart(hint, Value::int32(probe), Value::compare).unwrap();
        prop_assert_eq!(index, hint);
    }

    #[test]
    fn move_sorted_matches_reinsert(
        keys in prop::collection::vec(-30i32..30, 1..60),
        pick in any::<prop::sample::Index>(),
        new_key in -35i32..35,
    ) {
        let mut moved = sorted_column(&keys);
        let index = pick.index(moved.len());

        let mut reinserted = moved.clone();
        reinserted.remove(index).unwrap();
        let expected = reinserted
            .insert_sorted(Value::int32(new_key), Value::compare)
            .unwrap();

        moved.get_mut(index).unwrap().set_int32(new_key);
        let target = moved.move_sorted(index, Value::compare).unwrap();

        prop_assert_eq!(target, expected);
        prop_assert_eq!(column_keys(&moved), column_keys(&reinserted));
    }

    #[test]
    fn remove_and_clear_account_sizes(
        keys in prop::collection::vec(any::<i32>(), 1..80),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut column = sorted_column(&keys);
        let index = pick.index(column.len());
        let before = column_keys(&column);
        let removed = column.remove(index).unwrap();
        prop_assert_eq!(removed.to_int32(), Some(before[index]));
        prop_assert_eq!(column.len(), keys.len() - 1);

        let capacity = column.capacity();
        column.clear();
        prop_assert!(column.is_empty());
        prop_assert_eq!(column.capacity(), capacity);
    }

    #[test]
    fn raw_array_sort_matches_slice_sort(keys in prop::collection::vec(any::<u32>(), 0..120)) {
        let mut raw = RawArray::new(4);
        for k in &keys {
            raw.push(&k.to_be_bytes()).unwrap();
        }
        // Big-endian bytes order the same way as the numbers
        raw.sort(<[u8]>::cmp);

        let mut expected = keys.clone();
        expected.sort_unstable();
        let got: Vec<u32> = raw
            .iter()
            .map(|slot| u32::from_be_bytes([slot[0], slot[1], slot[2], slot[3]]))
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn raw_move_sorted_matches_generic(
        keys in prop::collection::vec(any::<u16>(), 1..50),
        pick in any::<prop::sample::Index>(),
        new_key in any::<u16>(),
    ) {
        let mut raw = RawArray::new(2);
        let mut typed = GenericArray::new();
        for k in &keys {
            raw.insert_sorted(&k.to_be_bytes(), <[u8]>::cmp).unwrap();
            typed.insert_sorted(*k, u16::cmp).unwrap();
        }
        let index = pick.index(keys.len());
        raw.get_mut(index).unwrap().copy_from_slice(&new_key.to_be_bytes());
        *typed.get_mut(index).unwrap() = new_key;

        let a = raw.move_sorted(index, <[u8]>::cmp).unwrap();
        let b = typed.move_sorted(index, u16::cmp).unwrap();
        prop_assert_eq!(a, b);
        for (slot, k) in raw.iter().zip(typed.iter()) {
            prop_assert_eq!(slot, &k.to_be_bytes()[..]);
        }
    }
}

// =============================================================================
// Values
// =============================================================================

proptest! {
    #[test]
    fn format_then_parse_round_trips(value in any_value()) {
        let text = value.to_string();
        let parsed = value.kind().parse(&text).unwrap();
        prop_assert_eq!(parsed.compare(&value), Ordering::Equal);
    }

    #[test]
    fn format_into_reports_required_length(value in any_value(), room in 0usize..24) {
        let full = value.to_string();
        let mut buf = vec![0u8; room];
        let len = value.format_into(&mut buf);
        prop_assert_eq!(len.required, full.len());
        prop_assert!(len.written <= room);
        prop_assert!(full.as_bytes().starts_with(&buf[..len.written]));
        prop_assert!(std::str::from_utf8(&buf[..len.written]).is_ok());
    }

    #[test]
    fn copy_is_equal_and_independent(value in any_value(), replacement in any::<i32>()) {
        let mut copy = value.try_clone().unwrap();
        prop_assert_eq!(copy.compare(&value), Ordering::Equal);
        prop_assert_eq!(copy.kind(), value.kind());

        let original = value.to_string();
        copy.set_int32(replacement);
        prop_assert_eq!(value.to_string(), original);
    }

    #[test]
    fn compare_is_a_total_order(a in any_value(), b in any_value(), c in any_value()) {
        prop_assert_eq!(a.compare(&a), Ordering::Equal);
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
        if a.compare(&b) != Ordering::Greater && b.compare(&c) != Ordering::Greater {
            prop_assert_ne!(a.compare(&c), Ordering::Greater);
        }
        if a.kind() != b.kind() {
            prop_assert_eq!(a.compare(&b), a.kind().cmp(&b.kind()));
        }
    }

    #[test]
    fn failed_assign_leaves_value(value in any_value(), junk in "[g-z]{1,6}") {
        let kind = value.kind();
        let before = value.to_string();
        let mut target = value;
        let result = target.assign_from_str(&junk);
        if kind.is_text() {
            prop_assert!(result.is_ok());
            prop_assert_eq!(target.to_string(), junk);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(target.to_string(), before);
        }
        prop_assert_eq!(target.kind(), kind);
    }
}

#[test]
fn shared_text_outlives_its_producer() {
    let mut table = StringTable::new();
    let shared = table.intern("ok");
    let a = Value::immstring_a(Rc::clone(&shared));
    let b = a.try_clone().unwrap();
    drop(shared);
    drop(a);

    // The table still holds its own reference; `b` keeps the entry alive
    assert_eq!(table.purge(), 0);
    assert_eq!(b.as_string_a(), Some("ok"));
    drop(b);
    assert_eq!(table.purge(), 1);
    assert_eq!(table.count(), 0);
}

#[test]
fn every_kind_has_a_name() {
    for kind in ValueKind::ALL {
        assert_eq!(ValueKind::from_name(kind.name()), Some(kind));
    }
}
