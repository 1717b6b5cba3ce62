//! Property tests for the array container's index, slice, and sort laws.

use proptest::prelude::*;

use ruta::{Array, Host, Value};
use std::rc::Rc;

fn fixnum_array(host: &Rc<Host>, ns: &[i64]) -> Rc<Array> {
    Array::from_values(host, ns.iter().map(|n| Value::fixnum(*n)).collect())
}

fn as_i64s(array: &Array) -> Vec<i64> {
    (0..array.len() as i64)
        .map(|i| match &*array.entry(i) {
            Value::Fixnum(n) => *n,
            other => panic!("expected fixnum, got {}", other),
        })
        .collect()
}

proptest! {
    #[test]
    fn negative_index_mirrors_positive(values in prop::collection::vec(-100i64..100, 1..24)) {
        let host = Host::new();
        let array = fixnum_array(&host, &values);
        let len = values.len() as i64;
        for i in 1..=len {
            prop_assert_eq!(array.entry(-i), array.entry(len - i));
        }
    }

    #[test]
    fn out_of_range_reads_are_nil(
        values in prop::collection::vec(-100i64..100, 0..16),
        extra in 0i64..100,
    ) {
        let host = Host::new();
        let array = fixnum_array(&host, &values);
        let len = values.len() as i64;
        prop_assert!(array.entry(len + extra).is_nil());
        prop_assert!(array.entry(-(len + extra + 1)).is_nil());
    }

    #[test]
    fn store_in_range_reads_back(
        values in prop::collection::vec(-100i64..100, 1..24),
        stored in -100i64..100,
        pick in any::<prop::sample::Index>(),
    ) {
        let host = Host::new();
        let array = fixnum_array(&host, &values);
        let idx = pick.index(values.len()) as i64;
        array.store(idx, Value::fixnum(stored)).unwrap();
        prop_assert_eq!(array.entry(idx), Value::fixnum(stored));
        prop_assert_eq!(array.len(), values.len());
    }

    #[test]
    fn store_past_end_fills_gap_with_nil(
        values in prop::collection::vec(-100i64..100, 0..8),
        gap in 1i64..16,
    ) {
        let host = Host::new();
        let array = fixnum_array(&host, &values);
        let old_len = values.len() as i64;
        let idx = old_len + gap;
        array.store(idx, Value::fixnum(7)).unwrap();

        prop_assert_eq!(array.len() as i64, idx + 1);
        for pos in old_len..idx {
            prop_assert!(array.entry(pos).is_nil());
        }
        prop_assert_eq!(array.entry(idx), Value::fixnum(7));
    }

    #[test]
    fn subseq_clamps_to_available_run(
        values in prop::collection::vec(-100i64..100, 0..16),
        beg in 0i64..20,
        len in 0i64..20,
    ) {
        let host = Host::new();
        let array = fixnum_array(&host, &values);
        let n = values.len() as i64;

        let result = array.subseq(beg, len);
        if beg > n {
            prop_assert!(result.is_nil());
        } else {
            let sub = match &*result {
                Value::Array(a) => Rc::clone(a),
                other => panic!("expected array, got {}", other),
            };
            prop_assert_eq!(sub.len() as i64, len.min(n - beg));
            let expected: Vec<i64> =
                values[beg as usize..(beg + len.min(n - beg)) as usize].to_vec();
            prop_assert_eq!(as_i64s(&sub), expected);
        }
    }

    #[test]
    fn sort_bang_orders_a_permutation(values in prop::collection::vec(-100i64..100, 0..24)) {
        let host = Host::new();
        let array = fixnum_array(&host, &values);
        array.sort_bang().unwrap();

        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(as_i64s(&array), expected);
        prop_assert!(!array.is_sort_locked());
    }

    #[test]
    fn sort_leaves_original_untouched(values in prop::collection::vec(-100i64..100, 0..24)) {
        let host = Host::new();
        let array = fixnum_array(&host, &values);
        let sorted = array.sort().unwrap();

        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(as_i64s(&array), values);
        prop_assert_eq!(as_i64s(&sorted), expected);
    }

    #[test]
    fn frozen_array_is_left_unchanged_by_rejected_mutations(
        values in prop::collection::vec(-100i64..100, 1..16),
        idx in -20i64..20,
    ) {
        let host = Host::new();
        let array = fixnum_array(&host, &values);
        array.freeze();

        prop_assert!(array.push(Value::fixnum(0)).is_err());
        prop_assert!(array.store(idx, Value::fixnum(0)).is_err());
        prop_assert!(array.pop().is_err());
        prop_assert!(array.shift().is_err());
        prop_assert_eq!(as_i64s(&array), values);
    }
}
