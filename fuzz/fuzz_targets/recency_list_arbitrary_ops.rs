#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::{RecencyList, SlotId};

// Fuzz arbitrary operation sequences on RecencyList
//
// Tests random sequences of push_front, pop_back, remove, move_to_front, clear.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u8> = RecencyList::new();
    let mut ids: Vec<SlotId> = Vec::new();

    for chunk in data.chunks_exact(2) {
        let (op, arg) = (chunk[0] % 6, chunk[1]);

        match op {
            0 | 1 => {
                let id = list.push_front(arg);
                ids.push(id);
                assert_eq!(list.front_id(), Some(id));
                assert_eq!(list.front(), Some(&arg));
            }
            2 => {
                let expected = list.back().copied();
                assert_eq!(list.pop_back(), expected);
            }
            3 => {
                if !ids.is_empty() {
                    let id = ids[usize::from(arg) % ids.len()];
                    let live = list.contains(id);
                    let old_len = list.len();
                    assert_eq!(list.remove(id).is_some(), live);
                    if live {
                        assert_eq!(list.len(), old_len - 1);
                    }
                    assert!(!list.contains(id));
                }
            }
            4 => {
                if !ids.is_empty() {
                    let id = ids[usize::from(arg) % ids.len()];
                    let live = list.contains(id);
                    assert_eq!(list.move_to_front(id), live);
                    if live {
                        assert_eq!(list.front_id(), Some(id));
                    }
                }
            }
            _ => {
                if arg == 0 {
                    list.clear();
                    ids.clear();
                    assert!(list.is_empty());
                }
            }
        }

        assert_eq!(list.iter().count(), list.len());
        assert_eq!(list.iter().rev().count(), list.len());
    }

    list.check_links().unwrap();
});
