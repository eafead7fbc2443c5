use tally_map::ChainMap;

#[test]
fn set_get_remove_roundtrip() {
    let mut map = ChainMap::new(16);

    assert!(map.is_empty());
    assert_eq!(map.set(1, "one"), None);
    assert_eq!(map.set(2, "two"), None);
    assert_eq!(map.len(), 2);

    assert_eq!(map.get(&1), Some(&"one"));
    assert_eq!(map.get(&2), Some(&"two"));
    assert_eq!(map.get(&3), None);
    assert!(map.has(&1));
    assert!(!map.has(&3));

    assert_eq!(map.remove(&1), Some("one"));
    assert_eq!(map.remove(&1), None);
    assert_eq!(map.len(), 1);
    assert!(!map.has(&1));
}

#[test]
fn set_overwrites_existing_keys() {
    let mut map = ChainMap::new(8);

    assert_eq!(map.set("k", 1), None);
    assert_eq!(map.set("k", 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"k"), Some(&2));
}

#[test]
fn colliding_bucket_function_keeps_entries_apart() {
    // Forcing everything into bucket 0 exercises pure chaining.
    let mut map = ChainMap::with_bucket_fn(4, Box::new(|_: &u32, _| 0));

    for key in 0..32u32 {
        map.set(key, key * 10);
    }
    assert_eq!(map.len(), 32);

    for key in 0..32u32 {
        assert_eq!(map.get(&key), Some(&(key * 10)));
    }

    for key in (0..32u32).step_by(2) {
        assert_eq!(map.remove(&key), Some(key * 10));
    }
    assert_eq!(map.len(), 16);

    for key in 0..32u32 {
        assert_eq!(map.has(&key), key % 2 == 1);
    }
}

#[test]
fn default_strategy_with_owned_keys() {
    let mut map = ChainMap::new(32);

    for i in 0..64u32 {
        map.set(format!("key-{i}"), i);
    }

    assert_eq!(map.len(), 64);
    assert_eq!(map.get(&"key-17".to_string()), Some(&17));
    assert_eq!(map.remove(&"key-17".to_string()), Some(17));
    assert!(!map.has(&"key-17".to_string()));
}

#[test]
fn single_bucket_map_works() {
    let mut map = ChainMap::new(1);

    for key in 0..100u32 {
        map.set(key, key);
    }

    assert_eq!(map.len(), 100);
    assert_eq!(map.get(&99), Some(&99));
}
