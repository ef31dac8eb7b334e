use opencrypto::rng::{self, Csprng};

#[test]
fn test_csprng_deterministic_from_seed() {
    let seed = [0x42u8; 32];

    let mut rng1 = Csprng::from_seed(seed);
    let mut rng2 = Csprng::from_seed(seed);

    let mut a = [0u8; 128];
    let mut b = [0u8; 128];

    rng1.fill_bytes(&mut a);
    rng2.fill_bytes(&mut b);

    assert_eq!(a, b);
}

#[test]
fn test_csprng_rekey_changes_output() {
    let mut rng = Csprng::from_seed([0xAAu8; 32]);

    let mut a = [0u8; 64];
    let mut b = [0u8; 64];

    rng.fill_bytes(&mut a);
    rng.fill_bytes(&mut b);

    assert_ne!(a, b);
}

#[test]
fn test_csprng_not_all_zero() {
    let mut rng = Csprng::from_seed([0u8; 32]);

    let mut out = [0u8; 64];
    rng.fill_bytes(&mut out);

    assert!(out.iter().any(|&b| b != 0));
}

#[test]
fn test_csprng_partial_blocks() {
    let mut rng = Csprng::from_seed([7u8; 32]);

    let mut out = [0u8; 100];
    rng.fill_bytes(&mut out);

    assert!(out[64..].iter().any(|&b| b != 0));
    assert_ne!(rng.next_u32(), rng.next_u32());
}

#[test]
fn test_csprng_from_os() {
    let mut a = Csprng::from_os().unwrap();
    let mut b = Csprng::from_os().unwrap();

    let mut x = [0u8; 32];
    let mut y = [0u8; 32];
    a.fill_bytes(&mut x);
    b.fill_bytes(&mut y);

    assert_ne!(x, y);
}

#[test]
fn test_global_generator_from_many_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| rng::random_bytes(32).unwrap()))
        .collect();

    let outputs: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for (i, a) in outputs.iter().enumerate() {
        assert_eq!(a.len(), 32);
        for b in &outputs[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
