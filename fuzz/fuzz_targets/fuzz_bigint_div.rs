#![no_main]
use std::cmp::Ordering;

use cryptsuite_bigint::BigInt;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the split point; cap sizes so division stays fast.
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let rest = &rest[..rest.len().min(64)];
    let (a, b) = rest.split_at(usize::from(split) % (rest.len() + 1));

    let a = BigInt::from_bytes(a).unwrap();
    let b = BigInt::from_bytes(b).unwrap();
    let mut q = BigInt::zero();
    let mut r = BigInt::zero();

    if b.is_zero() {
        assert!(a.div_rem(&b, Some(&mut q), &mut r).is_err());
        return;
    }
    a.div_rem(&b, Some(&mut q), &mut r).unwrap();
    assert_eq!(r.cmp_ct(&b), Ordering::Less);

    let mut prod = BigInt::zero();
    let mut sum = BigInt::zero();
    q.mul(&b, &mut prod).unwrap();
    prod.add(&r, &mut sum).unwrap();
    assert_eq!(sum, a);
});
