#![no_main]
use cryptsuite_bigint::BigInt;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(n) = BigInt::from_bytes(data) else {
        return;
    };

    let minimal = n.to_bytes_vec();
    let first_nonzero = data.iter().position(|&b| b != 0).unwrap_or(data.len());
    let expect: &[u8] = if first_nonzero == data.len() {
        &[0]
    } else {
        &data[first_nonzero..]
    };
    assert_eq!(minimal, expect);

    let mut padded = vec![0u8; n.used_digits() * 4];
    n.to_bytes(&mut padded, false).unwrap();
    assert_eq!(BigInt::from_bytes(&padded).unwrap(), n);
});
