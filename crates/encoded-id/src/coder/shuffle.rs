/// Permutes `chars` deterministically, keyed by `salt`.
///
/// The same salt always produces the same permutation; an empty salt leaves
/// the input untouched.
pub fn consistent_shuffle(chars: &mut [char], salt: &[u8]) {
    if salt.is_empty() || chars.len() < 2 {
        return;
    }
    let mut v = 0;
    let mut p = 0;
    for i in (1..chars.len()).rev() {
        v %= salt.len();
        let n = usize::from(salt[v]);
        p += n;
        let j = (n + v + p) % i;
        chars.swap(i, j);
        v += 1;
    }
}
