use rand::{thread_rng, Rng};

// read a fixture file as raw bytes, control characters included
#[allow(dead_code)]
pub fn read_fixture(path: &str) -> Vec<u8> {
    use std::io::Read;

    let mut file = std::fs::File::open(path).unwrap();
    let mut res = Vec::new();
    file.read_to_end(&mut res).unwrap();
    res
}

// random bytes of the given length
#[allow(dead_code)]
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    (0..len).map(|_| rng.gen::<u8>()).collect()
}

// random non-empty key of at most max_len bytes
#[allow(dead_code)]
pub fn random_key(max_len: usize) -> Vec<u8> {
    let len = thread_rng().gen_range(1, max_len + 1);
    random_bytes(len)
}

// indices left unchanged by a transform
#[allow(dead_code)]
pub fn pass_through(input: &[u8], output: &[u8]) -> Vec<usize> {
    input
        .iter()
        .zip(output.iter())
        .enumerate()
        .filter(|(_, (i, o))| i == o)
        .map(|(z, _)| z)
        .collect()
}
