/// One retained observation plus the rank bookkeeping CKMS needs.
///
/// `g` is the least number of ranks this sample covers beyond the
/// previous retained sample; `delta` is how many further ranks it might
/// cover. Summing `g` over a prefix of the list gives the lowest
/// possible rank of the prefix's last sample, and adding its `delta`
/// gives the highest.
#[derive(Debug, Clone)]
pub struct Sample<T> {
    pub v: T,
    pub g: usize,
    pub delta: usize,
}
