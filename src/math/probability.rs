/// Shannon entropy in bits over a set of probabilities
///
/// Non-positive entries contribute nothing, so an empty set (or one holding only
/// zeros) has zero entropy. The probabilities are not renormalized: a cell whose
/// remaining tiles are all rare reports a lower entropy than one holding common
/// tiles, which is what the scheduler ranks on.
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}
