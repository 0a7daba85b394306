//! Weighted and uniform selection over catalogs and plain lists.
//!
//! Two distinct weighted policies live here and are not interchangeable:
//!
//! * [`pick_one`] gives every catalog entry its own independent draw and
//!   walks the entries from the lowest weight to the highest, returning the
//!   first entry whose draw falls below its weight. When no entry qualifies
//!   the highest-weight entry is returned. The resulting distribution is
//!   biased toward that entry compared to the raw weights.
//! * [`pick_categorical`] uses a single threshold draw shared by all items and
//!   falls back to a uniform pick when nothing exceeds it.


use rand::Rng;

use crate::catalog::WeightedCatalog;
use crate::coverage::CoverageInfo;
use crate::error::{SampleError, SampleResult};

/// Draw one category from `catalog`.
///
/// The weight sum is checked before any randomness is consumed. One uniform
/// draw in `[0, 1)` is taken per entry; the i-th draw is compared against
/// the i-th entry in ascending weight order (ties keep insertion order) and
/// the first entry whose draw is strictly below its weight wins. If none
/// does, the last entry in that order, i.e. the one with the largest
/// weight, is returned. The fallback can fire even when the weights sum to
/// exactly `1.0`.
pub fn pick_one<'c, R: Rng + ?Sized>(
    catalog: &'c WeightedCatalog,
    rng: &mut R,
) -> SampleResult<&'c str> {
    if catalog.is_empty() {
        return Err(SampleError::EmptyInput(
            "cannot pick from an empty catalog".into(),
        ));
    }
    catalog.validate()?;

    let draws: Vec<f64> = (0..catalog.len()).map(|_| rng.random::<f64>()).collect();
    let ordered = catalog.ascending();
    for (draw, (label, weight)) in draws.iter().zip(&ordered) {
        if *draw < *weight {
            return Ok(*label);
        }
    }

    ordered
        .last()
        .map(|(label, _)| *label)
        .ok_or_else(|| SampleError::EmptyInput("cannot pick from an empty catalog".into()))
}

/// Draw between 1 and `max_count` distinct categories.
///
/// The target size is uniform in `[1, max_count]`. Categories are then drawn
/// one at a time with [`pick_one`] from a private copy of the catalog that
/// loses each chosen entry, stopping early if the copy runs dry.
pub fn pick_up_to_unique<R: Rng + ?Sized>(
    catalog: &WeightedCatalog,
    max_count: usize,
    rng: &mut R,
) -> SampleResult<Vec<String>> {
    if max_count == 0 {
        return Err(SampleError::DegenerateSubsetRequest(
            "max_count must be at least 1".into(),
        ));
    }
    if catalog.is_empty() {
        return Err(SampleError::EmptyInput(
            "cannot pick from an empty catalog".into(),
        ));
    }
    catalog.validate()?;

    let count = rng.random_range(1..=max_count);
    let mut remaining = catalog.clone();
    let mut picked = Vec::with_capacity(count.min(catalog.len()));
    while picked.len() < count && !remaining.is_empty() {
        let chosen = pick_one(&remaining, rng)?.to_string();
        remaining.remove(&chosen);
        picked.push(chosen);
    }
    Ok(picked)
}

/// Draw a small set of distinct values from an unweighted list.
///
/// The target size is uniform in `[1, max_count)`; `max_count == 1` always
/// targets a single value. A target larger than the number of distinct
/// values in `items` fails with [`SampleError::DegenerateSubsetRequest`]
/// before any value is drawn.
///
/// Each value is then drawn from the entries not yet chosen, so a value
/// listed twice is twice as likely to be picked. This matches drawing
/// uniform indices and discarding repeats, without the retries.
pub fn pick_up_to_unique_from_list<T, R>(
    items: &[T],
    max_count: usize,
    rng: &mut R,
) -> SampleResult<Vec<T>>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return Err(SampleError::EmptyInput("cannot pick from an empty list".into()));
    }
    if max_count == 0 || max_count > items.len() {
        return Err(SampleError::DegenerateSubsetRequest(format!(
            "max_count {max_count} must be within [1, {}]",
            items.len()
        )));
    }

    let target = if max_count > 1 {
        rng.random_range(1..max_count)
    } else {
        1
    };

    let distinct = count_distinct_up_to(items, target);
    if distinct < target {
        return Err(SampleError::DegenerateSubsetRequest(format!(
            "requested {target} distinct values but the list holds only {distinct}"
        )));
    }

    let mut picked: Vec<T> = Vec::with_capacity(target);
    while picked.len() < target {
        let remaining = items.iter().filter(|i| !picked.contains(*i)).count();
        let nth = rng.random_range(0..remaining);
        let chosen = items
            .iter()
            .filter(|i| !picked.contains(*i))
            .nth(nth)
            .ok_or_else(|| {
                SampleError::DegenerateSubsetRequest(format!("index {nth} out of {remaining}"))
            })?;
        picked.push(chosen.clone());
    }
    Ok(picked)
}

/// Distinct values in `items`, counting no further than `limit`.
fn count_distinct_up_to<T: PartialEq>(items: &[T], limit: usize) -> usize {
    let mut seen: Vec<&T> = Vec::with_capacity(limit);
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
            if seen.len() == limit {
                break;
            }
        }
    }
    seen.len()
}

/// Pick one element uniformly at random.
pub fn pick_one_uniform<'a, T, R: Rng + ?Sized>(
    items: &'a [T],
    rng: &mut R,
) -> SampleResult<&'a T> {
    if items.is_empty() {
        return Err(SampleError::EmptyInput("cannot pick from an empty list".into()));
    }
    let idx = rng.random_range(0..items.len());
    items
        .get(idx)
        .ok_or_else(|| SampleError::EmptyInput(format!("index {idx} out of range")))
}

/// Pick one item using a single shared threshold.
///
/// One threshold is drawn uniformly in `[0, 1)`. Items are visited in
/// ascending probability order (stable) and the first whose probability is
/// strictly greater than the threshold is returned. If none is, the result is
/// a uniform pick over all items.
pub fn pick_categorical<'a, T, R: Rng + ?Sized>(
    items: &'a [CoverageInfo<T>],
    rng: &mut R,
) -> SampleResult<&'a T> {
    if items.is_empty() {
        return Err(SampleError::EmptyInput(
            "cannot pick from an empty coverage list".into(),
        ));
    }
    if let Some(bad) = items.iter().find(|i| !i.probability.is_finite()) {
        return Err(SampleError::InvalidDistribution(format!(
            "coverage probability must be finite, got {}",
            bad.probability
        )));
    }

    let threshold: f64 = rng.random();
    let mut ordered: Vec<&CoverageInfo<T>> = items.iter().collect();
    ordered.sort_by(|a, b| a.probability.total_cmp(&b.probability));
    if let Some(hit) = ordered.iter().find(|info| threshold < info.probability) {
        return Ok(&hit.item);
    }

    pick_one_uniform(items, rng).map(|info| &info.item)
}
