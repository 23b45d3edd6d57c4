//! Invocation planning: which thread counts each algorithm runs at.

use mhscheck_core::constants::DEFAULT_THREAD_COUNT;
use mhscheck_core::invocation::InvocationKey;
use mhscheck_core::registry::AlgorithmDescriptor;

/// Thread counts applicable to one algorithm: the requested list in caller
/// order for threads-capable algorithms, `[1]` otherwise.
#[must_use]
pub fn thread_counts_for(descriptor: &AlgorithmDescriptor, requested: &[usize]) -> Vec<usize> {
    if descriptor.threads {
        requested.to_vec()
    } else {
        vec![DEFAULT_THREAD_COUNT]
    }
}

/// The full invocation plan: descriptors in registry order, each expanded to
/// its applicable thread counts. Every key is distinct.
#[must_use]
pub fn plan_invocations(
    descriptors: &[AlgorithmDescriptor],
    requested: &[usize],
) -> Vec<InvocationKey> {
    descriptors
        .iter()
        .flat_map(|desc| {
            thread_counts_for(desc, requested)
                .into_iter()
                .map(|t| InvocationKey::new(desc.name.clone(), t))
        })
        .collect()
}
