// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// A declared data source, consumed lazily and at most once.
pub type Source<'a, V> = Box<dyn Iterator<Item = V> + 'a>;

/// One binding tuple: the current value of every source, in declared source order.
pub type Step<V> = Vec<V>;

/// A strategy for walking a set of sources.
///
/// A traversal is a lazy, single-pass, non-restartable sequence of steps.
/// Each step holds exactly one value per declared source, positioned as the
/// sources were declared; the driver pairs them back up with source names.
///
/// Implementations must be fused: once `next()` returns `None` it keeps
/// returning `None`.
pub trait Traversal<V>: Iterator<Item = Step<V>> {
    /// Short strategy name used in logs.
    fn name(&self) -> &'static str;
}
