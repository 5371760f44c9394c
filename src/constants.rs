//! Magic numbers pulled out of the header parser and decode drivers so
//! they have one documented home each (spec §3, §4.2, §4.5, §6).

/// Upper bound on transform-stack length a container header may declare
/// (spec §6 notes a transform stack is "strictly increasing" in name
/// index and capped); guards against a corrupt frame count turning the
/// transform-read loop unbounded.
pub(crate) const MAX_TRANSFORM: usize = 9;

/// Largest palette a `Palette` transform may declare (spec §4.2).
pub(crate) const MAX_PALETTE_SIZE: usize = 30_000;

/// Number of coarsest interlaced zoomlevels that use an empty (rough)
/// MANIAC tree before the real tree is read, per spec §4.5 "Rough +
/// MANIAC + fine".
pub(crate) const NB_NOLEARN_ZOOMS: i32 = 2;

/// Plane kind tags, used wherever decode logic cares which channel a
/// plane index refers to rather than its position in a particular
/// image's (possibly shorter) plane list.
pub(crate) const PLANE_Y_OR_R: usize = 0;
pub(crate) const PLANE_I_OR_G: usize = 1;
pub(crate) const PLANE_Q_OR_B: usize = 2;
pub(crate) const PLANE_ALPHA: usize = 3;
pub(crate) const PLANE_LOOKBACK: usize = 4;
