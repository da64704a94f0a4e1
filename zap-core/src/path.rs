use alloy::primitives::Address;

use crate::types::{AnchorPair, SwapPath, TokenClass, NATIVE_TOKEN};

/// The two router paths a zap-out quote needs, one per pool side.
///
/// The same-anchor side degenerates to `[anchor, anchor]`; the zap contract
/// ignores that leg. This mirrors how the paths are fed to the quote method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZapOutPaths {
    pub via_secondary: SwapPath,
    pub via_primary: SwapPath,
}

/// Plans both zap-out paths for a target token.
///
/// Any non-anchor token is reachable from the primary anchor only by first
/// routing through the secondary anchor, so that path gains a middle hop.
/// A native target is planned as the secondary (wrapped-native) anchor.
pub fn zap_out_paths(target: Address, anchors: &AnchorPair) -> ZapOutPaths {
    let target = if target == NATIVE_TOKEN {
        anchors.secondary
    } else {
        target
    };
    let via_secondary = SwapPath::direct(anchors.secondary, target);
    let via_primary = if anchors.is_anchor(target) {
        SwapPath::direct(anchors.primary, target)
    } else {
        SwapPath::via(anchors.primary, anchors.secondary, target)
    };
    ZapOutPaths {
        via_secondary,
        via_primary,
    }
}

/// Zap-in mirror: a non-anchor source token is pre-converted to the
/// secondary anchor before the zap contract mints the pool position.
/// Anchors and the native coin need no pre-path.
pub fn zap_in_pre_path(source: Address, anchors: &AnchorPair) -> Option<SwapPath> {
    match anchors.classify(source) {
        TokenClass::Other => Some(SwapPath::direct(source, anchors.secondary)),
        _ => None,
    }
}
